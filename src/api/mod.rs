// src/api/mod.rs
//! Blocking HTTP interpreters for the capability algebras.
//!
//! Each client here implements one trait from [`crate::algebras`]. Stages
//! depend on the traits, never on these types.

pub mod client;
mod images;
mod openai;
mod search;

pub use client::HttpSession;
pub use images::HttpImageSource;
pub use openai::OpenAiClassifier;
pub use search::TwitterApiClient;
