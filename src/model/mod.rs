// src/model/mod.rs
//! Dataset records and the lookup machinery used to read raw payloads.

pub mod lookup;
mod row;
pub mod schema;

pub use lookup::{FieldPath, Lookup};
pub use row::Row;

/// A collected post exactly as the search API returned it.
pub type RawItem = serde_json::Value;
