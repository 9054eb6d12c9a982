use thiserror::Error;

mod domain_types;
mod ids;
mod label;

pub use domain_types::*;
pub use ids::*;
pub use label::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid item ID: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Unknown pipeline stage: {0}")]
    UnknownStage(String),
}
