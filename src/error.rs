// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Only a few of them are allowed to stop a stage: a missing or unreadable
//! input artifact, missing configuration, or a failed artifact write. Every
//! per-item failure is converted into a [`crate::algebras::CapabilityError`]
//! and absorbed by the stage that met it.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// HTTP status vocabulary for the external services the pipeline talks to.
///
/// The search API, the image hosts and the classification API all report
/// failures through plain HTTP status codes, so the status code is the
/// only structure shared between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// 401/403: credentials missing, invalid or lacking permission
    Unauthorized(u16),
    /// 404: the resource is gone (deleted post, expired media URL)
    NotFound,
    /// 408: the server gave up waiting for the request
    RequestTimeout,
    /// 429: too many requests
    RateLimited,
    /// 5xx: server-side trouble
    ServerError(u16),
    /// Anything else outside the 2xx range
    Other(u16),
}

impl ServiceStatus {
    /// Classifies a non-success HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            404 => Self::NotFound,
            408 => Self::RequestTimeout,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status),
            other => Self::Other(other),
        }
    }

    /// Numeric HTTP status code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Unauthorized(code) | Self::ServerError(code) | Self::Other(code) => *code,
            Self::NotFound => 404,
            Self::RequestTimeout => 408,
            Self::RateLimited => 429,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound => "not found",
            Self::RequestTimeout => "request timeout",
            Self::RateLimited => "rate limited",
            Self::ServerError(_) => "server error",
            Self::Other(code) => return write!(f, "HTTP {}", code),
        };
        write!(f, "{} (HTTP {})", name, self.code())
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("JSON parse error for {}: {source}", path.display())]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Service returned {status} for {url}: {body}")]
    ServiceError {
        status: ServiceStatus,
        url: String,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Whether this error belongs to the run-terminating class: the stage
    /// cannot start (or cannot persist its artifact) at all.
    pub fn is_stage_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingConfiguration(_)
                | Self::InputNotFound { .. }
                | Self::JsonParseError { .. }
                | Self::Io(_)
                | Self::Csv(_)
                | Self::Validation(_)
                | Self::StageFailed { .. }
        )
    }

    /// Wraps a stage-fatal error with the name of the stage that hit it.
    pub fn in_stage(self, stage: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ServiceStatus::from_http_status(401), ServiceStatus::Unauthorized(401));
        assert_eq!(ServiceStatus::from_http_status(404), ServiceStatus::NotFound);
        assert_eq!(ServiceStatus::from_http_status(429), ServiceStatus::RateLimited);
        assert_eq!(ServiceStatus::from_http_status(503), ServiceStatus::ServerError(503));
        assert_eq!(ServiceStatus::from_http_status(418).code(), 418);
    }

    #[test]
    fn test_status_display_carries_code() {
        assert_eq!(ServiceStatus::Unauthorized(403).to_string(), "unauthorized (HTTP 403)");
        assert_eq!(ServiceStatus::RateLimited.to_string(), "rate limited (HTTP 429)");
        assert_eq!(ServiceStatus::Other(418).to_string(), "HTTP 418");
    }

    #[test]
    fn test_stage_fatal_errors() {
        let missing = AppError::InputNotFound {
            path: PathBuf::from("raw.json"),
        };
        assert!(missing.is_stage_fatal());
        assert_eq!(missing.to_string(), "Input file not found: raw.json");

        let extraction = AppError::ExtractionFailed("tesseract exited with 1".to_string());
        assert!(!extraction.is_stage_fatal());
        assert!(!AppError::MalformedResponse("not json".into()).is_stage_fatal());

        let wrapped = missing.in_stage("ocr");
        assert!(wrapped.is_stage_fatal());
        assert_eq!(
            wrapped.to_string(),
            "Stage 'ocr' failed: Input file not found: raw.json"
        );
    }
}
