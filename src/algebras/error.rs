//! Error type for capability operations.
//!
//! Every capability (search, image fetch, text extraction, classification)
//! reports failure through [`CapabilityError`]. Stages treat these as
//! per-unit failures: they are logged, replaced by a safe default, and the
//! stage moves on.

use crate::error::{AppError, ServiceStatus};
use std::fmt;

/// Failure of a single capability call.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// Connection refused, reset, DNS failure and friends.
    Transport { message: String },

    /// The call did not complete within its timeout.
    Timeout { operation: String },

    /// The service answered with a non-success status.
    Service { status: ServiceStatus, message: String },

    /// The service answered, but not with something we can use.
    MalformedResponse { reason: String },

    /// The extraction engine failed on the given image.
    Extraction { reason: String },

    /// The request could not be built from the given input.
    InvalidInput { reason: String },

    /// Some other error occurred.
    Other { message: String },
}

impl CapabilityError {
    /// Returns `true` for transport-level failures: connection trouble,
    /// timeouts, any non-2xx answer and undecodable bodies. Failures to
    /// build the request repeat identically and are not retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Timeout { .. }
                | Self::Service { .. }
                | Self::MalformedResponse { .. }
        )
    }
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "Transport error: {}", message),
            Self::Timeout { operation } => write!(f, "Timeout during: {}", operation),
            Self::Service { status, message } => write!(f, "Service error [{}]: {}", status, message),
            Self::MalformedResponse { reason } => write!(f, "Malformed response: {}", reason),
            Self::Extraction { reason } => write!(f, "Extraction failed: {}", reason),
            Self::InvalidInput { reason } => write!(f, "Invalid input: {}", reason),
            Self::Other { message } => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for CapabilityError {}

impl From<AppError> for CapabilityError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NetworkFailure(ref source) if source.is_timeout() => Self::Timeout {
                operation: source
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "request".to_string()),
            },
            AppError::NetworkFailure(source) => Self::Transport {
                message: source.to_string(),
            },
            AppError::ServiceError { status, url, body } => Self::Service {
                status,
                message: format!("{} ({})", body, url),
            },
            AppError::MalformedResponse(reason) => Self::MalformedResponse { reason },
            AppError::ExtractionFailed(reason) => Self::Extraction { reason },
            AppError::Validation(e) => Self::InvalidInput {
                reason: e.to_string(),
            },
            other => Self::Other {
                message: other.to_string(),
            },
        }
    }
}
