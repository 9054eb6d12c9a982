// src/api/images.rs
//! Image bytes over HTTP.

use super::client::HttpSession;
use crate::algebras::{CapabilityError, ImageSource};
use crate::error::AppError;
use std::time::Duration;

/// Fetches images over a shared blocking session.
#[derive(Clone, Debug)]
pub struct HttpImageSource {
    session: HttpSession,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            session: HttpSession::new(timeout)?,
        })
    }
}

impl ImageSource for HttpImageSource {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CapabilityError> {
        let bytes = self.session.get_bytes(url)?;
        if bytes.is_empty() {
            return Err(CapabilityError::MalformedResponse {
                reason: format!("empty body for {}", url),
            });
        }
        Ok(bytes)
    }
}
