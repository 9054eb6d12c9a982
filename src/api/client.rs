// src/api/client.rs
//! Blocking HTTP plumbing shared by every external service client.
//!
//! This module wraps reqwest's blocking client. It handles timeouts, status
//! checks and body extraction without any knowledge of what the bodies mean.

use crate::error::{AppError, ServiceStatus};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// How much of an error body is kept for diagnostics.
const ERROR_BODY_PREVIEW: usize = 1000;

/// A reusable blocking HTTP session with a fixed per-request timeout.
///
/// One session is created per stage invocation and reused for every item of
/// that stage, so connections are pooled across calls.
#[derive(Clone, Debug)]
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// Creates a session whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body bytes of a 2xx response.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        log::debug!("GET {}", url);
        let response = ensure_success(self.client.get(url).send()?)?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Turns a non-2xx response into [`AppError::ServiceError`], keeping a
/// preview of the body for the log.
pub fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    Err(AppError::ServiceError {
        status: ServiceStatus::from_http_status(status.as_u16()),
        url,
        body: truncate_body(&body),
    })
}

/// Extracts the body of a successful response as text with metadata.
pub fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let response = ensure_success(response)?;
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW {
        body.to_string()
    } else {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
        format!("{}...", head)
    }
}
