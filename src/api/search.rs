// src/api/search.rs
//! twitterapi.io advanced search client.

use super::client::extract_response_text;
use crate::algebras::{CapabilityError, SearchPage, SearchSource};
use crate::collector::parse_search_body;
use crate::constants::{SEARCH_API_URL, SEARCH_QUERY_TYPE, SEARCH_TIMEOUT};
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use reqwest::blocking::Client;
use reqwest::header;
use std::cell::Cell;

/// Blocking client for the advanced search endpoint.
pub struct TwitterApiClient {
    client: Client,
    endpoint: ValidatedUrl,
    requests_sent: Cell<u32>,
}

impl TwitterApiClient {
    /// Creates a client authenticated with `api_key`, optionally routed
    /// through an HTTP proxy.
    pub fn new(api_key: &ApiKey, proxy: Option<&ValidatedUrl>) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .default_headers(Self::create_headers(api_key)?);

        if let Some(proxy) = proxy {
            log::debug!(
                "Routing search requests through proxy {}",
                proxy.as_url().host_str().unwrap_or("?")
            );
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: ValidatedUrl::parse(SEARCH_API_URL)?,
            requests_sent: Cell::new(0),
        })
    }

    /// Points the client at a different endpoint (self-hosted mirror, test server).
    pub fn with_endpoint(mut self, endpoint: ValidatedUrl) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(api_key.as_str()).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid TWITTERAPI_KEY format: {}", e))
            })?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    /// Builds the request URL for one page.
    pub fn page_url(&self, query: &str, cursor: Option<&str>) -> url::Url {
        let mut url = self.endpoint.as_url().clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            pairs.append_pair("queryType", SEARCH_QUERY_TYPE);
            if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
                pairs.append_pair("cursor", cursor);
            }
        }
        url
    }

    fn fetch_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, AppError> {
        let url = self.page_url(query, cursor);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let body = extract_response_text(response)?;

        let sent = self.requests_sent.get() + 1;
        self.requests_sent.set(sent);
        if sent == 1 {
            log::debug!("Raw response (first page, HTTP {}): {}", body.status, body.data);
        }

        parse_search_body(&body.data)
    }
}

impl SearchSource for TwitterApiClient {
    fn search(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, CapabilityError> {
        self.fetch_page(query, cursor).map_err(CapabilityError::from)
    }
}
