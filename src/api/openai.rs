// src/api/openai.rs
//! OpenAI chat-completions classifier.
//!
//! Sends one chat request per post in JSON-object mode and hands the parsed
//! object back to the caller unvalidated.

use super::client::extract_response_text;
use crate::algebras::{CapabilityError, ClaimClassifier, ClaimRequest};
use crate::constants::{CLASSIFY_TIMEOUT, DEFAULT_CLASSIFIER_MODEL, OPENAI_API_URL};
use crate::error::AppError;
use crate::labeling::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::types::{ApiKey, ValidatedUrl};
use reqwest::blocking::Client;
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Blocking OpenAI-compatible chat client used as a [`ClaimClassifier`].
pub struct OpenAiClassifier {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiClassifier {
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(CLASSIFY_TIMEOUT)
            .default_headers(Self::create_headers(api_key)?)
            .build()?;

        Ok(Self {
            client,
            base_url: OPENAI_API_URL.to_string(),
            model: DEFAULT_CLASSIFIER_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Targets an OpenAI-compatible server other than the public API.
    pub fn with_base_url(mut self, base_url: &ValidatedUrl) -> Self {
        self.base_url = base_url.as_str().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid OPENAI_API_KEY format: {}", e))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn build_request<'a>(&'a self, user_prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                WireMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT,
                },
                WireMessage {
                    role: Role::User,
                    content: user_prompt,
                },
            ],
        }
    }

    fn complete(&self, request: &ClaimRequest<'_>) -> Result<Value, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let user_prompt = build_user_prompt(request);
        let body = self.build_request(&user_prompt);

        log::debug!("POST {} (model {})", url, self.model);
        let response = self.client.post(&url).json(&body).send()?;
        let text = extract_response_text(response)?;

        let chat: ChatResponse = serde_json::from_str(&text.data)?;
        parse_message_content(first_content(&chat))
    }
}

impl ClaimClassifier for OpenAiClassifier {
    fn classify(&self, request: &ClaimRequest<'_>) -> Result<Value, CapabilityError> {
        self.complete(request).map_err(CapabilityError::from)
    }
}

fn first_content(chat: &ChatResponse) -> &str {
    chat.choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .unwrap_or("")
}

/// Parses the model's message content. Empty content reads as `{}`.
fn parse_message_content(content: &str) -> Result<Value, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(content).map_err(|e| {
        AppError::MalformedResponse(format!("model response is not valid JSON: {}", e))
    })
}
