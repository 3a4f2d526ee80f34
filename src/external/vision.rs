// ABOUTME: Food identification through an OpenAI-compatible chat completion API
// ABOUTME: Sends the image data-URL as the user message and returns the free-text food name
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Food identification provider
//!
//! Wraps a chat-style vision/LLM API: one request carrying a model id, a
//! system instruction, the image data-URL as the user message, and a token
//! cap; one free-text food name back.
//!
//! A 429 from the API is surfaced as the rate-limit signal so the retry
//! wrapper can back off and try again; every other failure propagates as an
//! external-service error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::VisionConfig;
use crate::errors::AppError;

/// Environment variable for the API key
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default model identifier
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default base URL of the OpenAI-compatible API
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Token cap for the identification reply; a food name is short
const MAX_COMPLETION_TOKENS: u32 = 50;

/// System instruction for the identification request
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Identify the food in the image and reply with its name only.";

/// Fallback when the model returns no usable content
const UNKNOWN_FOOD: &str = "Unknown Food";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    message: String,
}

// ============================================================================
// Trait and implementations
// ============================================================================

/// Identifies the food shown in a base64 data-URL image.
#[async_trait]
pub trait FoodIdentifier: Send + Sync {
    /// Return the food name for the image, or an error.
    async fn identify(&self, image_data_url: &str) -> Result<String, AppError>;
}

/// OpenAI-compatible chat completion client for food identification.
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVisionClient {
    /// Create a client with explicit credentials.
    #[must_use]
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Create a client from a loaded [`VisionConfig`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the missing environment
    /// variable when no API key is present.
    pub fn from_config(config: &VisionConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::config(format!("Missing {API_KEY_ENV} environment variable"))
        })?;
        Ok(Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
        ))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::config(format!("Missing {API_KEY_ENV} environment variable"))
        })?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        Ok(Self::new(api_key, base_url, model))
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map_or_else(|_| body.chars().take(200).collect(), |e| e.error.message);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            AppError::external_rate_limited("Vision API", message)
        } else {
            AppError::external_service("Vision API", format!("HTTP {status}: {message}"))
        }
    }
}

#[async_trait]
impl FoodIdentifier for OpenAiVisionClient {
    async fn identify(&self, image_data_url: &str) -> Result<String, AppError> {
        debug!(model = %self.model, "sending food identification request");

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_owned(),
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: "user".to_owned(),
                    content: image_data_url.to_owned(),
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("failed to reach vision API: {e}");
                AppError::external_service("Vision API", format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("Vision API", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_service("Vision API", format!("Failed to parse response: {e}"))
        })?;

        let name = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| UNKNOWN_FOOD.to_owned());

        debug!(food = %name, "food identified");
        Ok(name)
    }
}

/// Mock identifier for tests: returns a fixed name, or a scripted error.
pub struct MockFoodIdentifier {
    name: String,
    failures_before_success: std::sync::atomic::AtomicU32,
}

impl MockFoodIdentifier {
    /// Always identify the image as `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures_before_success: std::sync::atomic::AtomicU32::new(0),
        }
    }

    /// Fail with the rate-limit signal `n` times before succeeding.
    #[must_use]
    pub fn rate_limited_times(name: impl Into<String>, n: u32) -> Self {
        Self {
            name: name.into(),
            failures_before_success: std::sync::atomic::AtomicU32::new(n),
        }
    }
}

#[async_trait]
impl FoodIdentifier for MockFoodIdentifier {
    async fn identify(&self, _image_data_url: &str) -> Result<String, AppError> {
        use std::sync::atomic::Ordering;
        let remaining = self.failures_before_success.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_before_success
                .store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::external_rate_limited("Vision API", "HTTP 429"));
        }
        Ok(self.name.clone())
    }
}
