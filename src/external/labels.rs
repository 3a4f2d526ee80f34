// ABOUTME: Image label detection client (annotate-style API)
// ABOUTME: Raw image bytes in, scored labels out
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Label detection provider
//!
//! Wraps an annotate-style label-detection API: the image bytes travel
//! base64-encoded inside the JSON request, and scored label annotations
//! come back. Consumed by the `/api/vision` route.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::LabelsConfig;
use crate::errors::AppError;

/// Environment variable for the API key
const API_KEY_ENV: &str = "VISION_API_KEY";

/// Default base URL of the annotate endpoint
const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Maximum labels requested per image
const MAX_RESULTS: u32 = 10;

/// One scored label for an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnnotation {
    /// Label text
    pub description: String,
    /// Confidence score in `[0, 1]`
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResult {
    #[serde(rename = "labelAnnotations", default)]
    label_annotations: Vec<LabelAnnotation>,
}

/// Detects scored labels for an image.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels for the given image bytes.
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<LabelAnnotation>, AppError>;
}

/// Annotate-style label detection client.
pub struct VisionLabelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl VisionLabelsClient {
    /// Create a client with an explicit key.
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Create a client from a loaded [`LabelsConfig`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the missing environment
    /// variable when no API key is present.
    pub fn from_config(config: &LabelsConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::config(format!("Missing {API_KEY_ENV} environment variable"))
        })?;
        Ok(Self::new(api_key, config.base_url.clone()))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `VISION_API_KEY` is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::config(format!("Missing {API_KEY_ENV} environment variable"))
        })?;
        let base_url =
            std::env::var("VISION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Ok(Self::new(api_key, base_url))
    }
}

#[async_trait]
impl LabelDetector for VisionLabelsClient {
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<LabelAnnotation>, AppError> {
        debug!(bytes = image.len(), "sending label detection request");

        let request = json!({
            "requests": [{
                "image": { "content": BASE64.encode(image) },
                "features": [{ "type": "LABEL_DETECTION", "maxResults": MAX_RESULTS }]
            }]
        });

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("Label API", format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                "Label API",
                format!("label detection failed (HTTP {status})"),
            ));
        }

        let annotate: AnnotateResponse = response.json().await.map_err(|e| {
            AppError::external_service("Label API", format!("Failed to parse response: {e}"))
        })?;

        Ok(annotate
            .responses
            .into_iter()
            .next()
            .unwrap_or_default()
            .label_annotations)
    }
}

/// Mock detector for tests: a fixed label list, or a scripted failure.
#[derive(Debug, Default)]
pub struct MockLabelClient {
    labels: Vec<LabelAnnotation>,
    fail: bool,
}

impl MockLabelClient {
    /// Always detect the given labels.
    #[must_use]
    pub fn new(labels: Vec<LabelAnnotation>) -> Self {
        Self {
            labels,
            fail: false,
        }
    }

    /// Always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            labels: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl LabelDetector for MockLabelClient {
    async fn detect_labels(&self, _image: &[u8]) -> Result<Vec<LabelAnnotation>, AppError> {
        if self.fail {
            return Err(AppError::external_service("Label API", "mock failure"));
        }
        Ok(self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_annotate_response_parses_labels() {
        let raw = r#"{
            "responses": [{
                "labelAnnotations": [
                    {"description": "Banana", "score": 0.98},
                    {"description": "Fruit", "score": 0.95}
                ]
            }]
        }"#;
        let parsed: AnnotateResponse = serde_json::from_str(raw).unwrap();
        let labels = &parsed.responses[0].label_annotations;
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].description, "Banana");
    }

    #[test]
    fn test_empty_annotate_response_is_no_labels() {
        let parsed: AnnotateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.responses.is_empty());
    }
}
