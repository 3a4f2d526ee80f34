// ABOUTME: Environment-variable backed server configuration
// ABOUTME: Collaborator credentials, retry tuning, storage path, and a secrets-free summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server configuration loaded from environment variables.
//!
//! Credentials for the external collaborators are optional at load time so
//! the config can always be constructed and summarized; the provider
//! constructors are where a missing key becomes a hard, clearly-worded
//! error. Base URLs are overridable, which is how tests point clients at
//! local fixtures.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::retry::RetryConfig;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default path of the persisted meal log
const DEFAULT_MEAL_LOG_PATH: &str = "data/meals.json";

/// Vision/LLM collaborator configuration (chat-style food identification)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// API key (`OPENAI_API_KEY`)
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier
    pub model: String,
}

/// Nutrition-lookup collaborator configuration (Edamam-shaped API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Application id (`EDAMAM_APP_ID`)
    pub app_id: Option<String>,
    /// Application key (`EDAMAM_APP_KEY`)
    pub app_key: Option<String>,
    /// Base URL of the nutrition-data endpoint
    pub base_url: String,
}

/// Label-detection collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// API key (`VISION_API_KEY`)
    pub api_key: Option<String>,
    /// Base URL of the annotate endpoint
    pub base_url: String,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Vision/LLM collaborator settings
    pub vision: VisionConfig,
    /// Nutrition-lookup collaborator settings
    pub nutrition: NutritionConfig,
    /// Label-detection collaborator settings
    pub labels: LabelsConfig,
    /// Retry tuning for the identification call
    #[serde(skip)]
    pub retry: RetryConfig,
    /// Path of the persisted meal log
    pub meal_log_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a present variable fails to parse (e.g. a
    /// non-numeric `HTTP_PORT`). Absent variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            vision: VisionConfig {
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_var_or("OPENAI_MODEL", "gpt-4o-mini"),
            },
            nutrition: NutritionConfig {
                app_id: env::var("EDAMAM_APP_ID").ok(),
                app_key: env::var("EDAMAM_APP_KEY").ok(),
                base_url: env_var_or(
                    "EDAMAM_BASE_URL",
                    "https://api.edamam.com/api/nutrition-data",
                ),
            },
            labels: LabelsConfig {
                api_key: env::var("VISION_API_KEY").ok(),
                base_url: env_var_or(
                    "VISION_BASE_URL",
                    "https://vision.googleapis.com/v1/images:annotate",
                ),
            },
            retry: RetryConfig {
                max_attempts: env_var_or("ANALYZE_MAX_RETRIES", "3")
                    .parse()
                    .context("Invalid ANALYZE_MAX_RETRIES value")?,
                initial_backoff_ms: env_var_or("ANALYZE_BACKOFF_MS", "1000")
                    .parse()
                    .context("Invalid ANALYZE_BACKOFF_MS value")?,
            },
            meal_log_path: PathBuf::from(env_var_or("MEAL_LOG_PATH", DEFAULT_MEAL_LOG_PATH)),
        };

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "bitelog configuration:\n\
             - HTTP Port: {}\n\
             - Vision/LLM: {} (model {})\n\
             - Nutrition lookup: {}\n\
             - Label detection: {}\n\
             - Analyze retries: {} (backoff {}ms)\n\
             - Meal log: {}",
            self.http_port,
            enabled(self.vision.api_key.is_some()),
            self.vision.model,
            enabled(self.nutrition.app_id.is_some() && self.nutrition.app_key.is_some()),
            enabled(self.labels.api_key.is_some()),
            self.retry.max_attempts,
            self.retry.initial_backoff_ms,
            self.meal_log_path.display(),
        )
    }
}

fn enabled(on: bool) -> &'static str {
    if on {
        "Configured"
    } else {
        "Missing credentials"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
