// ABOUTME: Food photo analysis route
// ABOUTME: Validates the data-URL, identifies the food with retry, and prices it
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analyze route: the main flow of the service.
//!
//! `POST /api/analyze` takes a base64 data-URL, identifies the food through
//! the vision/LLM collaborator (retrying on its rate-limit signal), looks up
//! nutrition facts for the identified name, and returns both. Any upstream
//! failure surfaces as `500 {error, details?}`; a malformed image field is
//! `400` before anything is called.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::errors::AppError;
use crate::models::NutritionInfo;
use crate::retry::call_with_retry;
use crate::server::ServerResources;

/// Required prefix of a valid image payload
const DATA_URL_PREFIX: &str = "data:image";

/// Rejection message for a missing or malformed image field
const INVALID_IMAGE_MESSAGE: &str = "No valid base64-encoded image provided";

/// Request body for `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 data-URL of the food photo
    pub image: String,
}

/// Response body for `POST /api/analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Identified food name
    pub name: String,
    /// Normalized nutrition facts for the identified food
    pub nutrition: NutritionInfo,
    /// Identification confidence
    pub confidence: f64,
}

/// Analyze route handlers
pub struct AnalyzeRoutes;

impl AnalyzeRoutes {
    /// Create the analyze route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/analyze", post(Self::analyze))
            .with_state(resources)
    }

    async fn analyze(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AnalyzeRequest>,
    ) -> Result<Response, AppError> {
        if !request.image.starts_with(DATA_URL_PREFIX) {
            return Err(AppError::invalid_input(INVALID_IMAGE_MESSAGE));
        }

        let name = call_with_retry(&resources.config.retry, || {
            resources.identifier.identify(&request.image)
        })
        .await?;
        info!(food = %name, "food identified");

        let nutrition = resources.nutrition.lookup(&name, None).await?;

        let response = AnalyzeResponse {
            name,
            nutrition,
            confidence: 1.0,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
