// ABOUTME: Raw label detection route
// ABOUTME: Strips the data-URL prefix, decodes the image, and forwards it to label detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vision route.
//!
//! `POST /api/vision` forwards the decoded image to the label-detection
//! collaborator and returns `{success: true, labels}`. Every failure maps to
//! `500 {success: false, error}` with a fixed client-facing message; the
//! real cause goes to the log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::errors::AppError;
use crate::external::LabelAnnotation;
use crate::server::ServerResources;

/// Client-facing message for any label-detection failure
const DETECTION_FAILED_MESSAGE: &str = "Failed to analyze image";

/// Request body for `POST /api/vision`
#[derive(Debug, Deserialize)]
pub struct VisionRequest {
    /// Base64 data-URL (or bare base64) of the image
    pub image: String,
}

/// Vision route handlers
pub struct VisionRoutes;

impl VisionRoutes {
    /// Create the vision route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/vision", post(Self::detect))
            .with_state(resources)
    }

    async fn detect(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<VisionRequest>,
    ) -> Response {
        match Self::run_detection(&resources, &request.image).await {
            Ok(labels) => Json(json!({ "success": true, "labels": labels })).into_response(),
            Err(err) => {
                error!(error = %err, "label detection failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": DETECTION_FAILED_MESSAGE })),
                )
                    .into_response()
            }
        }
    }

    async fn run_detection(
        resources: &ServerResources,
        image: &str,
    ) -> Result<Vec<LabelAnnotation>, AppError> {
        // Drop the data:image/...;base64, prefix when present
        let content = image
            .split_once("base64,")
            .map_or(image, |(_, rest)| rest);

        let bytes = BASE64.decode(content).map_err(|e| {
            AppError::invalid_input(format!("image is not valid base64: {e}"))
        })?;

        resources.labels.detect_labels(&bytes).await
    }
}
