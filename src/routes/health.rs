// ABOUTME: Liveness and readiness routes
// ABOUTME: Readiness inspects collaborator credentials and the meal log store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health routes.
//!
//! `/health` is pure liveness. `/ready` reports whether the service can
//! actually do its job: each external collaborator has credentials and the
//! meal log store is reachable. A server missing a credential still runs,
//! so readiness answers 503 with the per-component breakdown rather than
//! refusing to start.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::server::ServerResources;

/// Health route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the liveness and readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(resources)
    }

    async fn health() -> Response {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
        .into_response()
    }

    async fn ready(State(resources): State<Arc<ServerResources>>) -> Response {
        let config = &resources.config;
        let vision_ok = config.vision.api_key.is_some();
        let nutrition_ok = config.nutrition.app_id.is_some() && config.nutrition.app_key.is_some();
        let labels_ok = config.labels.api_key.is_some();

        // Hydration happened at startup; reachability here is the lock
        let entries = resources.store.lock().await.meals().len();

        let ready = vision_ok && nutrition_ok && labels_ok;
        let status = if ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        let body = json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "vision": check(vision_ok),
                "nutrition": check(nutrition_ok),
                "labels": check(labels_ok),
                "meal_log": { "status": "ok", "entries": entries }
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        (status, Json(body)).into_response()
    }
}

fn check(configured: bool) -> serde_json::Value {
    json!({ "status": if configured { "configured" } else { "missing_credentials" } })
}
