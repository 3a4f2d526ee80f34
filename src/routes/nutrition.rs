// ABOUTME: Multi-component nutrition lookup route
// ABOUTME: Prices each component and reports totals, breakdown, and skipped components
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nutrition route.
//!
//! `POST /api/nutrition` prices a multi-component food (e.g. a burger as
//! bun + patty + cheese). Failed component lookups are omitted from the
//! total and breakdown but named in `skipped`.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::AppError;
use crate::external::lookup_components;
use crate::models::FoodComponent;
use crate::server::ServerResources;

/// Request body for `POST /api/nutrition`
#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    /// Components to price
    pub components: Vec<FoodComponent>,
}

/// Nutrition route handlers
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create the nutrition route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition", post(Self::price_components))
            .with_state(resources)
    }

    async fn price_components(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<NutritionRequest>,
    ) -> Result<Response, AppError> {
        if request.components.is_empty() {
            return Err(AppError::invalid_input("components must not be empty"));
        }

        let result = lookup_components(resources.nutrition.as_ref(), &request.components).await;
        Ok(Json(result).into_response())
    }
}
