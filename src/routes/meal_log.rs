// ABOUTME: Meal log CRUD routes
// ABOUTME: Read the log, append a food to a slot, remove a food by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meal log routes.
//!
//! The server-side face of the meal log store: read the grouped log and its
//! daily totals, append an entry to a slot, remove an entry by id. Removal
//! of an unknown id is an idempotent no-op returning the unchanged log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::meal_log::MealLogAction;
use crate::models::{FoodItem, MealLog, MealSlot, NutritionInfo};
use crate::server::ServerResources;

/// Request body for `POST /api/log/:slot`
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    /// Food name
    pub name: String,
    /// Nutrition facts for the entry
    pub nutrition: NutritionInfo,
    /// Optional reference to the source image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response body carrying the current log and its derived totals
#[derive(Debug, Serialize, Deserialize)]
pub struct MealLogResponse {
    /// The grouped meal log
    pub meals: MealLog,
    /// Field-wise totals across all slots
    pub daily_totals: NutritionInfo,
}

/// Meal log route handlers
pub struct MealLogRoutes;

impl MealLogRoutes {
    /// Create all meal log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/log", get(Self::get_log))
            .route("/api/log/:slot", post(Self::add_food))
            .route("/api/log/:slot/:id", delete(Self::remove_food))
            .with_state(resources)
    }

    async fn get_log(State(resources): State<Arc<ServerResources>>) -> Response {
        let store = resources.store.lock().await;
        let response = MealLogResponse {
            meals: store.meals().clone(),
            daily_totals: store.totals(),
        };
        Json(response).into_response()
    }

    async fn add_food(
        State(resources): State<Arc<ServerResources>>,
        Path(slot): Path<MealSlot>,
        Json(request): Json<AddFoodRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("food name must not be empty"));
        }

        let food = FoodItem::new(request.name, request.nutrition, request.image_url);

        let mut store = resources.store.lock().await;
        store.dispatch(&MealLogAction::AddFood {
            slot,
            food: food.clone(),
        })?;

        Ok((StatusCode::CREATED, Json(food)).into_response())
    }

    async fn remove_food(
        State(resources): State<Arc<ServerResources>>,
        Path((slot, food_id)): Path<(MealSlot, Uuid)>,
    ) -> Result<Response, AppError> {
        let mut store = resources.store.lock().await;
        store.dispatch(&MealLogAction::RemoveFood { slot, food_id })?;

        let response = MealLogResponse {
            meals: store.meals().clone(),
            daily_totals: store.totals(),
        };
        Ok(Json(response).into_response())
    }
}
