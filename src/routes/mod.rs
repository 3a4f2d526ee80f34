// ABOUTME: Route module organization for the bitelog HTTP surface
// ABOUTME: One module per domain with thin handlers delegating to providers and the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route modules for the HTTP API.
//!
//! Each module owns its request/response types and exposes a
//! `routes(resources)` constructor returning a ready-to-merge router.

/// `POST /api/analyze` - identify a food photo and price it
pub mod analyze;

/// Health check and readiness routes
pub mod health;

/// Meal log CRUD routes
pub mod meal_log;

/// `POST /api/nutrition` - multi-component nutrition lookup
pub mod nutrition;

/// `POST /api/vision` - raw label detection
pub mod vision;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, AnalyzeRoutes};
pub use health::HealthRoutes;
pub use meal_log::{AddFoodRequest, MealLogResponse, MealLogRoutes};
pub use nutrition::{NutritionRequest, NutritionRoutes};
pub use vision::{VisionRequest, VisionRoutes};
