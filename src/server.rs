// ABOUTME: Shared server state and router assembly
// ABOUTME: Wires providers, the meal log store, and route modules into one axum app
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server state and router assembly.
//!
//! [`ServerResources`] is the single shared-state value behind every
//! handler: provider clients behind their traits (so tests swap in mocks),
//! the retry-tuned configuration, and the meal log store behind an async
//! mutex. Store dispatches serialize on that lock, so concurrent mutations
//! apply last-wins without any further coordination.

use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::external::{FoodIdentifier, LabelDetector, NutritionLookup};
use crate::meal_log::MealLogStore;
use crate::routes::{AnalyzeRoutes, HealthRoutes, MealLogRoutes, NutritionRoutes, VisionRoutes};

/// Request body cap: images arrive inline as base64 data-URLs
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared state for all route handlers.
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Food identification collaborator
    pub identifier: Arc<dyn FoodIdentifier>,
    /// Nutrition lookup collaborator
    pub nutrition: Arc<dyn NutritionLookup>,
    /// Label detection collaborator
    pub labels: Arc<dyn LabelDetector>,
    /// The meal log store; dispatches serialize on this lock
    pub store: Mutex<MealLogStore>,
}

impl ServerResources {
    /// Assemble server resources.
    pub fn new(
        config: Arc<ServerConfig>,
        identifier: Arc<dyn FoodIdentifier>,
        nutrition: Arc<dyn NutritionLookup>,
        labels: Arc<dyn LabelDetector>,
        store: MealLogStore,
    ) -> Self {
        Self {
            config,
            identifier,
            nutrition,
            labels,
            store: Mutex::new(store),
        }
    }
}

/// Build the full application router.
pub fn router(resources: Arc<ServerResources>) -> axum::Router {
    axum::Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AnalyzeRoutes::routes(resources.clone()))
        .merge(VisionRoutes::routes(resources.clone()))
        .merge(NutritionRoutes::routes(resources.clone()))
        .merge(MealLogRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve the application until the task is cancelled.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(resources: Arc<ServerResources>, port: u16) -> anyhow::Result<()> {
    let app = router(resources);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
