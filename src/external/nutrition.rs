// ABOUTME: Nutrition lookup client and response normalization
// ABOUTME: Maps the Edamam-shaped nested response onto the fixed four-field nutrition record
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Nutrition lookup and normalization
//!
//! One request per ingredient query, keyed by free text with an optional
//! quantity qualifier. The external response nests the interesting numbers
//! under optionally-absent fields; [`normalize`] flattens that into a
//! [`NutritionInfo`] with every missing value defaulting to 0 and every
//! present value rounded to the nearest whole unit.
//!
//! [`lookup_components`] prices a multi-part food component by component.
//! A failed component is excluded from both the total and the breakdown but
//! named in the result's `skipped` list, so callers can tell a complete
//! total from a partial one.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::NutritionConfig;
use crate::errors::AppError;
use crate::models::{ComponentNutrition, FoodComponent, NutritionInfo};

/// Environment variables for the credential pair
const APP_ID_ENV: &str = "EDAMAM_APP_ID";
const APP_KEY_ENV: &str = "EDAMAM_APP_KEY";

/// Default base URL of the nutrition-data endpoint
const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/nutrition-data";

// ============================================================================
// API Response Types
// ============================================================================

/// Nutrition-data response. Every field may be absent; absence means 0.
#[derive(Debug, Default, Deserialize)]
pub struct NutritionDataResponse {
    /// Total energy in kcal
    #[serde(default)]
    pub calories: Option<f64>,
    /// Nested per-nutrient quantities
    #[serde(rename = "totalNutrients", default)]
    pub total_nutrients: Option<TotalNutrients>,
}

/// The nutrients this service cares about, by their API field names.
#[derive(Debug, Default, Deserialize)]
pub struct TotalNutrients {
    /// Protein
    #[serde(rename = "PROCNT", default)]
    pub procnt: Option<NutrientQuantity>,
    /// Carbohydrates
    #[serde(rename = "CHOCDF", default)]
    pub chocdf: Option<NutrientQuantity>,
    /// Fat
    #[serde(rename = "FAT", default)]
    pub fat: Option<NutrientQuantity>,
}

/// A single nutrient quantity
#[derive(Debug, Default, Deserialize)]
pub struct NutrientQuantity {
    /// Amount in the nutrient's unit (grams here)
    #[serde(default)]
    pub quantity: Option<f64>,
}

/// Round to the nearest whole unit, clamping negatives to 0.
fn round_non_negative(value: Option<f64>) -> u32 {
    value.unwrap_or(0.0).max(0.0).round() as u32
}

/// Flatten the nested response into the fixed four-field record.
#[must_use]
pub fn normalize(response: &NutritionDataResponse) -> NutritionInfo {
    let nutrients = response.total_nutrients.as_ref();
    NutritionInfo {
        calories: round_non_negative(response.calories),
        protein: round_non_negative(
            nutrients.and_then(|n| n.procnt.as_ref()).and_then(|q| q.quantity),
        ),
        carbs: round_non_negative(
            nutrients.and_then(|n| n.chocdf.as_ref()).and_then(|q| q.quantity),
        ),
        fats: round_non_negative(
            nutrients.and_then(|n| n.fat.as_ref()).and_then(|q| q.quantity),
        ),
    }
}

// ============================================================================
// Trait and implementations
// ============================================================================

/// Prices one ingredient query as a normalized nutrition record.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Look up nutrition facts for `food`, optionally qualified by a
    /// quantity (defaulting to "1").
    async fn lookup(&self, food: &str, quantity: Option<&str>) -> Result<NutritionInfo, AppError>;
}

/// Edamam-shaped nutrition-data client.
pub struct EdamamClient {
    client: Client,
    app_id: String,
    app_key: String,
    base_url: String,
}

impl EdamamClient {
    /// Create a client with explicit credentials.
    #[must_use]
    pub fn new(app_id: String, app_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            app_id,
            app_key,
            base_url,
        }
    }

    /// Create a client from a loaded [`NutritionConfig`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the missing environment
    /// variable when either half of the credential pair is absent.
    pub fn from_config(config: &NutritionConfig) -> Result<Self, AppError> {
        let app_id = config
            .app_id
            .clone()
            .ok_or_else(|| AppError::config(format!("Missing {APP_ID_ENV} environment variable")))?;
        let app_key = config.app_key.clone().ok_or_else(|| {
            AppError::config(format!("Missing {APP_KEY_ENV} environment variable"))
        })?;
        Ok(Self::new(app_id, app_key, config.base_url.clone()))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `EDAMAM_APP_ID` or
    /// `EDAMAM_APP_KEY` is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let app_id = std::env::var(APP_ID_ENV)
            .map_err(|_| AppError::config(format!("Missing {APP_ID_ENV} environment variable")))?;
        let app_key = std::env::var(APP_KEY_ENV)
            .map_err(|_| AppError::config(format!("Missing {APP_KEY_ENV} environment variable")))?;
        let base_url =
            std::env::var("EDAMAM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Ok(Self::new(app_id, app_key, base_url))
    }
}

#[async_trait]
impl NutritionLookup for EdamamClient {
    async fn lookup(&self, food: &str, quantity: Option<&str>) -> Result<NutritionInfo, AppError> {
        let ingredient = format!("{} {food}", quantity.unwrap_or("1"));
        debug!(%ingredient, "fetching nutrition data");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("ingr", ingredient.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("Nutrition API", format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(AppError::external_rate_limited(
                    "Nutrition API",
                    format!("rate limited while pricing {food}"),
                ));
            }
            return Err(AppError::external_service(
                "Nutrition API",
                format!("failed to fetch nutrition data for {food} (HTTP {status})"),
            ));
        }

        let data: NutritionDataResponse = response.json().await.map_err(|e| {
            AppError::external_service("Nutrition API", format!("Failed to parse response: {e}"))
        })?;

        Ok(normalize(&data))
    }
}

/// Price a multi-component food, one lookup per component.
///
/// Component failures are logged and skipped; the names of skipped
/// components are reported in the result.
pub async fn lookup_components(
    client: &dyn NutritionLookup,
    components: &[FoodComponent],
) -> ComponentNutrition {
    let mut result = ComponentNutrition::default();

    for component in components {
        match client
            .lookup(&component.name, component.quantity.as_deref())
            .await
        {
            Ok(nutrition) => {
                result.total = result.total.add(nutrition);
                result
                    .by_component
                    .insert(component.name.clone(), nutrition);
            }
            Err(err) => {
                warn!(component = %component.name, error = %err, "component lookup failed, omitting");
                result.skipped.push(component.name.clone());
            }
        }
    }

    result
}

/// Mock nutrition client for tests: a fixed table of known foods; anything
/// absent from the table fails as an external-service error.
#[derive(Debug, Default)]
pub struct MockNutritionClient {
    foods: HashMap<String, NutritionInfo>,
}

impl MockNutritionClient {
    /// Create an empty mock (every lookup fails).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a known food.
    #[must_use]
    pub fn with_food(mut self, name: impl Into<String>, nutrition: NutritionInfo) -> Self {
        self.foods.insert(name.into(), nutrition);
        self
    }
}

#[async_trait]
impl NutritionLookup for MockNutritionClient {
    async fn lookup(&self, food: &str, _quantity: Option<&str>) -> Result<NutritionInfo, AppError> {
        self.foods.get(food).copied().ok_or_else(|| {
            AppError::external_service(
                "Nutrition API",
                format!("failed to fetch nutrition data for {food} (HTTP 404)"),
            )
        })
    }
}
