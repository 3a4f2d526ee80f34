// ABOUTME: Main library entry point for the bitelog nutrition logging service
// ABOUTME: Wires external vision/nutrition collaborators, the meal log store, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # bitelog
//!
//! A food-photo nutrition-logging service. A client posts a food image as a
//! base64 data-URL; the service identifies the food through a chat-style
//! vision/LLM API, prices it through a nutrition-lookup API, and records the
//! result into a meal log (breakfast/lunch/dinner/snacks) persisted to a
//! local JSON store.
//!
//! All recognition and nutrition intelligence is delegated to external
//! collaborators behind the traits in [`external`]; this crate is the
//! validation, retry, normalization, and state-keeping around them.
//!
//! ## Architecture
//!
//! - **`external`**: provider clients (food identification, nutrition
//!   lookup, label detection) plus mock implementations for tests
//! - **`retry`**: bounded linear-backoff retry on rate-limit errors
//! - **`models`**: domain types (`NutritionInfo`, `FoodItem`, `MealLog`)
//! - **`meal_log`**: reducer-driven store with pluggable persistence
//! - **`routes`** / **`server`**: axum HTTP surface and shared state

/// Configuration loaded from environment variables
pub mod config;

/// Unified error type and HTTP response mapping
pub mod errors;

/// External collaborator clients (vision/LLM, nutrition, label detection)
pub mod external;

/// Structured logging setup
pub mod logging;

/// Meal log store, persistence, and totals aggregation
pub mod meal_log;

/// Domain data types
pub mod models;

/// Retry wrapper for rate-limited external calls
pub mod retry;

/// HTTP route handlers
pub mod routes;

/// Shared server state and router assembly
pub mod server;
