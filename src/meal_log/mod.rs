// ABOUTME: Meal log module organization
// ABOUTME: Pure totals aggregation, reducer-driven store, and pluggable persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The meal log: a reducer-driven state container over [`crate::models::MealLog`]
//! with derived daily totals and a persistence observer invoked after every
//! transition.

/// Durable storage adapters for the meal log
pub mod storage;

/// Action-driven state container
pub mod store;

/// Daily totals aggregation
pub mod totals;

pub use storage::{JsonFileStorage, MealLogStorage, MemoryStorage};
pub use store::{MealLogAction, MealLogStore};
pub use totals::daily_totals;
