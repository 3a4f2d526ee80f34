// ABOUTME: External collaborator clients consumed by the service
// ABOUTME: Food identification, nutrition lookup, and image label detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clients for the external SaaS collaborators.
//!
//! Nothing here is reimplemented intelligence: each module wraps one remote
//! API behind a trait so route handlers and tests can swap in the mock
//! implementations that live alongside each client.

/// Image label detection (annotate-style API)
pub mod labels;

/// Nutrition lookup and normalization (Edamam-shaped API)
pub mod nutrition;

/// Food identification via a chat-style vision/LLM API
pub mod vision;

pub use labels::{LabelAnnotation, LabelDetector, MockLabelClient, VisionLabelsClient};
pub use nutrition::{
    lookup_components, EdamamClient, MockNutritionClient, NutritionLookup,
};
pub use vision::{FoodIdentifier, MockFoodIdentifier, OpenAiVisionClient};
