// ABOUTME: Configuration module organization
// ABOUTME: Environment-variable driven configuration, no config files beyond .env
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management. Environment-only: everything comes from
//! process environment variables, optionally seeded from a `.env` file.

/// Environment-variable backed server configuration
pub mod environment;

pub use environment::{
    LabelsConfig, NutritionConfig, ServerConfig, VisionConfig,
};
