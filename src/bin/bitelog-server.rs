// ABOUTME: Server binary for the bitelog nutrition logging service
// ABOUTME: Loads configuration, initializes logging, wires providers, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # bitelog server binary
//!
//! Starts the HTTP API. Collaborator credentials come from the environment;
//! a missing key fails startup with a message naming the variable.

use anyhow::Result;
use bitelog::{
    config::ServerConfig,
    external::{EdamamClient, OpenAiVisionClient, VisionLabelsClient},
    logging,
    meal_log::{JsonFileStorage, MealLogStore},
    server::{self, ServerResources},
};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "bitelog-server")]
#[command(about = "bitelog - food-photo nutrition logging service")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting bitelog server");
    info!("{}", config.summary());

    let identifier = OpenAiVisionClient::from_config(&config.vision)?;
    let nutrition = EdamamClient::from_config(&config.nutrition)?;
    let labels = VisionLabelsClient::from_config(&config.labels)?;

    let storage = JsonFileStorage::new(config.meal_log_path.clone());
    let store = MealLogStore::open(Box::new(storage))?;
    info!(
        entries = store.meals().len(),
        "meal log store hydrated"
    );

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        Arc::new(config),
        Arc::new(identifier),
        Arc::new(nutrition),
        Arc::new(labels),
        store,
    ));

    server::serve(resources, port).await
}
