// ABOUTME: Integration tests for the meal log routes
// ABOUTME: Validates add/remove flows, idempotent removal, and totals recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use bitelog::config::{LabelsConfig, NutritionConfig, ServerConfig, VisionConfig};
use bitelog::external::{MockFoodIdentifier, MockLabelClient, MockNutritionClient};
use bitelog::meal_log::{MealLogStore, MemoryStorage};
use bitelog::retry::RetryConfig;
use bitelog::server::{router, ServerResources};

fn test_router() -> axum::Router {
    let config = ServerConfig {
        http_port: 0,
        vision: VisionConfig {
            api_key: None,
            base_url: String::new(),
            model: "test".into(),
        },
        nutrition: NutritionConfig {
            app_id: None,
            app_key: None,
            base_url: String::new(),
        },
        labels: LabelsConfig {
            api_key: None,
            base_url: String::new(),
        },
        retry: RetryConfig::default(),
        meal_log_path: PathBuf::new(),
    };
    let store = MealLogStore::open(Box::new(MemoryStorage::new())).unwrap();
    let resources = Arc::new(ServerResources::new(
        Arc::new(config),
        Arc::new(MockFoodIdentifier::new("banana")),
        Arc::new(MockNutritionClient::new()),
        Arc::new(MockLabelClient::default()),
        store,
    ));
    router(resources)
}

async fn call(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = if let Some(json) = body {
        builder = builder.header("content-type", "application/json");
        Body::from(json.to_string())
    } else {
        Body::empty()
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn banana_body() -> serde_json::Value {
    serde_json::json!({
        "name": "banana",
        "nutrition": { "calories": 105, "protein": 1, "carbs": 27, "fats": 0 }
    })
}

#[tokio::test]
async fn test_empty_log_has_all_slots_and_zero_totals() {
    let app = test_router();
    let (status, body) = call(app, "GET", "/api/log", None).await;

    assert_eq!(status, StatusCode::OK);
    for slot in ["breakfast", "lunch", "dinner", "snacks"] {
        assert!(body["meals"][slot].is_array(), "missing slot {slot}");
    }
    assert_eq!(body["daily_totals"]["calories"], 0);
}

#[tokio::test]
async fn test_add_food_appears_in_log_with_totals() {
    let app = test_router();

    let (status, created) = call(app.clone(), "POST", "/api/log/lunch", Some(banana_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "banana");
    assert!(created["id"].is_string());
    assert!(created["timestamp"].is_string());

    let (_, log) = call(app, "GET", "/api/log", None).await;
    assert_eq!(log["meals"]["lunch"].as_array().unwrap().len(), 1);
    assert!(log["meals"]["breakfast"].as_array().unwrap().is_empty());
    assert_eq!(log["daily_totals"]["calories"], 105);
    assert_eq!(log["daily_totals"]["carbs"], 27);
}

#[tokio::test]
async fn test_add_then_remove_round_trips() {
    let app = test_router();

    let (_, created) = call(app.clone(), "POST", "/api/log/dinner", Some(banana_body())).await;
    let id = created["id"].as_str().unwrap().to_owned();

    let (status, log) = call(app, "DELETE", &format!("/api/log/dinner/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(log["meals"]["dinner"].as_array().unwrap().is_empty());
    assert_eq!(log["daily_totals"]["calories"], 0);
}

#[tokio::test]
async fn test_remove_unknown_id_is_idempotent_no_op() {
    let app = test_router();

    call(app.clone(), "POST", "/api/log/snacks", Some(banana_body())).await;

    let unknown = Uuid::new_v4();
    let (status, log) = call(
        app,
        "DELETE",
        &format!("/api/log/snacks/{unknown}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["meals"]["snacks"].as_array().unwrap().len(), 1);
    assert_eq!(log["daily_totals"]["calories"], 105);
}

#[tokio::test]
async fn test_add_rejects_empty_name() {
    let app = test_router();
    let (status, body) = call(
        app,
        "POST",
        "/api/log/breakfast",
        Some(serde_json::json!({
            "name": "  ",
            "nutrition": { "calories": 1, "protein": 0, "carbs": 0, "fats": 0 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_unknown_slot_is_rejected() {
    let app = test_router();
    let (status, _) = call(app, "POST", "/api/log/elevenses", Some(banana_body())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
