// ABOUTME: Integration tests for the vision route
// ABOUTME: Validates label detection responses and the fixed failure shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use bitelog::config::{LabelsConfig, NutritionConfig, ServerConfig, VisionConfig};
use bitelog::external::{
    LabelAnnotation, LabelDetector, MockFoodIdentifier, MockLabelClient, MockNutritionClient,
};
use bitelog::meal_log::{MealLogStore, MemoryStorage};
use bitelog::retry::RetryConfig;
use bitelog::server::{router, ServerResources};

fn test_router(labels: MockLabelClient) -> axum::Router {
    let labels: Arc<dyn LabelDetector> = Arc::new(labels);
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
        labels,
        store,
    ));
    router(resources)
}

async fn post_vision(app: axum::Router, image: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/vision")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "image": image }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_vision_returns_labels_for_data_url() {
    let app = test_router(MockLabelClient::new(vec![
        LabelAnnotation {
            description: "Banana".into(),
            score: 0.98,
        },
        LabelAnnotation {
            description: "Fruit".into(),
            score: 0.95,
        },
    ]));

    let (status, body) = post_vision(app, "data:image/png;base64,aGVsbG8=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["labels"][0]["description"], "Banana");
    assert_eq!(body["labels"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_vision_accepts_bare_base64() {
    let app = test_router(MockLabelClient::new(vec![]));
    let (status, body) = post_vision(app, "aGVsbG8=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_vision_detector_failure_is_fixed_500_shape() {
    let app = test_router(MockLabelClient::failing());
    let (status, body) = post_vision(app, "data:image/png;base64,aGVsbG8=").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to analyze image");
}

#[tokio::test]
async fn test_vision_invalid_base64_is_500() {
    let app = test_router(MockLabelClient::new(vec![]));
    let (status, body) = post_vision(app, "data:image/png;base64,!!!not-base64!!!").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}
