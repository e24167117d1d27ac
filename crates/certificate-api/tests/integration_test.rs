//! Integration tests for the Certificate API

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt; // for `oneshot`

use certificate_api::{create_router, AppState};
use certmint_common::AccountId;
use certmint_issuer::IssuerConfig;
use certmint_ledger::{LedgerClient, MockLedgerNode};

const LEARNER: &str = "0.0.1001";

/// Helper: mock app plus the node handle and collection id, with a funded
/// (optionally associated) learner
async fn create_test_app(
    associate_learner: bool,
) -> (axum::Router, Arc<MockLedgerNode>, String) {
    let (state, node) = AppState::mock(IssuerConfig::mock()).await.unwrap();
    let token = state.config.collection_token.unwrap();

    let learner: AccountId = LEARNER.parse().unwrap();
    node.fund_account(learner, 1_000_000_000).await;
    if associate_learner {
        node.associate_token(learner, token).await.unwrap();
    }

    (create_router(state), node, token.to_string())
}

fn issue_body() -> serde_json::Value {
    json!({
        "course_id": "hedera-101",
        "course_name": "Hedera Fundamentals",
        "learner_name": "Amina Yusuf",
        "learner_account": LEARNER,
        "completion_date": "2025-01-10",
        "certificate_number": "WEB3V-2025-00042"
    })
}

async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let (app, _node, _token) = create_test_app(true).await;

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "certificate-api");
}

#[tokio::test]
async fn test_issue_certificate_happy_path() {
    let (app, _node, _token) = create_test_app(true).await;

    let (status, json) = post_json(&app, "/api/certificates", issue_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let cert = &json["certificate"];
    assert!(cert["serial"].as_u64().unwrap() >= 1);
    assert_eq!(cert["owner"], LEARNER);
    assert!(!cert["image_file_id"].as_str().unwrap().is_empty());
    assert!(!cert["metadata_file_id"].as_str().unwrap().is_empty());
    assert_ne!(cert["image_file_id"], cert["metadata_file_id"]);
    assert!(cert["explorer_url"]
        .as_str()
        .unwrap()
        .starts_with("https://hashscan.io/testnet/token/"));
}

#[tokio::test]
async fn test_issued_certificate_verifies() {
    let (app, _node, _token) = create_test_app(true).await;

    let (_, issued) = post_json(&app, "/api/certificates", issue_body()).await;
    let token_id = issued["certificate"]["token_id"].as_str().unwrap();
    let serial = issued["certificate"]["serial"].as_u64().unwrap();

    let uri = format!("/api/certificates/{token_id}/{serial}");
    let (status, first) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["valid"], true);
    assert_eq!(first["owner"], LEARNER);
    assert_eq!(first["certificate"]["course_name"], "Hedera Fundamentals");
    assert_eq!(first["certificate"]["learner_name"], "Amina Yusuf");
    assert_eq!(first["certificate"]["certificate_number"], "WEB3V-2025-00042");

    // Pure read path: a second call answers identically
    let (_, second) = get_json(&app, &uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_verify_never_minted_serial_returns_invalid_not_error() {
    let (app, _node, _token) = create_test_app(true).await;

    let (status, json) = get_json(&app, "/api/certificates/0.0.999999/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
    assert!(json["reason"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_verify_malformed_token_id_is_bad_request() {
    let (app, _node, _token) = create_test_app(true).await;

    let (status, json) = get_json(&app, "/api/certificates/not-a-token/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_entity_id");
}

#[tokio::test]
async fn test_unassociated_learner_gets_actionable_conflict() {
    let (app, node, token) = create_test_app(false).await;

    let (status, json) = post_json(&app, "/api/certificates", issue_body()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "association_required");

    // The mint went through; the token sits with the treasury until the
    // learner associates and an operator completes the transfer
    let treasury = node
        .collection_treasury(token.parse().unwrap())
        .await
        .unwrap()
        .to_string();
    let (status, json) = get_json(&app, &format!("/api/certificates/{token}/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);
    assert_eq!(json["owner"], treasury);
}

#[tokio::test]
async fn test_register_collection_returns_fresh_id() {
    let (app, _node, token) = create_test_app(true).await;

    let (status, json) = post_json(&app, "/api/collection", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    // A new, separate collection, distinct from the configured one
    assert_ne!(json["token_id"].as_str().unwrap(), token);
    assert!(json["transaction_id"].as_str().unwrap().contains('@'));
}
