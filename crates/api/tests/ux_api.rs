//! Integration tests for the UI generation endpoints in degraded mode.
//!
//! With no LLM and no database configured, generation must still answer
//! with the static fallback components and `ai_generated: false`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};

// ---------------------------------------------------------------------------
// GET /generate-ui
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_ui_home_serves_fallback() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/generate-ui?page_type=home").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ai_generated"], false);

    let components = json["components"].as_array().unwrap();
    assert!(!components.is_empty());
    assert_eq!(components[0]["id"], "hero");
    // Renderer invariants: inline content, no images.
    let content = components[0]["content"].as_str().unwrap();
    assert!(!content.contains("<img"));
}

#[tokio::test]
async fn generate_ui_includes_layout_and_accessibility() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/generate-ui?page_type=home").await;
    let json = body_json(response).await;

    assert_eq!(json["layout"]["layout_type"], "stack");
    assert_eq!(json["layout"]["component_order"][0], "hero");
    assert_eq!(json["accessibility"]["large_text"], false);
    assert!(json["generated_at"].is_string());
}

#[tokio::test]
async fn generate_ui_large_text_request_sets_accessibility() {
    let app = common::build_test_app();
    let response = get(
        app,
        "/api/v1/ux/generate-ui?page_type=products&user_query=large%20text%20please",
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["accessibility"]["large_text"], true);
}

#[tokio::test]
async fn generate_ui_rejects_unknown_page_type() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/generate-ui?page_type=checkout").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_PAGE");
}

#[tokio::test]
async fn generate_ui_search_with_query_degrades_to_fallback() {
    let app = common::build_test_app();
    let response = get(
        app,
        "/api/v1/ux/generate-ui?page_type=search&user_query=dental%20for%20kids",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ai_generated"], false);
    assert_eq!(json["components"][0]["id"], "search_notice");
}

// ---------------------------------------------------------------------------
// POST /generate-ui
// ---------------------------------------------------------------------------

#[tokio::test]
async fn post_generate_ui_serves_fallback() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/ux/generate-ui",
        serde_json::json!({
            "page_type": "faq",
            "custom_requirements": "keep it short"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ai_generated"], false);
    assert_eq!(json["components"][0]["id"], "faq_notice");
}

#[tokio::test]
async fn post_generate_ui_rejects_bad_product_id() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/ux/generate-ui",
        serde_json::json!({
            "page_type": "product_detail",
            "product_id": "not-a-uuid"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn post_generate_ui_rejects_oversized_requirements() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/ux/generate-ui",
        serde_json::json!({
            "page_type": "home",
            "custom_requirements": "x".repeat(501)
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// GET /generate-ui-smart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn smart_ui_degrades_to_fallback_without_collaborators() {
    let app = common::build_test_app();
    let response = get(
        app,
        "/api/v1/ux/generate-ui-smart?query=cheap%20dental%20insurance",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ai_generated"], false);
    assert_eq!(json["components"][0]["id"], "search_notice");
}

#[tokio::test]
async fn smart_ui_rejects_empty_query() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/generate-ui-smart?query=%20%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn smart_ui_requires_query_param() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/generate-ui-smart").await;

    // Missing required query parameter is rejected by the extractor.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
