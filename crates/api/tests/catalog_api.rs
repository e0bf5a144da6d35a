//! Integration tests for catalog reads and search in degraded mode.
//!
//! With no hosted database configured, direct reads must answer 503 with a
//! structured error body rather than invent data.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn catalog_reads_return_503_without_database() {
    for uri in [
        "/api/v1/ux/products",
        "/api/v1/ux/categories",
        "/api/v1/ux/faqs",
        "/api/v1/ux/testimonials",
        "/api/v1/ux/claims",
    ] {
        let app = common::build_test_app();
        let response = get(app, uri).await;

        assert_eq!(
            response.status(),
            StatusCode::SERVICE_UNAVAILABLE,
            "unexpected status for {uri}"
        );

        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_CONFIGURED", "unexpected body for {uri}");
    }
}

#[tokio::test]
async fn search_rejects_empty_query_before_touching_the_database() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/search?q=%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn search_without_database_returns_503() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/search?q=dental").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn search_requires_q_param() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/ux/search").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
