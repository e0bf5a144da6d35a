//! Route definitions for the UX service.
//!
//! Mounted at `/ux` in the API route tree.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::handlers::{catalog, generate, search};
use crate::state::AppState;

/// UX routes mounted at `/ux`.
///
/// ```text
/// GET  /generate-ui        -> generate_ui (dispatching pipeline)
/// POST /generate-ui        -> generate_ui_post (body-driven pipeline)
/// GET  /generate-ui-smart  -> generate_ui_smart (query-plan pipeline)
/// GET  /search             -> unified search
/// GET  /products           -> list_products
/// GET  /categories         -> list_categories
/// GET  /faqs               -> list_faqs
/// GET  /testimonials       -> list_testimonials
/// GET  /claims             -> list_claims
/// GET  /health             -> service-scoped health
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/generate-ui",
            get(generate::generate_ui).post(generate::generate_ui_post),
        )
        .route("/generate-ui-smart", get(generate::generate_ui_smart))
        .route("/search", get(search::search))
        .route("/products", get(catalog::list_products))
        .route("/categories", get(catalog::list_categories))
        .route("/faqs", get(catalog::list_faqs))
        .route("/testimonials", get(catalog::list_testimonials))
        .route("/claims", get(catalog::list_claims))
        .route("/health", get(service_health))
}

/// Service-scoped health payload, listing the mounted endpoints.
#[derive(Serialize)]
struct ServiceHealth {
    status: &'static str,
    database_connected: bool,
    ai_available: bool,
    endpoints: &'static [&'static str],
}

/// GET /api/v1/ux/health
async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "healthy",
        database_connected: state.db.is_some(),
        ai_available: state.llm.is_some(),
        endpoints: &[
            "/generate-ui",
            "/generate-ui-smart",
            "/search",
            "/products",
            "/categories",
            "/faqs",
            "/testimonials",
            "/claims",
        ],
    })
}
