//! Handler for unified search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use autoux_core::scoring::{clamp_limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};

use crate::engine::search::{unified_search, SearchScope};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default = "default_true")]
    pub include_products: bool,
    #[serde(default = "default_true")]
    pub include_faqs: bool,
    #[serde(default = "default_true")]
    pub include_testimonials: bool,
}

/// GET /api/v1/ux/search
///
/// Relevance-scored search across products, FAQs, and verified
/// testimonials. `limit` applies per result kind.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("search query must not be empty".into()));
    }

    let db = state
        .db
        .as_deref()
        .ok_or(AppError::Unavailable("hosted database is not configured"))?;

    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
    let scope = SearchScope {
        products: params.include_products,
        faqs: params.include_faqs,
        testimonials: params.include_testimonials,
    };

    let results = unified_search(db, query, limit, scope).await?;

    Ok(Json(DataResponse { data: results }))
}
