//! Pass-through read handlers over the hosted catalog.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use autoux_core::scoring::{clamp_limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use autoux_db::catalog;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn require_db(state: &AppState) -> AppResult<&autoux_db::PostgrestClient> {
    state
        .db
        .as_deref()
        .ok_or(AppError::Unavailable("hosted database is not configured"))
}

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/v1/ux/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let db = require_db(&state)?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let products = catalog::products(db, params.category.as_deref(), limit).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/ux/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let db = require_db(&state)?;
    let categories = catalog::categories(db).await?;
    Ok(Json(DataResponse { data: categories }))
}

#[derive(Debug, Deserialize)]
pub struct FaqListParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/v1/ux/faqs
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(params): Query<FaqListParams>,
) -> AppResult<impl IntoResponse> {
    let db = require_db(&state)?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let faqs = catalog::faqs(db, params.category.as_deref(), limit).await?;
    Ok(Json(DataResponse { data: faqs }))
}

#[derive(Debug, Deserialize)]
pub struct TestimonialListParams {
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/v1/ux/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(params): Query<TestimonialListParams>,
) -> AppResult<impl IntoResponse> {
    let db = require_db(&state)?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let testimonials = catalog::testimonials(db, params.product_id, true, limit).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

#[derive(Debug, Deserialize)]
pub struct ClaimListParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/v1/ux/claims
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<ClaimListParams>,
) -> AppResult<impl IntoResponse> {
    let db = require_db(&state)?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let claims = catalog::claims(db, params.status.as_deref(), limit).await?;
    Ok(Json(DataResponse { data: claims }))
}
