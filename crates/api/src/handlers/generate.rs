//! Handlers for the UI generation endpoints.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use autoux_core::component::UxResponse;
use autoux_core::page::PageKind;

use crate::engine::{collector, generator, planner};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn db_ref(state: &AppState) -> Option<&autoux_db::PostgrestClient> {
    state.db.as_deref()
}

fn llm_ref(state: &AppState) -> Option<&autoux_llm::ChatClient> {
    state.llm.as_deref()
}

/// Run the page pipeline: collect -> generate (with fallback).
async fn page_pipeline(
    state: &AppState,
    page: PageKind,
    product_id: Option<Uuid>,
    requirements: Option<&str>,
) -> UxResponse {
    let data = collector::collect(db_ref(state), page, product_id).await;
    generator::generate_page(llm_ref(state), page, &data, requirements).await
}

// ---------------------------------------------------------------------------
// GET /api/v1/ux/generate-ui
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateUiParams {
    pub page_type: String,
    #[serde(default)]
    pub user_query: Option<String>,
}

/// GET /api/v1/ux/generate-ui
///
/// Dispatch: a `search` page with a user query runs the query-plan pipeline;
/// every other page type runs the page pipeline with the query as free-form
/// requirements.
pub async fn generate_ui(
    State(state): State<AppState>,
    Query(params): Query<GenerateUiParams>,
) -> AppResult<impl IntoResponse> {
    let page: PageKind = params.page_type.parse()?;
    let user_query = params
        .user_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let response = match (page, user_query) {
        (PageKind::Search, Some(query)) => {
            planner::generate_from_query(db_ref(&state), llm_ref(&state), query).await?
        }
        (page, requirements) => page_pipeline(&state, page, None, requirements).await,
    };

    tracing::info!(
        page = %page,
        components = response.components.len(),
        ai_generated = response.ai_generated,
        "UI generated",
    );
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// POST /api/v1/ux/generate-ui
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateUiRequest {
    #[validate(length(min = 1, max = 50))]
    pub page_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Product id, for `product_detail` pages.
    #[serde(default)]
    pub product_id: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub custom_requirements: Option<String>,
}

/// POST /api/v1/ux/generate-ui
///
/// Body-driven variant of the page pipeline, carrying user context.
pub async fn generate_ui_post(
    State(state): State<AppState>,
    Json(input): Json<GenerateUiRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let page: PageKind = input.page_type.parse()?;

    let product_id = input
        .product_id
        .as_deref()
        .map(|raw| {
            raw.parse::<Uuid>()
                .map_err(|_| AppError::BadRequest(format!("invalid product_id: {raw}")))
        })
        .transpose()?;

    let response = page_pipeline(
        &state,
        page,
        product_id,
        input.custom_requirements.as_deref(),
    )
    .await;

    tracing::info!(
        page = %page,
        user_id = ?input.user_id,
        components = response.components.len(),
        ai_generated = response.ai_generated,
        "UI generated",
    );
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/v1/ux/generate-ui-smart
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SmartUiParams {
    pub query: String,
}

/// GET /api/v1/ux/generate-ui-smart
///
/// The query-plan pipeline only: LLM plan -> hosted-database read ->
/// server-side rendering. The plan is echoed in the header component's
/// `data` field.
pub async fn generate_ui_smart(
    State(state): State<AppState>,
    Query(params): Query<SmartUiParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("query must not be empty".into()));
    }

    let response = planner::generate_from_query(db_ref(&state), llm_ref(&state), query).await?;

    tracing::info!(
        components = response.components.len(),
        ai_generated = response.ai_generated,
        "Smart UI generated",
    );
    Ok(Json(response))
}
