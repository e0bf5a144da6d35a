//! The free-text query pipeline: question -> plan -> rows -> fragments.
//!
//! The LLM is asked (via forced function calling) for a typed [`QueryPlan`];
//! the plan is validated, executed against the hosted database, and the rows
//! are rendered server-side with a theme picked from the request profile.
//!
//! Degradation ladder:
//! - LLM missing or transport/parse failure: a heuristic plan built from the
//!   request profile alone, `ai_generated` off.
//! - plan semantically unsupported: 422 (the model produced it, but it is a
//!   client-visible contract violation, not an upstream outage).
//! - database missing: the static search fallback page.
//! - database call failure: 502.

use serde_json::json;

use autoux_core::component::UxResponse;
use autoux_core::page::PageKind;
use autoux_core::plan::{
    aggregate_products, aggregate_testimonials, Aggregate, AggregateOutcome, Filter, QueryPlan,
    TableKind, DEFAULT_PLAN_LIMIT,
};
use autoux_core::profile::{self, RequestProfile};
use autoux_core::render;
use autoux_db::catalog::{self, PlanRows};
use autoux_db::PostgrestClient;
use autoux_llm::plan_tool::{plan_from_tool_call, plan_tool};
use autoux_llm::{prompt, ChatClient, LlmError};

use crate::engine::generator::accessibility_hints;
use crate::error::AppError;

/// How many interest keywords the heuristic plan keeps.
const HEURISTIC_KEYWORD_CAP: usize = 2;

/// Ask the model for a query plan.
async fn extract_plan(llm: &ChatClient, query: &str) -> Result<QueryPlan, LlmError> {
    let tool = plan_tool();
    let call = llm
        .chat_with_tool(prompt::plan_system_prompt(), query, &tool)
        .await?;
    plan_from_tool_call(&call)
}

/// Build a plan from the request profile alone (LLM unavailable).
fn heuristic_plan(profile: &RequestProfile) -> QueryPlan {
    let mut filters = Vec::new();
    if let Some(age) = profile.age {
        filters.push(Filter::AgeEligible { age });
    }
    for keyword in profile::interest_keywords(profile)
        .into_iter()
        .take(HEURISTIC_KEYWORD_CAP)
    {
        filters.push(Filter::Keyword { term: keyword });
    }

    QueryPlan {
        table: TableKind::Products,
        filters,
        aggregate: None,
        limit: DEFAULT_PLAN_LIMIT,
    }
}

/// Evaluate the plan's aggregate over the fetched rows.
///
/// Plan validation already restricted non-`Count` aggregates to the tables
/// that carry the aggregated column.
fn aggregate_outcome(rows: &PlanRows, aggregate: Aggregate) -> Option<AggregateOutcome> {
    match rows {
        PlanRows::Products(products) => aggregate_products(aggregate, products),
        PlanRows::Testimonials(testimonials) => aggregate_testimonials(aggregate, testimonials),
        _ => (aggregate == Aggregate::Count).then(|| AggregateOutcome {
            aggregate,
            value: rows.len() as f64,
            samples: rows.len(),
        }),
    }
}

/// Run the full pipeline for one free-text question.
pub async fn generate_from_query(
    db: Option<&PostgrestClient>,
    llm: Option<&ChatClient>,
    query: &str,
) -> Result<UxResponse, AppError> {
    let profile = profile::analyze(query);
    let accessibility = accessibility_hints(&profile);

    let (plan, ai_generated) = match llm {
        Some(llm) => match extract_plan(llm, query).await {
            Ok(plan) => (plan, true),
            Err(e) => {
                tracing::warn!(error = %e, "Plan extraction failed; using heuristic plan");
                (heuristic_plan(&profile), false)
            }
        },
        None => {
            tracing::debug!("No LLM client; using heuristic plan");
            (heuristic_plan(&profile), false)
        }
    };

    plan.validate()?;

    let Some(db) = db else {
        tracing::warn!("No database client; serving search fallback");
        return Ok(UxResponse::new(
            render::fallback_page(PageKind::Search),
            accessibility,
            None,
            false,
        ));
    };

    let rows = catalog::run_plan(db, &plan).await?;

    tracing::info!(
        table = plan.table.table_name(),
        rows = rows.len(),
        aggregate = ?plan.aggregate,
        ai_generated,
        "Query plan executed",
    );

    let theme = render::pick_theme(Some(&profile));

    let mut header = render::header(
        &format!("Results for \"{query}\""),
        "Matched against the live catalog",
        theme,
    );
    header.data = json!({ "query": query, "plan": &plan, "profile": &profile });

    let mut components = vec![header];
    let mut total_products = None;

    if let Some(aggregate) = plan.aggregate {
        match aggregate_outcome(&rows, aggregate) {
            Some(outcome) => components.push(render::stat_panel(&outcome, theme)),
            None => components.push(render::empty_notice(plan.table.table_name())),
        }
    } else {
        match rows {
            PlanRows::Products(products) if products.is_empty() => {
                components.push(render::empty_notice("product catalog"));
            }
            PlanRows::Products(products) => {
                total_products = Some(products.len());
                components.push(render::product_grid(&products, theme));
            }
            PlanRows::Categories(categories) => {
                components.push(render::category_strip(&categories, theme));
            }
            PlanRows::Faqs(faqs) => components.push(render::faq_list(&faqs, theme)),
            PlanRows::Testimonials(testimonials) => {
                components.push(render::testimonial_list(&testimonials, theme));
            }
            PlanRows::Claims(claims) => components.push(render::claim_list(&claims, theme)),
        }
    }

    Ok(UxResponse::new(
        components,
        accessibility,
        total_products,
        ai_generated,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_plan_uses_age_and_interests() {
        let profile = profile::analyze("dental and health coverage for my 5 year old");
        let plan = heuristic_plan(&profile);
        assert_eq!(plan.table, TableKind::Products);
        assert!(plan.filters.contains(&Filter::AgeEligible { age: 5 }));
        assert!(plan
            .filters
            .contains(&Filter::Keyword { term: "dental".into() }));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn heuristic_plan_caps_keywords() {
        let profile = profile::analyze("dental health cancer travel insurance");
        let plan = heuristic_plan(&profile);
        let keywords = plan
            .filters
            .iter()
            .filter(|f| matches!(f, Filter::Keyword { .. }))
            .count();
        assert_eq!(keywords, HEURISTIC_KEYWORD_CAP);
    }

    #[test]
    fn count_aggregate_works_on_any_table() {
        let rows = PlanRows::Faqs(vec![]);
        let outcome = aggregate_outcome(&rows, Aggregate::Count).unwrap();
        assert_eq!(outcome.value, 0.0);
    }

    #[test]
    fn rating_aggregate_on_faqs_yields_nothing() {
        let rows = PlanRows::Faqs(vec![]);
        assert!(aggregate_outcome(&rows, Aggregate::AvgRating).is_none());
    }

    #[tokio::test]
    async fn fully_degraded_pipeline_serves_fallback() {
        let response = generate_from_query(None, None, "dental for kids")
            .await
            .unwrap();
        assert!(!response.ai_generated);
        assert_eq!(response.components[0].id, "search_notice");
    }
}
