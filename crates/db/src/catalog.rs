//! Typed per-table fetchers and query-plan execution.
//!
//! Each function builds one [`TableQuery`] and decodes into the matching
//! `autoux-core` row type. Plan execution translates a validated
//! [`QueryPlan`] into the same wire shapes; the translation itself
//! ([`plan_query`]) is a pure function so the parameter sets are testable
//! without a network.

use uuid::Uuid;

use autoux_core::catalog::{Category, Claim, Faq, Product, Testimonial};
use autoux_core::plan::{Filter, QueryPlan, TableKind};

use crate::client::{DbError, PostgrestClient};
use crate::query::TableQuery;

/// Select list embedding the product's category.
const PRODUCT_SELECT: &str = "*, insurance_categories(name, description, icon_url)";

/// Select list embedding the reviewer and reviewed product.
const TESTIMONIAL_SELECT: &str = "*, users(name), insurance_products(name)";

// ---------------------------------------------------------------------------
// Fetchers
// ---------------------------------------------------------------------------

/// All categories, in display order.
pub async fn categories(db: &PostgrestClient) -> Result<Vec<Category>, DbError> {
    db.rows(
        TableQuery::new("insurance_categories").order("sort_order", true),
    )
    .await
}

/// Products, optionally restricted to one category id.
pub async fn products(
    db: &PostgrestClient,
    category_id: Option<&str>,
    limit: u32,
) -> Result<Vec<Product>, DbError> {
    let mut query = TableQuery::new("insurance_products")
        .select(PRODUCT_SELECT)
        .limit(limit);
    if let Some(category_id) = category_id {
        query = query.eq("category_id", category_id);
    }
    db.rows(query).await
}

/// Products flagged popular, for the home page.
pub async fn popular_products(db: &PostgrestClient, limit: u32) -> Result<Vec<Product>, DbError> {
    db.rows(
        TableQuery::new("insurance_products")
            .select(PRODUCT_SELECT)
            .eq("is_popular", true)
            .limit(limit),
    )
    .await
}

/// One product by id, with its category embedded.
pub async fn product_by_id(db: &PostgrestClient, id: Uuid) -> Result<Option<Product>, DbError> {
    let rows: Vec<Product> = db
        .rows(
            TableQuery::new("insurance_products")
                .select(PRODUCT_SELECT)
                .eq("id", id)
                .limit(1),
        )
        .await?;
    Ok(rows.into_iter().next())
}

/// Products matching an optional enrollment age and keyword set.
pub async fn products_matching(
    db: &PostgrestClient,
    age: Option<u8>,
    keywords: &[String],
    limit: u32,
) -> Result<Vec<Product>, DbError> {
    let mut query = TableQuery::new("insurance_products")
        .select(PRODUCT_SELECT)
        .limit(limit);
    if let Some(age) = age {
        query = query.lte("age_limit_min", age).gte("age_limit_max", age);
    }
    for keyword in keywords {
        query = query.ilike_any(&["name", "description"], keyword);
    }
    db.rows(query).await
}

/// FAQs, optionally restricted to a category, in display order.
pub async fn faqs(
    db: &PostgrestClient,
    category: Option<&str>,
    limit: u32,
) -> Result<Vec<Faq>, DbError> {
    let mut query = TableQuery::new("faqs").order("sort_order", true).limit(limit);
    if let Some(category) = category {
        query = query.eq("category", category);
    }
    db.rows(query).await
}

/// Testimonials, optionally restricted to one product, best rated first.
pub async fn testimonials(
    db: &PostgrestClient,
    product_id: Option<Uuid>,
    verified_only: bool,
    limit: u32,
) -> Result<Vec<Testimonial>, DbError> {
    let mut query = TableQuery::new("customer_testimonials")
        .select(TESTIMONIAL_SELECT)
        .order("rating", false)
        .limit(limit);
    if let Some(product_id) = product_id {
        query = query.eq("product_id", product_id);
    }
    if verified_only {
        query = query.eq("is_verified", true);
    }
    db.rows(query).await
}

/// Claims, optionally restricted to a status, newest first.
pub async fn claims(
    db: &PostgrestClient,
    status: Option<&str>,
    limit: u32,
) -> Result<Vec<Claim>, DbError> {
    let mut query = TableQuery::new("insurance_claims")
        .order("filed_at", false)
        .limit(limit);
    if let Some(status) = status {
        query = query.eq("status", status);
    }
    db.rows(query).await
}

// ---------------------------------------------------------------------------
// Unified-search candidate fetchers (broad keyword reads; scoring happens
// in core)
// ---------------------------------------------------------------------------

pub async fn search_products(
    db: &PostgrestClient,
    term: &str,
    limit: u32,
) -> Result<Vec<Product>, DbError> {
    db.rows(
        TableQuery::new("insurance_products")
            .select(PRODUCT_SELECT)
            .ilike_any(&["name", "description"], term)
            .limit(limit),
    )
    .await
}

pub async fn search_faqs(
    db: &PostgrestClient,
    term: &str,
    limit: u32,
) -> Result<Vec<Faq>, DbError> {
    db.rows(
        TableQuery::new("faqs")
            .ilike_any(&["question", "answer"], term)
            .limit(limit),
    )
    .await
}

pub async fn search_testimonials(
    db: &PostgrestClient,
    term: &str,
    limit: u32,
) -> Result<Vec<Testimonial>, DbError> {
    db.rows(
        TableQuery::new("customer_testimonials")
            .select(TESTIMONIAL_SELECT)
            .ilike_any(&["title", "content"], term)
            .eq("is_verified", true)
            .limit(limit),
    )
    .await
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Cheap reachability probe: one id from the categories table.
pub async fn health_check(db: &PostgrestClient) -> Result<(), DbError> {
    #[derive(serde::Deserialize)]
    struct IdOnly {
        #[allow(dead_code)]
        id: Uuid,
    }
    let _rows: Vec<IdOnly> = db
        .rows(
            TableQuery::new("insurance_categories")
                .select("id")
                .limit(1),
        )
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Plan execution
// ---------------------------------------------------------------------------

/// Rows returned by executing a query plan.
#[derive(Debug, Clone)]
pub enum PlanRows {
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Faqs(Vec<Faq>),
    Testimonials(Vec<Testimonial>),
    Claims(Vec<Claim>),
}

impl PlanRows {
    pub fn len(&self) -> usize {
        match self {
            PlanRows::Products(rows) => rows.len(),
            PlanRows::Categories(rows) => rows.len(),
            PlanRows::Faqs(rows) => rows.len(),
            PlanRows::Testimonials(rows) => rows.len(),
            PlanRows::Claims(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Translate a validated plan into PostgREST parameters.
///
/// A `Category` filter on products rides on an inner-joined embed so the
/// database applies it; on FAQs it is a plain column match.
pub fn plan_query(plan: &QueryPlan) -> TableQuery {
    let mut query = TableQuery::new(plan.table.table_name()).limit(plan.clamped_limit());

    let category_filtered = plan
        .filters
        .iter()
        .any(|f| matches!(f, Filter::Category { .. }))
        && plan.table == TableKind::Products;

    query = match plan.table {
        TableKind::Products if category_filtered => query.select(
            "*, insurance_categories!inner(name, description, icon_url)",
        ),
        TableKind::Products => query.select(PRODUCT_SELECT),
        TableKind::Testimonials => query.select(TESTIMONIAL_SELECT),
        TableKind::Categories | TableKind::Faqs => query.order("sort_order", true),
        TableKind::Claims => query.order("filed_at", false),
    };

    for filter in &plan.filters {
        query = match (plan.table, filter) {
            (_, Filter::AgeEligible { age }) => {
                query.lte("age_limit_min", age).gte("age_limit_max", age)
            }
            (TableKind::Products, Filter::Keyword { term }) => {
                query.ilike_any(&["name", "description"], term)
            }
            (TableKind::Categories, Filter::Keyword { term }) => {
                query.ilike_any(&["name", "description"], term)
            }
            (TableKind::Faqs, Filter::Keyword { term }) => {
                query.ilike_any(&["question", "answer"], term)
            }
            (TableKind::Testimonials, Filter::Keyword { term }) => {
                query.ilike_any(&["title", "content"], term)
            }
            (TableKind::Claims, Filter::Keyword { term }) => {
                query.ilike_any(&["claim_type", "status"], term)
            }
            (TableKind::Products, Filter::Category { name }) => {
                query.ilike_any(&["insurance_categories.name"], name)
            }
            (TableKind::Faqs, Filter::Category { name }) => query.eq("category", name),
            (_, Filter::Category { .. }) => query,
            (_, Filter::VerifiedOnly) => query.eq("is_verified", true),
            (_, Filter::PriceAtMost { amount }) => query.lte("base_price", amount),
            (_, Filter::PriceAtLeast { amount }) => query.gte("base_price", amount),
        };
    }

    query
}

/// Execute a validated plan against the hosted database.
pub async fn run_plan(db: &PostgrestClient, plan: &QueryPlan) -> Result<PlanRows, DbError> {
    let query = plan_query(plan);
    let rows = match plan.table {
        TableKind::Products => PlanRows::Products(db.rows(query).await?),
        TableKind::Categories => PlanRows::Categories(db.rows(query).await?),
        TableKind::Faqs => PlanRows::Faqs(db.rows(query).await?),
        TableKind::Testimonials => PlanRows::Testimonials(db.rows(query).await?),
        TableKind::Claims => PlanRows::Claims(db.rows(query).await?),
    };

    tracing::debug!(
        table = plan.table.table_name(),
        rows = rows.len(),
        "Plan executed",
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoux_core::plan::{Aggregate, DEFAULT_PLAN_LIMIT};

    fn params(plan: &QueryPlan) -> Vec<(String, String)> {
        plan_query(plan).into_params()
    }

    #[test]
    fn age_plan_emits_enrollment_window() {
        let plan = QueryPlan {
            table: TableKind::Products,
            filters: vec![Filter::AgeEligible { age: 5 }],
            aggregate: None,
            limit: 5,
        };
        let params = params(&plan);
        assert!(params.contains(&("age_limit_min".to_string(), "lte.5".to_string())));
        assert!(params.contains(&("age_limit_max".to_string(), "gte.5".to_string())));
        assert!(params.contains(&("limit".to_string(), "5".to_string())));
    }

    #[test]
    fn product_keyword_plan_matches_name_and_description() {
        let plan = QueryPlan {
            table: TableKind::Products,
            filters: vec![Filter::Keyword {
                term: "dental".into(),
            }],
            aggregate: None,
            limit: DEFAULT_PLAN_LIMIT,
        };
        let params = params(&plan);
        assert!(params.contains(&(
            "or".to_string(),
            "(name.ilike.*dental*,description.ilike.*dental*)".to_string()
        )));
    }

    #[test]
    fn product_category_plan_uses_inner_join_embed() {
        let plan = QueryPlan {
            table: TableKind::Products,
            filters: vec![Filter::Category {
                name: "dental".into(),
            }],
            aggregate: None,
            limit: DEFAULT_PLAN_LIMIT,
        };
        let params = params(&plan);
        assert!(params[0].1.contains("insurance_categories!inner"));
        assert!(params.contains(&(
            "or".to_string(),
            "(insurance_categories.name.ilike.*dental*)".to_string()
        )));
    }

    #[test]
    fn faq_category_plan_is_a_column_match() {
        let plan = QueryPlan {
            table: TableKind::Faqs,
            filters: vec![Filter::Category {
                name: "claims".into(),
            }],
            aggregate: None,
            limit: DEFAULT_PLAN_LIMIT,
        };
        let params = params(&plan);
        assert!(params.contains(&("category".to_string(), "eq.claims".to_string())));
    }

    #[test]
    fn verified_testimonial_plan() {
        let plan = QueryPlan {
            table: TableKind::Testimonials,
            filters: vec![Filter::VerifiedOnly],
            aggregate: None,
            limit: 10,
        };
        let params = params(&plan);
        assert!(params.contains(&("is_verified".to_string(), "eq.true".to_string())));
        assert_eq!(params[0].1, TESTIMONIAL_SELECT);
    }

    #[test]
    fn price_band_plan() {
        let plan = QueryPlan {
            table: TableKind::Products,
            filters: vec![
                Filter::PriceAtLeast { amount: 10000.0 },
                Filter::PriceAtMost { amount: 50000.0 },
            ],
            aggregate: Some(Aggregate::AvgPrice),
            limit: 50,
        };
        let params = params(&plan);
        assert!(params.contains(&("base_price".to_string(), "gte.10000".to_string())));
        assert!(params.contains(&("base_price".to_string(), "lte.50000".to_string())));
    }

    #[test]
    fn plan_limit_is_clamped_on_the_wire() {
        let plan = QueryPlan {
            table: TableKind::Claims,
            filters: vec![],
            aggregate: None,
            limit: 9999,
        };
        let params = params(&plan);
        assert!(params.contains(&("limit".to_string(), "50".to_string())));
    }
}
