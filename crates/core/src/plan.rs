//! The typed query plan produced by the LLM in place of hand-written SQL.
//!
//! A plan names a table, a set of filters, an optional aggregate, and a row
//! limit. The LLM's function-call arguments deserialize straight into
//! [`QueryPlan`]; [`QueryPlan::validate`] is the trust boundary that rejects
//! shapes the executor does not support.
//!
//! Aggregates are evaluated client-side over the fetched rows. Hosted
//! PostgREST deployments expose SQL aggregates unevenly, so the database
//! surface stays limited to plain filtered reads.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Testimonial};
use crate::error::CoreError;

/// Default row limit when the plan omits one.
pub const DEFAULT_PLAN_LIMIT: u32 = 5;

/// Hard cap on rows a single plan may request.
pub const MAX_PLAN_LIMIT: u32 = 50;

/// Tables a plan may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Products,
    Categories,
    Faqs,
    Testimonials,
    Claims,
}

impl TableKind {
    /// Physical table name in the hosted database.
    pub fn table_name(self) -> &'static str {
        match self {
            TableKind::Products => "insurance_products",
            TableKind::Categories => "insurance_categories",
            TableKind::Faqs => "faqs",
            TableKind::Testimonials => "customer_testimonials",
            TableKind::Claims => "insurance_claims",
        }
    }
}

/// A single predicate in a query plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// `age_limit_min <= age <= age_limit_max` on products.
    AgeEligible { age: u8 },
    /// Case-insensitive substring match across the table's text columns.
    Keyword { term: String },
    /// Category name match.
    Category { name: String },
    /// Verified rows only (testimonials).
    VerifiedOnly,
    /// Monthly premium at most `amount`.
    PriceAtMost { amount: f64 },
    /// Monthly premium at least `amount`.
    PriceAtLeast { amount: f64 },
}

/// Aggregations a plan may request instead of raw rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    Count,
    AvgPrice,
    MinPrice,
    MaxPrice,
    AvgRating,
}

impl Aggregate {
    /// Label used on the rendered stat panel.
    pub fn label(self) -> &'static str {
        match self {
            Aggregate::Count => "matching entries",
            Aggregate::AvgPrice => "average monthly premium",
            Aggregate::MinPrice => "lowest monthly premium",
            Aggregate::MaxPrice => "highest monthly premium",
            Aggregate::AvgRating => "average rating",
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_PLAN_LIMIT
}

/// The structured output the LLM is asked to produce for a free-text
/// question: which table to read, how to filter it, whether to aggregate,
/// and how many rows to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPlan {
    pub table: TableKind,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl QueryPlan {
    /// Reject table/filter/aggregate combinations the executor cannot run.
    pub fn validate(&self) -> Result<(), CoreError> {
        for filter in &self.filters {
            if !filter_supported(self.table, filter) {
                return Err(CoreError::InvalidPlan(format!(
                    "filter {filter:?} is not supported on table {:?}",
                    self.table
                )));
            }
            if let Filter::Keyword { term } = filter {
                if term.trim().is_empty() {
                    return Err(CoreError::InvalidPlan(
                        "keyword filter with empty term".to_string(),
                    ));
                }
            }
        }

        if let Some(aggregate) = self.aggregate {
            if !aggregate_supported(self.table, aggregate) {
                return Err(CoreError::InvalidPlan(format!(
                    "aggregate {aggregate:?} is not supported on table {:?}",
                    self.table
                )));
            }
        }

        Ok(())
    }

    /// Row limit clamped to `[1, MAX_PLAN_LIMIT]`.
    pub fn clamped_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_PLAN_LIMIT)
    }
}

/// Which filters each table supports.
pub fn filter_supported(table: TableKind, filter: &Filter) -> bool {
    match filter {
        Filter::Keyword { .. } => true,
        Filter::AgeEligible { .. } => table == TableKind::Products,
        Filter::Category { .. } => matches!(table, TableKind::Products | TableKind::Faqs),
        Filter::VerifiedOnly => table == TableKind::Testimonials,
        Filter::PriceAtMost { .. } | Filter::PriceAtLeast { .. } => table == TableKind::Products,
    }
}

/// Which aggregates each table supports.
pub fn aggregate_supported(table: TableKind, aggregate: Aggregate) -> bool {
    match aggregate {
        Aggregate::Count => true,
        Aggregate::AvgPrice | Aggregate::MinPrice | Aggregate::MaxPrice => {
            table == TableKind::Products
        }
        Aggregate::AvgRating => table == TableKind::Testimonials,
    }
}

/// Result of evaluating an aggregate over a row set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateOutcome {
    pub aggregate: Aggregate,
    pub value: f64,
    /// Rows that contributed a value.
    pub samples: usize,
}

/// Evaluate a product aggregate. Returns `None` when no row carries the
/// aggregated column (`Count` always succeeds).
pub fn aggregate_products(aggregate: Aggregate, rows: &[Product]) -> Option<AggregateOutcome> {
    if aggregate == Aggregate::Count {
        return Some(AggregateOutcome {
            aggregate,
            value: rows.len() as f64,
            samples: rows.len(),
        });
    }

    let prices: Vec<f64> = rows.iter().filter_map(|p| p.base_price).collect();
    if prices.is_empty() {
        return None;
    }

    let value = match aggregate {
        Aggregate::AvgPrice => prices.iter().sum::<f64>() / prices.len() as f64,
        Aggregate::MinPrice => prices.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregate::MaxPrice => prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregate::Count | Aggregate::AvgRating => return None,
    };

    Some(AggregateOutcome {
        aggregate,
        value,
        samples: prices.len(),
    })
}

/// Evaluate a testimonial aggregate (`Count` or `AvgRating`).
pub fn aggregate_testimonials(
    aggregate: Aggregate,
    rows: &[Testimonial],
) -> Option<AggregateOutcome> {
    match aggregate {
        Aggregate::Count => Some(AggregateOutcome {
            aggregate,
            value: rows.len() as f64,
            samples: rows.len(),
        }),
        Aggregate::AvgRating => {
            let ratings: Vec<f64> = rows.iter().filter_map(|t| t.rating.map(f64::from)).collect();
            if ratings.is_empty() {
                return None;
            }
            Some(AggregateOutcome {
                aggregate,
                value: ratings.iter().sum::<f64>() / ratings.len() as f64,
                samples: ratings.len(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn plan(table: TableKind, filters: Vec<Filter>, aggregate: Option<Aggregate>) -> QueryPlan {
        QueryPlan {
            table,
            filters,
            aggregate,
            limit: DEFAULT_PLAN_LIMIT,
        }
    }

    fn priced(price: Option<f64>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "p".into(),
            description: None,
            base_price: price,
            max_coverage: None,
            age_limit_min: 0,
            age_limit_max: 100,
            tags: vec![],
            features: vec![],
            is_popular: false,
            is_new: false,
            category_id: None,
            category: None,
        }
    }

    // -- validate ------------------------------------------------------------

    #[test]
    fn age_filter_valid_only_on_products() {
        let filter = Filter::AgeEligible { age: 5 };
        assert!(plan(TableKind::Products, vec![filter.clone()], None)
            .validate()
            .is_ok());
        assert!(plan(TableKind::Faqs, vec![filter], None).validate().is_err());
    }

    #[test]
    fn verified_filter_only_on_testimonials() {
        assert!(plan(TableKind::Testimonials, vec![Filter::VerifiedOnly], None)
            .validate()
            .is_ok());
        assert!(plan(TableKind::Products, vec![Filter::VerifiedOnly], None)
            .validate()
            .is_err());
    }

    #[test]
    fn keyword_filter_valid_everywhere_unless_empty() {
        for table in [
            TableKind::Products,
            TableKind::Categories,
            TableKind::Faqs,
            TableKind::Testimonials,
            TableKind::Claims,
        ] {
            let ok = plan(table, vec![Filter::Keyword { term: "dental".into() }], None);
            assert!(ok.validate().is_ok(), "{table:?}");
        }

        let empty = plan(
            TableKind::Products,
            vec![Filter::Keyword { term: "  ".into() }],
            None,
        );
        assert!(empty.validate().is_err());
    }

    #[test]
    fn price_aggregates_only_on_products() {
        assert!(plan(TableKind::Products, vec![], Some(Aggregate::AvgPrice))
            .validate()
            .is_ok());
        assert!(plan(TableKind::Faqs, vec![], Some(Aggregate::AvgPrice))
            .validate()
            .is_err());
        assert!(plan(TableKind::Products, vec![], Some(Aggregate::AvgRating))
            .validate()
            .is_err());
    }

    #[test]
    fn count_valid_on_every_table() {
        for table in [
            TableKind::Products,
            TableKind::Categories,
            TableKind::Faqs,
            TableKind::Testimonials,
            TableKind::Claims,
        ] {
            assert!(plan(table, vec![], Some(Aggregate::Count)).validate().is_ok());
        }
    }

    // -- limit ---------------------------------------------------------------

    #[test]
    fn limit_clamps_to_bounds() {
        let mut p = plan(TableKind::Products, vec![], None);
        p.limit = 0;
        assert_eq!(p.clamped_limit(), 1);
        p.limit = 500;
        assert_eq!(p.clamped_limit(), MAX_PLAN_LIMIT);
        p.limit = 7;
        assert_eq!(p.clamped_limit(), 7);
    }

    #[test]
    fn limit_defaults_when_absent_in_json() {
        let p: QueryPlan = serde_json::from_value(serde_json::json!({
            "table": "products",
            "filters": [{ "kind": "age_eligible", "age": 5 }]
        }))
        .unwrap();
        assert_eq!(p.limit, DEFAULT_PLAN_LIMIT);
        assert_eq!(p.filters, vec![Filter::AgeEligible { age: 5 }]);
    }

    // -- aggregation ---------------------------------------------------------

    #[test]
    fn avg_price_skips_unpriced_rows() {
        let rows = vec![priced(Some(10_000.0)), priced(None), priced(Some(30_000.0))];
        let outcome = aggregate_products(Aggregate::AvgPrice, &rows).unwrap();
        assert_eq!(outcome.value, 20_000.0);
        assert_eq!(outcome.samples, 2);
    }

    #[test]
    fn min_max_price() {
        let rows = vec![priced(Some(15_000.0)), priced(Some(90_000.0))];
        assert_eq!(
            aggregate_products(Aggregate::MinPrice, &rows).unwrap().value,
            15_000.0
        );
        assert_eq!(
            aggregate_products(Aggregate::MaxPrice, &rows).unwrap().value,
            90_000.0
        );
    }

    #[test]
    fn price_aggregate_without_prices_is_none() {
        let rows = vec![priced(None)];
        assert!(aggregate_products(Aggregate::AvgPrice, &rows).is_none());
    }

    #[test]
    fn count_works_on_empty_set() {
        let outcome = aggregate_products(Aggregate::Count, &[]).unwrap();
        assert_eq!(outcome.value, 0.0);
    }
}
