//! Relevance-scored unified search across products, FAQs, and testimonials.
//!
//! Candidates come back from the database with a broad keyword filter; the
//! ordering happens in `autoux-core`'s scoring model so it is testable
//! without a network.

use serde::Serialize;

use autoux_core::catalog::{Faq, Product, Testimonial};
use autoux_core::scoring;
use autoux_db::{catalog, DbError, PostgrestClient};

/// Unified search response payload.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
    pub faqs: Vec<Faq>,
    pub testimonials: Vec<Testimonial>,
    pub total_results: usize,
}

/// Which result kinds the caller wants.
#[derive(Debug, Clone, Copy)]
pub struct SearchScope {
    pub products: bool,
    pub faqs: bool,
    pub testimonials: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            products: true,
            faqs: true,
            testimonials: true,
        }
    }
}

/// Run a unified search. `limit` applies per result kind.
pub async fn unified_search(
    db: &PostgrestClient,
    query: &str,
    limit: u32,
    scope: SearchScope,
) -> Result<SearchResults, DbError> {
    let lowered = query.to_lowercase();
    let limit_usize = limit as usize;

    let products = if scope.products {
        let candidates = catalog::search_products(db, query, limit).await?;
        scoring::rank_by(candidates, limit_usize, |p| {
            scoring::score_product(&lowered, p)
        })
    } else {
        Vec::new()
    };

    let faqs = if scope.faqs {
        let candidates = catalog::search_faqs(db, query, limit).await?;
        scoring::rank_by(candidates, limit_usize, |f| scoring::score_faq(&lowered, f))
    } else {
        Vec::new()
    };

    let testimonials = if scope.testimonials {
        let candidates = catalog::search_testimonials(db, query, limit).await?;
        scoring::rank_by(candidates, limit_usize, |t| {
            scoring::score_testimonial(&lowered, t)
        })
    } else {
        Vec::new()
    };

    let total_results = products.len() + faqs.len() + testimonials.len();

    tracing::info!(
        query,
        products = products.len(),
        faqs = faqs.len(),
        testimonials = testimonials.len(),
        "Unified search executed",
    );

    Ok(SearchResults {
        query: query.to_string(),
        products,
        faqs,
        testimonials,
        total_results,
    })
}
