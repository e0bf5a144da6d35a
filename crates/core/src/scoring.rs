//! Relevance scoring for unified search.
//!
//! A small weighted substring model: exact-field hits score highest, body
//! text lower, tag/keyword hits in between, with a bonus for popular or
//! highly rated rows. Good enough to order a few dozen candidates; anything
//! smarter belongs in the database.

use crate::catalog::{Faq, Product, Testimonial};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Hit in the primary field (product name, FAQ question).
pub const WEIGHT_PRIMARY: f64 = 10.0;

/// Hit in the body field (description, answer).
pub const WEIGHT_BODY: f64 = 5.0;

/// Hit in a tag or keyword entry.
pub const WEIGHT_TAG: f64 = 3.0;

/// Bonus for popular rows.
pub const BONUS_POPULAR: f64 = 2.0;

/// Testimonial title hits score slightly below product-name hits.
pub const WEIGHT_TESTIMONIAL_TITLE: f64 = 8.0;

/// Testimonial content hits.
pub const WEIGHT_TESTIMONIAL_CONTENT: f64 = 4.0;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of results per kind.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Maximum number of results per kind.
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Default limit for plain catalog listings.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Maximum limit for plain catalog listings.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, max)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn contains_ci(field: &str, query: &str) -> bool {
    field.to_lowercase().contains(query)
}

/// Score a product against a lowercased query.
pub fn score_product(query: &str, product: &Product) -> f64 {
    let mut score = 0.0;

    if contains_ci(&product.name, query) {
        score += WEIGHT_PRIMARY;
    }
    if let Some(description) = &product.description {
        if contains_ci(description, query) {
            score += WEIGHT_BODY;
        }
    }
    for tag in &product.tags {
        if contains_ci(tag, query) {
            score += WEIGHT_TAG;
        }
    }
    if product.is_popular {
        score += BONUS_POPULAR;
    }

    score
}

/// Score a FAQ against a lowercased query.
pub fn score_faq(query: &str, faq: &Faq) -> f64 {
    let mut score = 0.0;

    if contains_ci(&faq.question, query) {
        score += WEIGHT_PRIMARY;
    }
    if contains_ci(&faq.answer, query) {
        score += WEIGHT_BODY;
    }
    for keyword in &faq.keywords {
        if contains_ci(keyword, query) {
            score += WEIGHT_TAG;
        }
    }
    if faq.is_popular {
        score += BONUS_POPULAR;
    }

    score
}

/// Score a testimonial against a lowercased query.
pub fn score_testimonial(query: &str, testimonial: &Testimonial) -> f64 {
    let mut score = 0.0;

    if let Some(title) = &testimonial.title {
        if contains_ci(title, query) {
            score += WEIGHT_TESTIMONIAL_TITLE;
        }
    }
    if contains_ci(&testimonial.content, query) {
        score += WEIGHT_TESTIMONIAL_CONTENT;
    }
    if let Some(rating) = testimonial.rating {
        if rating >= 4.0 {
            score += f64::from(rating) * 0.5;
        }
    }

    score
}

/// Sort rows by a score function, drop zero-score rows, and truncate.
///
/// The score bonus terms mean a popular row with no textual hit still scores
/// above zero; callers that fetched candidates with a database-side keyword
/// filter keep those rows, which matches the intent (popularity breaks ties
/// among already-matching rows).
pub fn rank_by<T>(mut rows: Vec<T>, limit: usize, score: impl Fn(&T) -> f64) -> Vec<T> {
    rows.retain(|row| score(row) > 0.0);
    rows.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn product(name: &str, description: &str, tags: &[&str], popular: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: Some(description.into()),
            base_price: None,
            max_coverage: None,
            age_limit_min: 0,
            age_limit_max: 100,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            features: vec![],
            is_popular: popular,
            is_new: false,
            category_id: None,
            category: None,
        }
    }

    #[test]
    fn name_hit_outscores_description_hit() {
        let by_name = product("Dental Shield", "coverage", &[], false);
        let by_description = product("Shield", "dental coverage", &[], false);
        assert!(score_product("dental", &by_name) > score_product("dental", &by_description));
    }

    #[test]
    fn popularity_breaks_ties() {
        let plain = product("Dental Shield", "", &[], false);
        let popular = product("Dental Shield", "", &[], true);
        assert!(score_product("dental", &popular) > score_product("dental", &plain));
    }

    #[test]
    fn tag_hits_accumulate() {
        let tagged = product("Shield", "", &["dental", "dental care"], false);
        assert_eq!(score_product("dental", &tagged), 2.0 * WEIGHT_TAG);
    }

    #[test]
    fn no_hit_scores_zero() {
        let p = product("Life Plan", "whole life", &["life"], false);
        assert_eq!(score_product("dental", &p), 0.0);
    }

    #[test]
    fn high_rating_boosts_testimonials() {
        let base = Testimonial {
            id: Uuid::new_v4(),
            title: Some("great dental plan".into()),
            content: "quick payout".into(),
            rating: None,
            is_verified: true,
            product_id: None,
            customer: None,
            product: None,
        };
        let mut rated = base.clone();
        rated.rating = Some(5.0);
        assert_eq!(
            score_testimonial("dental", &rated) - score_testimonial("dental", &base),
            2.5
        );
    }

    #[test]
    fn low_rating_gets_no_bonus() {
        let t = Testimonial {
            id: Uuid::new_v4(),
            title: None,
            content: "dental was fine".into(),
            rating: Some(2.0),
            is_verified: true,
            product_id: None,
            customer: None,
            product: None,
        };
        assert_eq!(score_testimonial("dental", &t), WEIGHT_TESTIMONIAL_CONTENT);
    }

    #[test]
    fn rank_by_orders_and_drops_zero_scores() {
        let rows = vec![
            product("other", "", &[], false),
            product("dental basic", "", &[], false),
            product("dental plus", "dental", &[], false),
        ];
        let ranked = rank_by(rows, 10, |p| score_product("dental", p));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "dental plus");
    }

    #[test]
    fn rank_by_truncates() {
        let rows = vec![
            product("dental a", "", &[], false),
            product("dental b", "", &[], false),
            product("dental c", "", &[], false),
        ];
        assert_eq!(rank_by(rows, 2, |p| score_product("dental", p)).len(), 2);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(33), 20, 100), 33);
    }
}
