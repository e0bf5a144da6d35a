//! Per-page data collection from the hosted database.
//!
//! Every page type pulls a fixed slice of the catalog. Collection never
//! fails the request: a missing database client or an upstream error leaves
//! the affected fields empty and logs, and the generator falls back from
//! there.

use uuid::Uuid;

use autoux_core::catalog::{Category, Claim, Faq, Product, Testimonial};
use autoux_core::page::PageKind;
use autoux_core::render::format_amount;
use autoux_db::{catalog, PostgrestClient};

/// How many popular products the home page shows.
const HOME_POPULAR_LIMIT: u32 = 5;

/// Catalog slice for the products and search pages.
const PRODUCT_LIMIT: u32 = 50;

/// FAQs fed to the search prompt.
const SEARCH_FAQ_LIMIT: u32 = 15;

/// Verified testimonials fed to the search prompt.
const SEARCH_TESTIMONIAL_LIMIT: u32 = 10;

/// FAQ page slice.
const FAQ_PAGE_LIMIT: u32 = 50;

/// Claims page slice.
const CLAIM_PAGE_LIMIT: u32 = 20;

/// Testimonials shown on a product detail page.
const DETAIL_TESTIMONIAL_LIMIT: u32 = 5;

/// Everything one page's prompt may draw on.
#[derive(Debug, Default)]
pub struct PageData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub popular: Vec<Product>,
    pub faqs: Vec<Faq>,
    pub testimonials: Vec<Testimonial>,
    pub product: Option<Product>,
    pub claims: Vec<Claim>,
}

impl PageData {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.products.is_empty()
            && self.popular.is_empty()
            && self.faqs.is_empty()
            && self.testimonials.is_empty()
            && self.product.is_none()
            && self.claims.is_empty()
    }

    /// Product count surfaced in the response metadata.
    pub fn total_products(&self) -> Option<usize> {
        if !self.products.is_empty() {
            Some(self.products.len())
        } else if !self.popular.is_empty() {
            Some(self.popular.len())
        } else {
            self.product.as_ref().map(|_| 1)
        }
    }

    /// Prompt-facing JSON: raw rows enriched with display strings the model
    /// can quote verbatim (formatted price, age band, highlights).
    pub fn to_prompt_json(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();

        if !self.categories.is_empty() {
            root.insert(
                "categories".to_string(),
                serde_json::to_value(&self.categories).unwrap_or_default(),
            );
        }

        let product_block = |products: &[Product]| {
            let rows: Vec<serde_json::Value> = products.iter().map(product_summary).collect();
            serde_json::json!({
                "count": rows.len(),
                "rows": rows,
            })
        };

        if !self.products.is_empty() {
            root.insert("products".to_string(), product_block(&self.products));
        }
        if !self.popular.is_empty() {
            root.insert("popular_products".to_string(), product_block(&self.popular));
        }
        if let Some(product) = &self.product {
            root.insert("product".to_string(), product_summary(product));
        }
        if !self.faqs.is_empty() {
            root.insert(
                "faqs".to_string(),
                serde_json::to_value(&self.faqs).unwrap_or_default(),
            );
        }
        if !self.testimonials.is_empty() {
            let rows: Vec<serde_json::Value> = self
                .testimonials
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "title": t.title,
                        "content": t.content,
                        "rating": t.rating,
                        "customer_name": t.customer_name(),
                        "product_name": t.product.as_ref().map(|p| p.name.as_str()),
                        "is_verified": t.is_verified,
                    })
                })
                .collect();
            root.insert("testimonials".to_string(), serde_json::Value::Array(rows));
        }
        if !self.claims.is_empty() {
            root.insert(
                "claims".to_string(),
                serde_json::to_value(&self.claims).unwrap_or_default(),
            );
        }

        serde_json::Value::Object(root)
    }
}

fn product_summary(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
        "base_price": product.base_price,
        "max_coverage": product.max_coverage,
        "age_limit_min": product.age_limit_min,
        "age_limit_max": product.age_limit_max,
        "tags": product.tags,
        "features": product.features,
        "category_name": product.category.as_ref().map(|c| c.name.as_str()),
        "is_popular": product.is_popular,
        "is_new": product.is_new,
        "formatted_price": product
            .base_price
            .map(|p| format!("{}/mo", format_amount(p)))
            .unwrap_or_else(|| "price on request".to_string()),
        "formatted_coverage": product
            .max_coverage
            .map(format_amount)
            .unwrap_or_else(|| "coverage on request".to_string()),
        "target_age_group": product.target_age_group(),
        "highlights": product.highlights(),
    })
}

macro_rules! collect_or_empty {
    ($fut:expr, $what:literal) => {
        match $fut.await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, concat!("Failed to collect ", $what));
                Default::default()
            }
        }
    };
}

/// Collect the catalog slice for one page.
pub async fn collect(
    db: Option<&PostgrestClient>,
    page: PageKind,
    product_id: Option<Uuid>,
) -> PageData {
    let Some(db) = db else {
        tracing::warn!("No database client; page data collection skipped");
        return PageData::default();
    };

    let mut data = PageData::default();

    match page {
        PageKind::Home => {
            data.categories = collect_or_empty!(catalog::categories(db), "categories");
            data.popular =
                collect_or_empty!(catalog::popular_products(db, HOME_POPULAR_LIMIT), "popular products");
        }
        PageKind::Products => {
            data.categories = collect_or_empty!(catalog::categories(db), "categories");
            data.products =
                collect_or_empty!(catalog::products(db, None, PRODUCT_LIMIT), "products");
        }
        PageKind::Search => {
            data.products =
                collect_or_empty!(catalog::products(db, None, PRODUCT_LIMIT), "products");
            data.categories = collect_or_empty!(catalog::categories(db), "categories");
            data.faqs = collect_or_empty!(catalog::faqs(db, None, SEARCH_FAQ_LIMIT), "faqs");
            data.testimonials = collect_or_empty!(
                catalog::testimonials(db, None, true, SEARCH_TESTIMONIAL_LIMIT),
                "testimonials"
            );
        }
        PageKind::ProductDetail => {
            if let Some(id) = product_id {
                data.product =
                    collect_or_empty!(catalog::product_by_id(db, id), "product detail");
                data.testimonials = collect_or_empty!(
                    catalog::testimonials(db, Some(id), true, DETAIL_TESTIMONIAL_LIMIT),
                    "product testimonials"
                );
            } else {
                tracing::warn!("product_detail page requested without a product id");
            }
        }
        PageKind::Faq => {
            data.faqs = collect_or_empty!(catalog::faqs(db, None, FAQ_PAGE_LIMIT), "faqs");
        }
        PageKind::Claims => {
            data.claims = collect_or_empty!(catalog::claims(db, None, CLAIM_PAGE_LIMIT), "claims");
        }
    }

    tracing::debug!(
        page = %page,
        categories = data.categories.len(),
        products = data.products.len(),
        popular = data.popular.len(),
        faqs = data.faqs.len(),
        testimonials = data.testimonials.len(),
        claims = data.claims.len(),
        "Page data collected",
    );

    data
}
