//! Row types mirrored from the hosted datastore.
//!
//! These records are read-only from this system's point of view: the hosted
//! database owns their lifecycle and enforces whatever invariants exist.
//! Embedded relations (`insurance_categories(...)`, `users(name)`) arrive as
//! nested objects when the select list asks for them, so they are optional
//! on every row type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_age_max() -> i32 {
    100
}

/// An insurance product category (`insurance_categories`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Embedded category projection on a product row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// An insurance product (`insurance_products`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Monthly premium.
    #[serde(default)]
    pub base_price: Option<f64>,
    /// Maximum payout.
    #[serde(default)]
    pub max_coverage: Option<f64>,
    #[serde(default)]
    pub age_limit_min: i32,
    #[serde(default = "default_age_max")]
    pub age_limit_max: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// Present when the select list embeds `insurance_categories(...)`.
    #[serde(default, rename = "insurance_categories")]
    pub category: Option<CategoryRef>,
}

impl Product {
    /// Whether a person of `age` falls inside the enrollment window.
    pub fn age_eligible(&self, age: u8) -> bool {
        let age = i32::from(age);
        self.age_limit_min <= age && age <= self.age_limit_max
    }

    /// Human-readable target age band, derived from the enrollment window.
    pub fn target_age_group(&self) -> String {
        let (min, max) = (self.age_limit_min, self.age_limit_max);
        if min <= 20 && max >= 29 {
            "fits 20s".to_string()
        } else if min <= 30 && max >= 39 {
            "fits 30s".to_string()
        } else if min <= 40 && max >= 49 {
            "fits 40s".to_string()
        } else if min <= 19 {
            "fits teens and early 20s".to_string()
        } else if max >= 60 {
            "fits seniors".to_string()
        } else {
            format!("enrollment {min}-{max}")
        }
    }

    /// Short selling points surfaced on cards and fed to the prompt.
    /// At most four entries.
    pub fn highlights(&self) -> Vec<String> {
        let mut highlights = Vec::new();

        if self.is_popular {
            highlights.push("popular pick".to_string());
        }
        if self.is_new {
            highlights.push("new product".to_string());
        }

        if let Some(price) = self.base_price {
            if price > 0.0 && price < 30_000.0 {
                highlights.push("budget premium".to_string());
            } else if price > 100_000.0 {
                highlights.push("premium tier".to_string());
            }
        }

        if let Some(coverage) = self.max_coverage {
            if coverage >= 100_000_000.0 {
                highlights.push("high coverage".to_string());
            } else if coverage >= 50_000_000.0 {
                highlights.push("solid coverage".to_string());
            }
        }

        // Short feature strings only; long marketing copy stays off cards.
        for feature in self.features.iter().filter(|f| f.chars().count() < 20).take(2) {
            highlights.push(feature.clone());
        }

        highlights.truncate(4);
        highlights
    }
}

/// A frequently asked question (`faqs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// Embedded customer projection on a testimonial row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
}

/// Embedded product projection on a testimonial row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub name: String,
}

/// A customer testimonial (`customer_testimonials`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    /// Present when the select list embeds `users(name)`.
    #[serde(default, rename = "users")]
    pub customer: Option<UserRef>,
    /// Present when the select list embeds `insurance_products(name)`.
    #[serde(default, rename = "insurance_products")]
    pub product: Option<ProductRef>,
}

impl Testimonial {
    /// Display name for the reviewer; anonymous rows render as "customer".
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("customer", |u| u.name.as_str())
    }
}

/// An insurance claim (`insurance_claims`). Read-only listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub claim_type: String,
    pub status: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub filed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub product_id: Option<Uuid>,
}
