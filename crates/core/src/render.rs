//! Server-side rendering of catalog rows into inline-styled HTML fragments.
//!
//! The presentation is deliberately varied: a style theme (palette, radius,
//! accent emoji) is picked per response, randomly unless the request profile
//! forces one. Renderers are pure given a theme, which keeps them testable.
//!
//! Invariants enforced here:
//! - inline CSS only, no class names;
//! - no `<img>` tags, emoji carry the visuals;
//! - user and catalog text is HTML-escaped before interpolation.

use rand::seq::IndexedRandom;
use serde_json::json;

use crate::catalog::{Category, Claim, Faq, Product, Testimonial};
use crate::component::UiComponent;
use crate::page::PageKind;
use crate::plan::AggregateOutcome;
use crate::profile::RequestProfile;

/// One presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTheme {
    pub name: &'static str,
    /// Primary accent color (price pills, borders).
    pub primary: &'static str,
    /// Header gradient endpoints.
    pub gradient_from: &'static str,
    pub gradient_to: &'static str,
    /// Card corner radius.
    pub radius: &'static str,
    /// Accent emoji for headers and cards.
    pub emoji: &'static str,
}

pub const CLASSIC: StyleTheme = StyleTheme {
    name: "classic",
    primary: "#667eea",
    gradient_from: "#667eea",
    gradient_to: "#764ba2",
    radius: "12px",
    emoji: "🛡️",
};

pub const PLAYFUL: StyleTheme = StyleTheme {
    name: "playful",
    primary: "#ff6b6b",
    gradient_from: "#ff6b6b",
    gradient_to: "#4ecdc4",
    radius: "20px",
    emoji: "🎈",
};

pub const MINT: StyleTheme = StyleTheme {
    name: "mint",
    primary: "#0ca678",
    gradient_from: "#38d9a9",
    gradient_to: "#0ca678",
    radius: "16px",
    emoji: "🌿",
};

pub const SUNSET: StyleTheme = StyleTheme {
    name: "sunset",
    primary: "#f76707",
    gradient_from: "#ffa94d",
    gradient_to: "#f76707",
    radius: "14px",
    emoji: "🌅",
};

/// All themes the random pick may return.
pub const THEMES: &[StyleTheme] = &[CLASSIC, PLAYFUL, MINT, SUNSET];

/// Pick a theme for one response. A playful profile forces [`PLAYFUL`];
/// otherwise the choice is random.
pub fn pick_theme(profile: Option<&RequestProfile>) -> StyleTheme {
    if profile.is_some_and(RequestProfile::wants_playful) {
        return PLAYFUL;
    }
    let mut rng = rand::rng();
    *THEMES.choose(&mut rng).unwrap_or(&CLASSIC)
}

/// Escape text for interpolation into HTML content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Format a monetary amount with thousands separators ("34,000").
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Fragment renderers
// ---------------------------------------------------------------------------

/// Page header with a gradient banner.
pub fn header(title: &str, subtitle: &str, theme: StyleTheme) -> UiComponent {
    let content = format!(
        "<div style='text-align: center; padding: 2rem; background: linear-gradient(135deg, {from} 0%, {to} 100%); color: white; border-radius: {radius};'>\
         <h1 style='margin: 0; font-size: 2rem; font-weight: 700;'>{emoji} {title}</h1>\
         <p style='margin: 1rem 0 0 0; font-size: 1.1rem;'>{subtitle}</p>\
         </div>",
        from = theme.gradient_from,
        to = theme.gradient_to,
        radius = theme.radius,
        emoji = theme.emoji,
        title = escape_html(title),
        subtitle = escape_html(subtitle),
    );

    UiComponent {
        kind: "header".to_string(),
        id: "header".to_string(),
        title: Some(title.to_string()),
        content,
        style: Some("margin-bottom: 2rem;".to_string()),
        priority: 1,
        data: json!({ "theme": theme.name }),
    }
}

fn product_card(product: &Product, theme: StyleTheme) -> String {
    let price = match product.base_price {
        Some(p) => format!("{}/mo", format_amount(p)),
        None => "price on request".to_string(),
    };
    let coverage = match product.max_coverage {
        Some(c) => format!("max coverage {}", format_amount(c)),
        None => "coverage on request".to_string(),
    };
    let description = product.description.as_deref().unwrap_or("");
    let highlights = product.highlights();
    let highlight_line = if highlights.is_empty() {
        String::new()
    } else {
        format!(
            "<div style='margin-top: 0.8rem; color: {primary}; font-size: 0.9rem;'>{}</div>",
            escape_html(&highlights.join(" · ")),
            primary = theme.primary,
        )
    };

    format!(
        "<div style='background: white; padding: 1.5rem; border-radius: {radius}; box-shadow: 0 4px 12px rgba(0,0,0,0.1); border: 2px solid {primary};'>\
         <h3 style='margin: 0 0 1rem 0; color: #333; font-size: 1.4rem;'>{emoji} {name}</h3>\
         <div style='margin-bottom: 1rem;'>\
         <span style='background: {primary}; color: white; padding: 0.6rem 1.1rem; border-radius: 25px; font-size: 1.1rem; font-weight: 600;'>{price}</span>\
         </div>\
         <p style='color: #666; margin-bottom: 1rem; line-height: 1.6;'>{description}</p>\
         <div style='background: #f8f9fa; padding: 1rem; border-radius: 8px;'>\
         <strong style='color: #333;'>ages {age_min}-{age_max}</strong><br>\
         <strong style='color: #333;'>{coverage}</strong>\
         </div>{highlight_line}\
         </div>",
        radius = theme.radius,
        primary = theme.primary,
        emoji = theme.emoji,
        name = escape_html(&product.name),
        price = escape_html(&price),
        description = escape_html(description),
        age_min = product.age_limit_min,
        age_max = product.age_limit_max,
        coverage = escape_html(&coverage),
    )
}

/// Product results as a responsive card grid.
pub fn product_grid(products: &[Product], theme: StyleTheme) -> UiComponent {
    let cards: Vec<String> = products.iter().map(|p| product_card(p, theme)).collect();
    let content = format!(
        "<div style='display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 1.5rem;'>{}</div>",
        cards.join("")
    );

    UiComponent {
        kind: "section".to_string(),
        id: "products".to_string(),
        title: Some(format!("{} matching products", products.len())),
        content,
        style: Some("padding: 2rem; background: #f8f9fa; border-radius: 16px;".to_string()),
        priority: 2,
        data: json!({ "source": "insurance_products", "count": products.len() }),
    }
}

/// Category chips in a single strip.
pub fn category_strip(categories: &[Category], theme: StyleTheme) -> UiComponent {
    let chips: Vec<String> = categories
        .iter()
        .map(|c| {
            format!(
                "<span style='background: white; border: 1px solid {primary}; color: {primary}; padding: 0.5rem 1rem; border-radius: 20px; font-size: 0.95rem;'>{}</span>",
                escape_html(&c.name),
                primary = theme.primary,
            )
        })
        .collect();
    let content = format!(
        "<div style='display: flex; flex-wrap: wrap; gap: 0.6rem;'>{}</div>",
        chips.join("")
    );

    UiComponent {
        kind: "section".to_string(),
        id: "categories".to_string(),
        title: Some("Browse by category".to_string()),
        content,
        style: Some("padding: 1rem 0;".to_string()),
        priority: 2,
        data: json!({ "source": "insurance_categories", "count": categories.len() }),
    }
}

/// FAQ accordion-style list.
pub fn faq_list(faqs: &[Faq], theme: StyleTheme) -> UiComponent {
    let items: Vec<String> = faqs
        .iter()
        .map(|f| {
            format!(
                "<div style='background: white; padding: 1.2rem; border-radius: {radius}; border-left: 4px solid {primary}; margin-bottom: 1rem;'>\
                 <h4 style='margin: 0 0 0.6rem 0; color: #333;'>❓ {question}</h4>\
                 <p style='margin: 0; color: #666; line-height: 1.6;'>{answer}</p>\
                 </div>",
                radius = theme.radius,
                primary = theme.primary,
                question = escape_html(&f.question),
                answer = escape_html(&f.answer),
            )
        })
        .collect();

    UiComponent {
        kind: "section".to_string(),
        id: "faqs".to_string(),
        title: Some("Frequently asked questions".to_string()),
        content: format!("<div>{}</div>", items.join("")),
        style: Some("margin-top: 1rem;".to_string()),
        priority: 3,
        data: json!({ "source": "faqs", "count": faqs.len() }),
    }
}

fn stars(rating: Option<f32>) -> String {
    match rating {
        Some(r) => {
            let full = (r.round().clamp(0.0, 5.0)) as usize;
            format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
        }
        None => "unrated".to_string(),
    }
}

/// Customer testimonial list.
pub fn testimonial_list(testimonials: &[Testimonial], theme: StyleTheme) -> UiComponent {
    let items: Vec<String> = testimonials
        .iter()
        .map(|t| {
            let title = t.title.as_deref().unwrap_or("Customer review");
            let product = t
                .product
                .as_ref()
                .map(|p| format!(" on {}", escape_html(&p.name)))
                .unwrap_or_default();
            format!(
                "<div style='background: white; padding: 1.2rem; border-radius: {radius}; box-shadow: 0 2px 8px rgba(0,0,0,0.08); margin-bottom: 1rem;'>\
                 <h4 style='margin: 0 0 0.4rem 0; color: #333;'>{title}</h4>\
                 <div style='color: {primary}; margin-bottom: 0.6rem;'>{stars}</div>\
                 <p style='margin: 0 0 0.6rem 0; color: #666; line-height: 1.6;'>{content}</p>\
                 <span style='color: #999; font-size: 0.85rem;'>— {customer}{product}</span>\
                 </div>",
                radius = theme.radius,
                primary = theme.primary,
                title = escape_html(title),
                stars = stars(t.rating),
                content = escape_html(&t.content),
                customer = escape_html(t.customer_name()),
            )
        })
        .collect();

    UiComponent {
        kind: "section".to_string(),
        id: "testimonials".to_string(),
        title: Some("What customers say".to_string()),
        content: format!("<div>{}</div>", items.join("")),
        style: Some("margin-top: 1rem;".to_string()),
        priority: 4,
        data: json!({ "source": "customer_testimonials", "count": testimonials.len() }),
    }
}

/// Claim status rows.
pub fn claim_list(claims: &[Claim], theme: StyleTheme) -> UiComponent {
    let items: Vec<String> = claims
        .iter()
        .map(|c| {
            let amount = c
                .amount
                .map(|a| format_amount(a))
                .unwrap_or_else(|| "—".to_string());
            let filed = c
                .filed_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "—".to_string());
            format!(
                "<div style='display: flex; justify-content: space-between; background: white; padding: 1rem 1.2rem; border-radius: {radius}; border: 1px solid #e0e0e0; margin-bottom: 0.8rem;'>\
                 <span style='color: #333; font-weight: 600;'>{claim_type}</span>\
                 <span style='color: {primary};'>{status}</span>\
                 <span style='color: #666;'>{amount}</span>\
                 <span style='color: #999;'>{filed}</span>\
                 </div>",
                radius = theme.radius,
                primary = theme.primary,
                claim_type = escape_html(&c.claim_type),
                status = escape_html(&c.status),
                amount = escape_html(&amount),
                filed = filed,
            )
        })
        .collect();

    UiComponent {
        kind: "section".to_string(),
        id: "claims".to_string(),
        title: Some("Claims".to_string()),
        content: format!("<div>{}</div>", items.join("")),
        style: Some("margin-top: 1rem;".to_string()),
        priority: 2,
        data: json!({ "source": "insurance_claims", "count": claims.len() }),
    }
}

/// Single-value stat panel for aggregate plans.
pub fn stat_panel(outcome: &AggregateOutcome, theme: StyleTheme) -> UiComponent {
    use crate::plan::Aggregate;
    let value = match outcome.aggregate {
        Aggregate::Count => format!("{}", outcome.value as i64),
        Aggregate::AvgRating => format!("{:.1} / 5", outcome.value),
        _ => format_amount(outcome.value),
    };
    let content = format!(
        "<div style='text-align: center; padding: 2.5rem; background: white; border-radius: {radius}; border: 2px solid {primary};'>\
         <div style='font-size: 3rem; font-weight: 800; color: {primary};'>{value}</div>\
         <div style='margin-top: 0.6rem; color: #666; font-size: 1.1rem;'>{label} ({samples} rows)</div>\
         </div>",
        radius = theme.radius,
        primary = theme.primary,
        value = escape_html(&value),
        label = outcome.aggregate.label(),
        samples = outcome.samples,
    );

    UiComponent {
        kind: "section".to_string(),
        id: "aggregate".to_string(),
        title: Some(outcome.aggregate.label().to_string()),
        content,
        style: Some("margin-top: 1rem;".to_string()),
        priority: 2,
        data: json!({ "aggregate": outcome }),
    }
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

fn notice(id: &str, title: &str, body: &str) -> UiComponent {
    UiComponent {
        kind: "notice".to_string(),
        id: id.to_string(),
        title: Some(title.to_string()),
        content: format!(
            "<div style='text-align: center; padding: 2rem;'><p style='color: #4a5568; line-height: 1.8;'>{}</p></div>",
            escape_html(body)
        ),
        style: Some("background: #f7fafc; border-radius: 12px;".to_string()),
        priority: 1,
        data: json!({ "source": "fallback" }),
    }
}

/// Static components served when the LLM is unavailable or returned
/// something unusable.
pub fn fallback_page(page: PageKind) -> Vec<UiComponent> {
    match page {
        PageKind::Home => vec![UiComponent {
            kind: "section".to_string(),
            id: "hero".to_string(),
            title: Some("Coverage you can count on".to_string()),
            content: "<div style='text-align: center; padding: 3rem 2rem; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border-radius: 20px;'>\
                      <h1 style='font-size: 2.5rem; font-weight: 900; margin: 0 0 1rem 0;'>🛡️ Protect what matters</h1>\
                      <p style='font-size: 1.2rem; line-height: 1.8; margin: 1rem 0;'>Straightforward insurance for your family, health, and future.</p>\
                      <div style='margin-top: 2rem;'><span style='background: rgba(255,255,255,0.2); padding: 1rem 2rem; border-radius: 50px; font-size: 1.1rem;'>💰 Solid coverage from 20,000/mo</span></div>\
                      </div>"
                .to_string(),
            style: Some("margin-bottom: 2rem;".to_string()),
            priority: 1,
            data: json!({ "source": "fallback" }),
        }],
        PageKind::Search => vec![notice(
            "search_notice",
            "Personalized search",
            "We are matching your request against our catalog. Please try again in a moment.",
        )],
        PageKind::Products => vec![notice(
            "products_notice",
            "Product catalog",
            "The product catalog is being refreshed. Please try again shortly.",
        )],
        PageKind::Faq => vec![notice(
            "faq_notice",
            "Frequently asked questions",
            "Our FAQ library is temporarily unavailable.",
        )],
        PageKind::Claims => vec![notice(
            "claims_notice",
            "Claims",
            "Claim information is temporarily unavailable.",
        )],
        PageKind::ProductDetail => vec![notice(
            "detail_notice",
            "Product details",
            "Product details are temporarily unavailable.",
        )],
    }
}

/// Empty-result component for plans that matched nothing.
pub fn empty_notice(subject: &str) -> UiComponent {
    let mut component = notice(
        "empty",
        "No matches",
        &format!("Nothing in our {subject} matched your request. Try a broader question."),
    );
    component.priority = 2;
    component
}

/// Generic error component for responses assembled after a failure.
pub fn error_notice() -> UiComponent {
    notice(
        "error",
        "Temporary hiccup",
        "Something went wrong while building this page. Please try again shortly.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Aggregate, AggregateOutcome};
    use uuid::Uuid;

    fn sample_product() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Kids <Dental> Shield".into(),
            description: Some("Dental cover & more".into()),
            base_price: Some(12_000.0),
            max_coverage: Some(50_000_000.0),
            age_limit_min: 3,
            age_limit_max: 18,
            tags: vec![],
            features: vec![],
            is_popular: true,
            is_new: false,
            category_id: None,
            category: None,
        }
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(12_000.0), "12,000");
        assert_eq!(format_amount(50_000_000.0), "50,000,000");
        assert_eq!(format_amount(-1234.0), "-1,234");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn product_grid_escapes_and_counts() {
        let component = product_grid(&[sample_product()], CLASSIC);
        assert!(component.content.contains("&lt;Dental&gt;"));
        assert!(component.content.contains("12,000/mo"));
        assert!(!component.content.contains("<img"));
        assert_eq!(component.data["count"], 1);
    }

    #[test]
    fn header_uses_theme_gradient() {
        let component = header("Results", "for you", PLAYFUL);
        assert!(component.content.contains(PLAYFUL.gradient_from));
        assert!(component.content.contains("🎈"));
        assert_eq!(component.priority, 1);
    }

    #[test]
    fn playful_profile_forces_playful_theme() {
        let profile = crate::profile::analyze("cute plans for my 5 year old");
        assert_eq!(pick_theme(Some(&profile)), PLAYFUL);
    }

    #[test]
    fn stat_panel_formats_by_aggregate() {
        let count = AggregateOutcome {
            aggregate: Aggregate::Count,
            value: 12.0,
            samples: 12,
        };
        assert!(stat_panel(&count, CLASSIC).content.contains(">12<"));

        let rating = AggregateOutcome {
            aggregate: Aggregate::AvgRating,
            value: 4.25,
            samples: 8,
        };
        assert!(stat_panel(&rating, CLASSIC).content.contains("4.2 / 5"));
    }

    #[test]
    fn stars_round_and_clamp() {
        assert_eq!(stars(Some(4.4)), "★★★★☆");
        assert_eq!(stars(Some(9.0)), "★★★★★");
        assert_eq!(stars(None), "unrated");
    }

    #[test]
    fn every_fallback_page_has_components() {
        for page in [
            PageKind::Home,
            PageKind::Products,
            PageKind::Search,
            PageKind::ProductDetail,
            PageKind::Faq,
            PageKind::Claims,
        ] {
            let components = fallback_page(page);
            assert!(!components.is_empty(), "{page}");
            for c in &components {
                assert!(!c.content.contains("<img"));
                assert!(c.style.is_some());
            }
        }
    }
}
