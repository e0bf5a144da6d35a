//! LLM-backed page generation with static fallback.
//!
//! The happy path asks the model for a component array built from the
//! collected catalog slice. Every failure mode (no client, upstream error,
//! unparseable output) degrades to the static fallback page and flips
//! `ai_generated` off; generation itself never errors a request.

use autoux_core::component::{AccessibilityHints, UxResponse};
use autoux_core::page::PageKind;
use autoux_core::profile::{self, RequestProfile, SizeHint, StyleHint};
use autoux_core::render;
use autoux_llm::{parse, prompt, ChatClient};

use crate::engine::collector::PageData;

/// Accessibility switches derived from the request profile.
pub fn accessibility_hints(profile: &RequestProfile) -> AccessibilityHints {
    AccessibilityHints {
        high_contrast: profile.style == Some(StyleHint::Readable),
        large_text: profile.size == Some(SizeHint::Large),
    }
}

/// Generate a page layout. Falls back to static components when the LLM is
/// missing or misbehaves.
pub async fn generate_page(
    llm: Option<&ChatClient>,
    page: PageKind,
    data: &PageData,
    requirements: Option<&str>,
) -> UxResponse {
    let requirements = requirements.unwrap_or("").trim();
    let profile = profile::analyze(requirements);
    let accessibility = accessibility_hints(&profile);
    let total_products = data.total_products();

    let Some(llm) = llm else {
        tracing::warn!(page = %page, "No LLM client; serving fallback page");
        return UxResponse::new(
            render::fallback_page(page),
            accessibility,
            total_products,
            false,
        );
    };

    let data_json = serde_json::to_string_pretty(&data.to_prompt_json())
        .unwrap_or_else(|_| "{}".to_string());

    let (system, user) = if page == PageKind::Search {
        (
            prompt::search_system_prompt(),
            prompt::search_user_prompt(requirements, &data_json, &profile.summary()),
        )
    } else {
        let requirements = if requirements.is_empty() {
            format!("a friendly, inviting {page} page")
        } else {
            requirements.to_string()
        };
        (
            prompt::page_system_prompt(),
            prompt::page_user_prompt(page, &data_json, &requirements),
        )
    };

    let components = match llm.chat(system, &user).await {
        Ok(text) => match parse::components_from_text(&text) {
            Ok(components) => Some(components),
            Err(e) => {
                tracing::warn!(page = %page, error = %e, "Unparseable LLM layout; falling back");
                None
            }
        },
        Err(e) => {
            tracing::error!(page = %page, error = %e, "LLM layout generation failed; falling back");
            None
        }
    };

    match components {
        Some(components) => UxResponse::new(components, accessibility, total_products, true),
        None => UxResponse::new(
            render::fallback_page(page),
            accessibility,
            total_products,
            false,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_llm_serves_fallback() {
        let data = PageData::default();
        let response = generate_page(None, PageKind::Home, &data, None).await;
        assert!(!response.ai_generated);
        assert!(!response.components.is_empty());
        assert_eq!(response.components[0].id, "hero");
    }

    #[tokio::test]
    async fn accessibility_follows_profile() {
        let data = PageData::default();
        let response =
            generate_page(None, PageKind::Search, &data, Some("large text please")).await;
        assert!(response.accessibility.large_text);
        assert!(!response.accessibility.high_contrast);
    }

    #[test]
    fn readable_profile_sets_high_contrast() {
        let profile = profile::analyze("easy to read please");
        let hints = accessibility_hints(&profile);
        assert!(hints.high_contrast);
        assert!(!hints.large_text);
    }
}
