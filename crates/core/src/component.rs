//! UI component and response envelope types.
//!
//! A [`UiComponent`] is one HTML fragment the frontend drops into the page:
//! a type tag, a stable id, inline-styled content, and a render priority.
//! [`UxResponse`] is the full generation result, including the layout and
//! accessibility metadata the frontend uses to arrange the fragments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_priority() -> i32 {
    1
}

/// One dynamically generated UI fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiComponent {
    /// Semantic tag: `header`, `section`, `article`, `notice`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Inline-styled HTML. Never contains `<img>` tags.
    pub content: String,
    /// Extra inline CSS applied to the component wrapper.
    #[serde(default)]
    pub style: Option<String>,
    /// Render order; lower renders first.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Free-form provenance payload (source table, query echo, plan echo).
    #[serde(default)]
    pub data: serde_json::Value,
}

/// How the frontend should arrange the components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutHints {
    pub layout_type: String,
    pub spacing: String,
    /// Component ids in render order.
    pub component_order: Vec<String>,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            layout_type: "stack".to_string(),
            spacing: "medium".to_string(),
            component_order: Vec::new(),
        }
    }
}

/// Accessibility switches derived from the request profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityHints {
    pub high_contrast: bool,
    pub large_text: bool,
}

/// Full response of the UI generation endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UxResponse {
    pub components: Vec<UiComponent>,
    pub layout: LayoutHints,
    pub accessibility: AccessibilityHints,
    /// Number of products backing the response, when products were involved.
    pub total_products: Option<usize>,
    pub generated_at: DateTime<Utc>,
    /// Whether the LLM produced the layout (false on fallback paths).
    pub ai_generated: bool,
}

impl UxResponse {
    /// Assemble a response: sorts components by priority and derives the
    /// layout order from the sorted ids.
    pub fn new(
        mut components: Vec<UiComponent>,
        accessibility: AccessibilityHints,
        total_products: Option<usize>,
        ai_generated: bool,
    ) -> Self {
        components.sort_by_key(|c| c.priority);
        let layout = LayoutHints {
            component_order: components.iter().map(|c| c.id.clone()).collect(),
            ..LayoutHints::default()
        };
        Self {
            components,
            layout,
            accessibility,
            total_products,
            generated_at: Utc::now(),
            ai_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, priority: i32) -> UiComponent {
        UiComponent {
            kind: "section".into(),
            id: id.into(),
            title: None,
            content: "<div></div>".into(),
            style: None,
            priority,
            data: serde_json::Value::Null,
        }
    }

    #[test]
    fn response_sorts_by_priority_and_orders_layout() {
        let response = UxResponse::new(
            vec![component("b", 2), component("a", 1), component("c", 3)],
            AccessibilityHints::default(),
            None,
            false,
        );
        assert_eq!(response.layout.component_order, vec!["a", "b", "c"]);
        assert_eq!(response.components[0].id, "a");
        assert_eq!(response.layout.layout_type, "stack");
    }

    #[test]
    fn component_deserializes_with_defaults() {
        let c: UiComponent = serde_json::from_value(serde_json::json!({
            "type": "header",
            "id": "h1",
            "content": "<h1>hi</h1>"
        }))
        .unwrap();
        assert_eq!(c.priority, 1);
        assert!(c.style.is_none());
        assert!(c.data.is_null());
    }
}
