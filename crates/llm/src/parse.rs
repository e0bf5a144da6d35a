//! Turning free-text LLM output into typed components.
//!
//! Models wrap the requested JSON array in prose or code fences more often
//! than not, so the first `[...]` block is extracted with a DOTALL regex and
//! decoded item by item with per-field defaults.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use autoux_core::component::UiComponent;

use crate::client::LlmError;

fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("static regex"))
}

/// Loosely shaped component as the model tends to produce it.
#[derive(Deserialize)]
struct RawComponent {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    style: Option<String>,
    priority: Option<i32>,
    #[serde(default)]
    data: serde_json::Value,
}

/// Extract and decode the component array from raw model output.
///
/// Items missing an id or priority get positional defaults; items without
/// content are dropped (an empty fragment renders as nothing and usually
/// signals a half-finished item).
pub fn components_from_text(text: &str) -> Result<Vec<UiComponent>, LlmError> {
    let json_block = array_regex()
        .find(text)
        .ok_or_else(|| LlmError::Unparseable("no JSON array in output".to_string()))?
        .as_str();

    let raw: Vec<RawComponent> = serde_json::from_str(json_block)
        .map_err(|e| LlmError::Unparseable(e.to_string()))?;

    let components: Vec<UiComponent> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let content = item.content.filter(|c| !c.trim().is_empty())?;
            Some(UiComponent {
                kind: item.kind.unwrap_or_else(|| "div".to_string()),
                id: item.id.unwrap_or_else(|| format!("ai_comp_{i}")),
                title: item.title,
                content,
                style: item.style,
                priority: item.priority.unwrap_or(i as i32 + 1),
                data: item.data,
            })
        })
        .collect();

    if components.is_empty() {
        return Err(LlmError::Unparseable(
            "component array decoded to nothing usable".to_string(),
        ));
    }

    tracing::debug!(count = components.len(), "Parsed components from LLM output");
    Ok(components)
}
