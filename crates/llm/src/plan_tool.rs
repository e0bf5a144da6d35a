//! The query-plan extraction tool.
//!
//! The function schema mirrors [`QueryPlan`] field for field; the model
//! fills it instead of writing SQL. Deserialization happens here, plan
//! validation stays with the caller so unsupported shapes surface as domain
//! errors rather than transport errors.

use serde_json::json;

use autoux_core::plan::QueryPlan;

use crate::client::{LlmError, ToolCallResult, ToolDefinition};

/// Name of the plan-extraction function.
pub const PLAN_TOOL_NAME: &str = "plan_catalog_query";

/// Build the tool definition for query-plan extraction.
pub fn plan_tool() -> ToolDefinition {
    ToolDefinition {
        name: PLAN_TOOL_NAME,
        description: "Translate the user's question into a structured read \
                      against the insurance catalog: pick a table, filters, \
                      an optional aggregate, and a row limit.",
        parameters: json!({
            "type": "object",
            "properties": {
                "table": {
                    "type": "string",
                    "enum": ["products", "categories", "faqs", "testimonials", "claims"],
                    "description": "Which table answers the question."
                },
                "filters": {
                    "type": "array",
                    "description": "Predicates to apply, possibly empty.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "kind": {
                                "type": "string",
                                "enum": [
                                    "age_eligible",
                                    "keyword",
                                    "category",
                                    "verified_only",
                                    "price_at_most",
                                    "price_at_least"
                                ]
                            },
                            "age": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": 100,
                                "description": "For age_eligible: the person's age."
                            },
                            "term": {
                                "type": "string",
                                "description": "For keyword: a single search term."
                            },
                            "name": {
                                "type": "string",
                                "description": "For category: the category name."
                            },
                            "amount": {
                                "type": "number",
                                "description": "For price_at_most / price_at_least: monthly premium bound."
                            }
                        },
                        "required": ["kind"]
                    }
                },
                "aggregate": {
                    "type": ["string", "null"],
                    "enum": ["count", "avg_price", "min_price", "max_price", "avg_rating", null],
                    "description": "Set when the question asks for a number, not rows."
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 50,
                    "description": "How many rows to return."
                }
            },
            "required": ["table"]
        }),
    }
}

/// Decode tool-call arguments into a [`QueryPlan`].
///
/// Only decoding: the caller still runs [`QueryPlan::validate`] so that
/// unsupported combinations map to a 422, not a 502.
pub fn plan_from_tool_call(result: &ToolCallResult) -> Result<QueryPlan, LlmError> {
    serde_json::from_value(result.arguments.clone())
        .map_err(|e| LlmError::InvalidArguments(e.to_string()))
}
