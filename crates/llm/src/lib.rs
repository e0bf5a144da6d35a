//! Chat-completions client for the LLM provider.
//!
//! Two call shapes: free-form chat for layout generation, and forced
//! function calling for query-plan extraction. The wire format is the
//! OpenAI-compatible `/chat/completions` schema, so any provider speaking
//! it works by overriding the base URL.

pub mod client;
pub mod parse;
pub mod plan_tool;
pub mod prompt;

pub use client::{ChatClient, LlmError, ToolCallResult, ToolDefinition};
