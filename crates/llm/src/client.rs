//! HTTP client for the chat-completions API.

use serde::Deserialize;
use serde_json::json;

/// Default chat model when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Errors from the LLM layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response carried no usable choice.
    #[error("LLM returned no choices")]
    EmptyResponse,

    /// A tool call was requested but the response contains none.
    #[error("No tool call in LLM response")]
    MissingToolCall,

    /// Tool-call arguments did not parse as the expected JSON.
    #[error("Malformed tool arguments: {0}")]
    InvalidArguments(String),

    /// The free-text response did not contain a usable component array.
    #[error("Unparseable LLM output: {0}")]
    Unparseable(String),
}

/// A function the model may be forced to call.
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the arguments.
    pub parameters: serde_json::Value,
}

/// Parsed tool-call result.
#[derive(Debug)]
pub struct ToolCallResult {
    pub tool_name: String,
    pub arguments: serde_json::Value,
}

/// Client for one chat-completions provider.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Point at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override sampling parameters.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Free-form chat; returns the assistant message text.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let response: ChatResponse = self.post(&body).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(content)
    }

    /// Chat with a single tool the model is forced to call; returns the
    /// decoded tool arguments.
    pub async fn chat_with_tool(
        &self,
        system: &str,
        user: &str,
        tool: &ToolDefinition,
    ) -> Result<ToolCallResult, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            // Plan extraction wants determinism, not creativity.
            "temperature": 0.1,
            "max_tokens": self.max_tokens,
            "tools": [{
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                },
            }],
            "tool_choice": { "type": "function", "function": { "name": tool.name } },
        });

        let response: ChatResponse = self.post(&body).await?;
        let tool_call = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .ok_or(LlmError::MissingToolCall)?;

        // The wire format carries arguments as a JSON string.
        let arguments: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .map_err(|e| LlmError::InvalidArguments(e.to_string()))?;

        tracing::debug!(tool = %tool_call.function.name, "Tool call returned");

        Ok(ToolCallResult {
            tool_name: tool_call.function.name,
            arguments,
        })
    }

    async fn post(&self, body: &serde_json::Value) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

// ---- wire types -----------------------------------------------------------

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    /// JSON-encoded arguments string.
    arguments: String,
}
