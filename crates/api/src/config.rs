//! Configuration loaded from environment variables.
//!
//! Server settings always resolve (with development defaults). The two
//! external collaborators are optional: a missing URL or key puts the
//! server in degraded mode instead of aborting startup.

use autoux_llm::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Hosted-database credentials.
///
/// | Env Var                     | Notes                              |
/// |-----------------------------|------------------------------------|
/// | `SUPABASE_URL`              | project URL, required              |
/// | `SUPABASE_ANON_KEY`         | preferred key                      |
/// | `SUPABASE_SERVICE_ROLE_KEY` | fallback when no anon key is set   |
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub api_key: String,
}

impl DatabaseConfig {
    /// Returns `None` when the URL or both keys are missing (degraded mode).
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok()?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .or_else(|_| std::env::var("SUPABASE_SERVICE_ROLE_KEY"))
            .ok()?;
        Some(Self { url, api_key })
    }
}

/// LLM provider settings.
///
/// | Env Var              | Default                     |
/// |----------------------|-----------------------------|
/// | `OPENAI_API_KEY`     | required                    |
/// | `OPENAI_MODEL`       | `gpt-3.5-turbo`             |
/// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
/// | `OPENAI_TEMPERATURE` | `0.7`                       |
/// | `OPENAI_MAX_TOKENS`  | `2000`                      |
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Returns `None` when `OPENAI_API_KEY` is missing (degraded mode).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let temperature: f32 = std::env::var("OPENAI_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".into())
            .parse()
            .expect("OPENAI_TEMPERATURE must be a valid f32");

        let max_tokens: u32 = std::env::var("OPENAI_MAX_TOKENS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("OPENAI_MAX_TOKENS must be a valid u32");

        Some(Self {
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }
}
