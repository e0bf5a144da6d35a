use std::sync::Arc;

use autoux_db::PostgrestClient;
use autoux_llm::ChatClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`). Both external
/// collaborators are optional: `None` means the server runs in degraded
/// mode for that concern (fallback UI, 503 on direct reads).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted-database client, when credentials were configured.
    pub db: Option<Arc<PostgrestClient>>,
    /// LLM client, when an API key was configured.
    pub llm: Option<Arc<ChatClient>>,
}
