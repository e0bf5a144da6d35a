//! HTTP client for the hosted database's REST interface.

use serde::de::DeserializeOwned;

use crate::query::TableQuery;

/// Errors from the hosted-database layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The database returned a non-2xx status code.
    #[error("Database API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not decode into the expected row type.
    #[error("Row decode error: {0}")]
    Decode(String),
}

/// Client for one hosted database project.
///
/// Holds the project base URL and the API key. The anon key is preferred;
/// deployments without one fall back to the service-role key (same header
/// scheme either way).
#[derive(Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    /// Create a new client.
    ///
    /// * `base_url` - project URL, e.g. `https://xyz.supabase.co`.
    /// * `api_key`  - anon or service-role key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across collaborators).
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a table read and decode the rows.
    pub async fn rows<T: DeserializeOwned>(&self, query: TableQuery) -> Result<Vec<T>, DbError> {
        let table = query.table();
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let params = query.into_params();

        let response = self
            .http
            .get(&url)
            .query(&params)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DbError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let rows: Vec<T> = serde_json::from_str(&body)
            .map_err(|e| DbError::Decode(format!("{table}: {e}")))?;

        tracing::debug!(table, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PostgrestClient::new("https://xyz.supabase.co/", "key");
        assert_eq!(client.base_url(), "https://xyz.supabase.co");
    }
}
