//! RPC database backend
//!
//! Submits SQL through a PostgREST-style RPC endpoint:
//! `POST {base_url}/rest/v1/rpc/{function}` with a JSON body holding the SQL
//! text under a single named parameter. The service key is sent both as the
//! `apikey` header and as a bearer token.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Connection settings for [`RpcBackend`]
#[derive(Clone)]
pub struct RpcOptions {
    /// Project base URL
    pub base_url: String,

    /// SQL execution function name
    pub function: String,

    /// Parameter name carrying the SQL text
    pub param: String,

    /// Service-role key
    pub service_key: String,

    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl fmt::Debug for RpcOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcOptions")
            .field("base_url", &self.base_url)
            .field("function", &self.function)
            .field("param", &self.param)
            .field("service_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl fmt::Display for RemoteErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code {})", code)?;
        }
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            write!(f, "; details: {}", details)?;
        }
        if let Some(hint) = self.hint.as_deref().filter(|h| !h.is_empty()) {
            write!(f, "; hint: {}", hint)?;
        }
        Ok(())
    }
}

/// Database backend that executes SQL over HTTP RPC
pub struct RpcBackend {
    client: reqwest::Client,
    endpoint: String,
    param: String,
    service_key: String,
}

impl RpcBackend {
    /// Build a backend and its HTTP client
    pub fn new(options: RpcOptions) -> DbResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let endpoint = format!(
            "{}/rest/v1/rpc/{}",
            options.base_url.trim_end_matches('/'),
            options.function
        );

        Ok(Self {
            client,
            endpoint,
            param: options.param,
            service_key: options.service_key,
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map a non-success response to a `DbError`
fn error_from_response(status: StatusCode, body: &str) -> DbError {
    let message = match serde_json::from_str::<RemoteErrorBody>(body) {
        Ok(remote) => remote.to_string(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DbError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => DbError::RpcNotFound(message),
        _ => DbError::ExecutionError(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

#[async_trait]
impl Database for RpcBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let mut body = serde_json::Map::new();
        body.insert(
            self.param.clone(),
            serde_json::Value::String(sql.to_string()),
        );

        log::debug!("POST {} ({} bytes of SQL)", self.endpoint, sql.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        log::debug!("{} responded {}", self.endpoint, status);
        if status.is_success() {
            return Ok(());
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => format!(
                "{} (failed to read response body: {})",
                status.canonical_reason().unwrap_or("no reason phrase"),
                e
            ),
        };
        Err(error_from_response(status, &text))
    }

    fn db_type(&self) -> &'static str {
        "rpc"
    }
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
