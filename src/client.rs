//! Identity endpoint client.
//!
//! One trait method behind which the real HTTP fetch lives, so tests can
//! substitute a scripted endpoint.

use crate::constants::endpoint;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client")
    })
}

/// Fetches the current client principal from the identity endpoint.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn fetch_principal(&self) -> Result<Value>;
}

/// GET against an App Service style `/.auth/me` endpoint.
///
/// No request body, no custom headers, no retries; the auth layer
/// identifies the caller from its own session cookie handling.
pub struct HttpIdentityClient {
    url: String,
    timeout_ms: u64,
}

impl HttpIdentityClient {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            url: url.into(),
            timeout_ms,
        }
    }
}

impl Default for HttpIdentityClient {
    fn default() -> Self {
        Self::new(
            endpoint::DEFAULT_AUTH_ME_URL,
            endpoint::DEFAULT_FETCH_TIMEOUT_MS,
        )
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn fetch_principal(&self) -> Result<Value> {
        log::debug!("[client] GET {}", self.url);

        let response = http_client()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(anyhow!("identity endpoint returned {status}: {body}"));
        }

        let body: Value = response
            .json()
            .await
            .context("identity response was not valid JSON")?;
        log::debug!("[client] raw principal body: {body}");
        Ok(body)
    }
}
