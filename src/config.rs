use crate::constants::{endpoint, lifecycle};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;

/// AuthBridge - identity claims bridge runner
///
/// Fetches the authenticated client principal from the identity endpoint and
/// republishes the extracted claims as a reactive input update.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "authbridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Identity claims bridge", long_about = None)]
pub struct CliArgs {
    /// Identity "who am I" endpoint URL
    #[arg(long, env = "AUTH_ME_URL")]
    pub auth_me_url: Option<String>,

    /// Identity request timeout in milliseconds (1000-60000)
    #[arg(long, env = "FETCH_TIMEOUT_MS")]
    pub fetch_timeout_ms: Option<u64>,

    /// How long to wait for the host ready signal before warning, in
    /// milliseconds (1000-120000)
    #[arg(long, env = "READY_TIMEOUT_MS")]
    pub ready_timeout_ms: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub auth_me_url: String,
    pub fetch_timeout_ms: u64,
    pub ready_timeout_ms: u64,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    let args = CliArgs::parse();

    let auth_me_url = args
        .auth_me_url
        .or_else(|| env::var("AUTH_ME_URL").ok())
        .unwrap_or_else(|| endpoint::DEFAULT_AUTH_ME_URL.to_string());
    validate_url(&auth_me_url, "AUTH_ME_URL")?;

    let fetch_timeout_ms = args
        .fetch_timeout_ms
        .or_else(|| {
            env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(endpoint::DEFAULT_FETCH_TIMEOUT_MS);
    let fetch_timeout_ms = validate_in_range(fetch_timeout_ms, 1000, 60000, "FETCH_TIMEOUT_MS")?;

    let ready_timeout_ms = args
        .ready_timeout_ms
        .or_else(|| {
            env::var("READY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(lifecycle::DEFAULT_READY_TIMEOUT_MS);
    let ready_timeout_ms = validate_in_range(ready_timeout_ms, 1000, 120_000, "READY_TIMEOUT_MS")?;

    Ok(Config {
        auth_me_url,
        fetch_timeout_ms,
        ready_timeout_ms,
    })
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}
