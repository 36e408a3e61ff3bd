//! Proxied page retrieval with a bounded, sequential retry loop.
//!
//! The resolver never fetches the target origin directly: the normalized
//! URL is percent-encoded and appended to the configured read-through
//! proxy base, and the proxy's raw body is what gets parsed downstream.
//!
//! # Retry Strategy
//!
//! - Transport error (including a timed-out attempt) → retry
//! - Non-success HTTP status (any) → retry
//! - Body read failure after a success status → fail immediately
//! - Fixed delay between attempts; the timeout bounds each attempt,
//!   not the whole sequence

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::FetchConfig;

/// Build the outbound HTTP client.
///
/// The client carries the browser-like user agent and the per-request
/// timeout; reqwest aborts the in-flight call once the timeout elapses,
/// which the retry loop then treats as an ordinary transport failure.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()
        .context("Failed to build HTTP client")
}

/// Build the proxied request target: proxy base + percent-encoded URL.
///
/// Equivalent inputs must produce identical request targets, so callers
/// pass the *normalized* URL string, never the raw user input.
pub fn proxied_url(proxy_base: &str, normalized_url: &str) -> String {
    format!("{}{}", proxy_base, urlencoding::encode(normalized_url))
}

/// Fetch a URL, retrying on any failure up to `config.max_retries` extra
/// attempts with `config.retry_delay_ms` between them. Returns the
/// response body on the first success.
pub async fn fetch_page(
    client: &reqwest::Client,
    config: &FetchConfig,
    url: &str,
) -> Result<String> {
    let mut last_err = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            tokio::time::sleep(Duration::from_millis(config.retry_delay_ms)).await;
        }

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    // A failure while reading the body is not retried.
                    return response.text().await.context("Failed to read response body");
                }

                tracing::warn!(attempt, %status, "proxied fetch returned non-success status");
                last_err = Some(anyhow::anyhow!("HTTP error! status: {}", status.as_u16()));
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "proxied fetch attempt failed");
                last_err = Some(e.into());
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Fetch failed before any attempt was made")))
}
