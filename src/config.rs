use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default read-through proxy. The resolver never contacts the target
/// origin directly; every page is fetched through this service.
const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win/raw?url=";

/// Browser-like user agent sent on proxied requests. Some origins refuse
/// or degrade responses for obviously non-browser clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

/// Outbound fetch policy: proxy base, per-attempt timeout, and the
/// bounded retry loop parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Base URL of the read-through proxy; the percent-encoded target URL
    /// is appended to this prefix.
    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,
    /// Timeout per outbound attempt, not for the whole retry sequence.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Additional attempts after the first failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Pause between attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxy_base: default_proxy_base(),
            timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 1000,
            user_agent: default_user_agent(),
        }
    }
}

fn default_proxy_base() -> String {
    DEFAULT_PROXY_BASE.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: every field has a default, so the
/// service runs out of the box and the file only needs to list overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate server
    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Validate fetch
    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("fetch.timeout_secs must be > 0");
    }

    if !config.fetch.proxy_base.starts_with("http://")
        && !config.fetch.proxy_base.starts_with("https://")
    {
        anyhow::bail!(
            "fetch.proxy_base must be an absolute http(s) URL prefix, got '{}'",
            config.fetch.proxy_base
        );
    }

    Ok(config)
}
