//! The metadata resolver: validate, normalize, fetch through the proxy,
//! parse, extract.
//!
//! One resolution handles one URL with no shared state, so the resolver
//! is safe to invoke concurrently for different URLs; the hosting layer
//! (axum, or the one-shot CLI) owns all scheduling.

use scraper::Html;
use url::Url;

use crate::config::FetchConfig;
use crate::extract;
use crate::fetch;
use crate::models::PageMetadata;

/// Resolution failure, classified so callers can tell a rejected input
/// from an exhausted fetch. Display output is what the service surfaces;
/// raw transport errors never cross this boundary.
#[derive(Debug)]
pub enum ResolveError {
    /// Input did not parse as an absolute URL. No network call was made.
    InvalidUrl,
    /// Proxied retrieval failed after the retry budget was spent.
    Fetch { url: String, cause: String },
    /// Extraction failed with no defined fallback value.
    Parse { url: String, cause: String },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::InvalidUrl => write!(f, "Invalid URL format"),
            ResolveError::Fetch { url, cause } | ResolveError::Parse { url, cause } => {
                write!(f, "Failed to fetch metadata for {}: {}", url, cause)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolve a candidate URL into a display title and an absolute favicon
/// URL.
///
/// The input is parsed and re-serialized to its canonical form before
/// use, so equivalent spellings produce identical proxied requests. The
/// fetch goes through the configured read-through proxy with the bounded
/// retry policy from [`FetchConfig`]; the returned body is parsed as HTML
/// and the title/favicon strategy chains run over it.
pub async fn resolve_metadata(
    client: &reqwest::Client,
    config: &FetchConfig,
    raw_url: &str,
) -> Result<PageMetadata, ResolveError> {
    let page = Url::parse(raw_url).map_err(|_| ResolveError::InvalidUrl)?;
    let normalized = page.to_string();

    let target = fetch::proxied_url(&config.proxy_base, &normalized);
    tracing::debug!(url = %normalized, "resolving metadata");

    let html = fetch::fetch_page(client, config, &target)
        .await
        .map_err(|e| ResolveError::Fetch {
            url: normalized.clone(),
            cause: e.to_string(),
        })?;

    let document = Html::parse_document(&html);
    let title = extract::title(&document, &page);
    let favicon = extract::favicon(&document, &page).map_err(|e| ResolveError::Parse {
        url: normalized,
        cause: e.to_string(),
    })?;

    Ok(PageMetadata { title, favicon })
}
