//! Title and favicon extraction from a parsed HTML document.
//!
//! Both lookups are ordered strategy chains that short-circuit on the
//! first non-empty hit, mirroring what browsers and link-preview UIs
//! honor in practice:
//!
//! - Title: `og:title` → `twitter:title` → `<title>` → hostname
//! - Favicon: `rel="icon"` → `rel="shortcut icon"` → `rel="apple-touch-icon"`
//!   → `/favicon.ico` under the page origin
//!
//! Icon hrefs are resolved against the page *origin* (not the page path),
//! so `icons/fav.png` on `https://example.com/a/b` becomes
//! `https://example.com/icons/fav.png`. A malformed href falls back to
//! the conventional `/favicon.ico` path.

use scraper::{Html, Selector};
use url::Url;

/// Icon link selectors in priority order. Each requires a present `href`;
/// an empty `href` is treated as absent and the chain moves on.
const ICON_SELECTORS: [&str; 3] = [
    r#"link[rel="icon"][href]"#,
    r#"link[rel="shortcut icon"][href]"#,
    r#"link[rel="apple-touch-icon"][href]"#,
];

/// Extraction failure with no defined fallback value.
#[derive(Debug)]
pub enum ExtractError {
    /// The page URL cannot serve as a base for resolving icon hrefs
    /// (non-hierarchical schemes such as `mailto:` have no origin root).
    OriginUnavailable(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::OriginUnavailable(url) => {
                write!(f, "page origin unavailable for {}", url)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extract the display title, falling back to the hostname when the page
/// carries no title markup. Whitespace runs in the winner are collapsed
/// to single spaces and the result is trimmed.
pub fn title(document: &Html, page: &Url) -> String {
    let raw = first_attr(document, r#"meta[property="og:title"]"#, "content")
        .or_else(|| first_attr(document, r#"meta[name="twitter:title"]"#, "content"))
        .or_else(|| first_text(document, "title"))
        .unwrap_or_else(|| page.host_str().unwrap_or_default().to_string());
    collapse_whitespace(&raw)
}

/// Extract the favicon as an absolute URL resolved against the page
/// origin.
///
/// Errors only when the page URL has no usable origin root; a missing or
/// malformed icon href always resolves to the `/favicon.ico` fallback.
pub fn favicon(document: &Html, page: &Url) -> Result<String, ExtractError> {
    let origin = page
        .join("/")
        .map_err(|_| ExtractError::OriginUnavailable(page.to_string()))?;
    let fallback = origin
        .join("/favicon.ico")
        .map_err(|_| ExtractError::OriginUnavailable(page.to_string()))?;

    let href = ICON_SELECTORS
        .iter()
        .find_map(|selector| first_attr(document, selector, "href"));

    let resolved = match href {
        Some(href) => origin.join(&href).unwrap_or(fallback),
        None => fallback,
    };
    Ok(resolved.to_string())
}

/// First match for `selector`, reading `attr`. Returns `None` when the
/// element is absent, the attribute is absent, or the value is empty.
fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let value = document.select(&selector).next()?.value().attr(attr)?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Trimmed text content of the first match for `selector`, or `None` if
/// absent or blank.
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
