//! Request and response types for the metadata service.
//!
//! Everything here is request-scoped; nothing is persisted or cached
//! between resolutions.

use serde::{Deserialize, Serialize};

/// Body of a `POST /metadata` request.
///
/// `url` is optional at the wire level so the handler can distinguish a
/// missing field (400) from a present-but-unparseable one (500).
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Resolved page metadata returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Display title, whitespace-collapsed. Falls back to the hostname
    /// when the page carries no title markup at all.
    pub title: String,
    /// Absolute favicon URL, resolved against the page origin. Falls back
    /// to `<origin>/favicon.ico` when no icon link is discoverable.
    pub favicon: String,
}
