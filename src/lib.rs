//! # Linkmeta
//!
//! A self-hostable link metadata resolution service for bookmark apps.
//!
//! Linkmeta turns a raw URL into a display title and an absolute favicon
//! URL. Pages are retrieved through a read-through proxy with a bounded
//! timeout/retry policy, parsed as HTML, and probed with a short chain of
//! fallback lookups (`og:title` → `twitter:title` → `<title>` → hostname;
//! `rel="icon"` → `rel="shortcut icon"` → `rel="apple-touch-icon"` →
//! `/favicon.ico`). Results are served over a single JSON endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌─────────┐   ┌──────────┐
//! │  HTTP    │──▶│ Resolver  │──▶│  Fetch   │──▶│  Proxy   │
//! │ /metadata│   │ validate+ │   │ retry +  │   │ (remote) │
//! └──────────┘   │ normalize │   │ timeout  │   └──────────┘
//!                └─────┬─────┘   └─────────┘
//!                      ▼
//!                ┌──────────┐
//!                │ Extract  │
//!                │ title +  │
//!                │ favicon  │
//!                └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! linkmeta serve                              # start the HTTP service
//! linkmeta resolve https://example.com        # one-shot resolution
//! curl -X POST localhost:8787/metadata \
//!      -d '{"url": "https://example.com"}'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Request/response types |
//! | [`fetch`] | Proxied retrieval with bounded retry |
//! | [`extract`] | Title/favicon lookup strategies |
//! | [`resolver`] | The end-to-end resolution pipeline |
//! | [`server`] | JSON HTTP service |

pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod resolver;
pub mod server;
