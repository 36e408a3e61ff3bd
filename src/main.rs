//! # Linkmeta CLI
//!
//! The `linkmeta` binary hosts the metadata resolution service and offers
//! a one-shot resolution command for scripting and smoke tests.
//!
//! ## Usage
//!
//! ```bash
//! linkmeta --config ./config/linkmeta.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `linkmeta serve` | Start the JSON HTTP service on `[server].bind` |
//! | `linkmeta resolve <url>` | Resolve one URL and print the result as JSON |

mod config;
mod extract;
mod fetch;
mod models;
mod resolver;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkmeta — a link metadata resolution service for bookmark apps.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; a missing file means built-in defaults.
#[derive(Parser)]
#[command(
    name = "linkmeta",
    about = "Linkmeta — resolve URLs into page titles and favicons",
    version,
    long_about = "Linkmeta resolves a URL into a display title and an absolute favicon URL. \
    Pages are fetched through a read-through proxy with bounded timeout and retry, parsed as HTML, \
    and probed with ordered fallback lookups. Results are served over a single JSON endpoint \
    or printed directly with the resolve command."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/linkmeta.toml`. Server bind address and all
    /// fetch policy settings (proxy base, timeout, retries) are read from
    /// this file; absent settings use built-in defaults.
    #[arg(long, global = true, default_value = "./config/linkmeta.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the metadata HTTP service.
    ///
    /// Binds to `[server].bind` and serves `POST /metadata` and
    /// `GET /health` until terminated.
    Serve,

    /// Resolve a single URL and print the metadata as JSON.
    ///
    /// Runs the same pipeline as the HTTP endpoint: validation,
    /// normalization, proxied fetch with retry, extraction.
    Resolve {
        /// The URL to resolve. Must be absolute (scheme included).
        url: String,
    },
}

/// Initialize logging to stderr, honoring `RUST_LOG` when set.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,linkmeta=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Resolve { url } => {
            let client = fetch::build_client(&cfg.fetch)?;
            let metadata = resolver::resolve_metadata(&client, &cfg.fetch, &url).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }

    Ok(())
}
