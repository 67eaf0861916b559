//! Logging initialization utilities
//!
//! Provides standardized tracing setup shared by every binary in the
//! workspace.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to the default level for the calling crate.
///
/// `0` is `warn`, each extra `-v` steps down one level, capped at `trace`.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing/logging
///
/// Sets up logging to stderr (stdout is reserved for command output) with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG, which wins when set
/// - Otherwise a default level for `crate_name` picked by [`default_level`]
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for log aggregation).
/// Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The crate whose level the verbosity controls (e.g., "cse_search")
/// * `verbosity` - Number of `-v` flags given on the command line
///
/// # Example
///
/// ```rust,ignore
/// search_common::init_tracing("cse_search", 1)?;
/// ```
pub fn init_tracing(crate_name: &str, verbosity: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = format!("{}={}", crate_name, default_level(verbosity));
            EnvFilter::new("warn").add_directive(directive.parse()?)
        }
    };

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
