//! Tracing subscriber setup.
//!
//! Called once from the composition root; library code only emits events.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber at `level` in `format`
/// (`json`, `pretty`, anything else is compact).
///
/// `RUST_LOG` directives refine the configured level.
pub fn init(level: Level, format: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
