// Structured logging setup for the binary.
//
// - RUST_LOG wins when set. Otherwise the configured default filter applies.
// - Initialising twice is an error, not a panic.

use tracing_subscriber::EnvFilter;

pub fn filter_from(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

pub fn init(default_filter: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(default_filter))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
