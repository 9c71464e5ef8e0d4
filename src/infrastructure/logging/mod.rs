//! Logging initialization from [`LoggingConfig`].

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::models::LoggingConfig;

/// Initializes the global tracing subscriber.
///
/// The configured level acts as the default filter; `RUST_LOG` overrides
/// it when set. Returns an error if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?,
        _ => fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?,
    }

    Ok(())
}
