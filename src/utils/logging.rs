//! Structured logging setup for the daemon binary.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the embedding process so hosts keep control of their own
//! logging pipeline.

use crate::error::{GateError, Result};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to the
/// given default level.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| GateError::Config(format!("Invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| GateError::Custom(format!("Failed to install subscriber: {e}")))?;

    Ok(())
}
