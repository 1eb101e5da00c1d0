//! # Utility Modules
//!
//! Supporting utilities for logging and observability.
//!
//! ## Components
//! - **Logging**: Structured logging configuration (binary surface)
//! - **Metrics**: Thread-safe verdict and knock counters

pub mod logging;
pub mod metrics;

// Re-export public types for advanced users
pub use metrics::{GateMetrics, MetricsSnapshot};
