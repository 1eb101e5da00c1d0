//! # knock-gate
//!
//! A port-knocking access gate for a single TCP service.
//!
//! The gate hides one protected TCP port from all traffic until the remote
//! side has sent connection attempts to a configured sequence of other ports,
//! in order, each within a bounded time window of the previous one. Once the
//! sequence completes the gate opens and stays open until an explicit reset.
//!
//! ## Architecture
//! - [`core::classifier`]: extracts the TCP destination port from raw IPv4
//!   datagrams, or reports not-applicable
//! - [`core::state`]: the sequential-match state machine with its lazy
//!   timeout window
//! - [`core::gate`]: combines both into a per-packet forward/drop verdict
//! - [`hook`]: the callback contract for the host networking stack, plus a
//!   raw-socket reference adapter
//!
//! ## Example
//! ```rust
//! use knock_gate::{AccessGate, GateConfig, Verdict};
//!
//! let config = GateConfig::default_with_overrides(|c| {
//!     c.sequence = vec![1000, 2000, 3000];
//! });
//! let gate = AccessGate::new(&config).unwrap();
//!
//! // Non-TCP input forwards untouched; port 22 is dropped until the
//! // sequence 1000, 2000, 3000 has been knocked.
//! assert_eq!(gate.decide(&[0u8; 8]), Verdict::Forward);
//! ```
//!
//! ## Hot-path guarantees
//! Every decision is synchronous and bounded-time: no heap allocation, no
//! blocking I/O, no suspension. Progress state is serialized behind a mutex
//! so concurrent delivery paths observe linearizable transitions.

pub mod config;
pub mod core;
pub mod error;
pub mod hook;
pub mod utils;

pub use crate::config::GateConfig;
pub use crate::core::classifier::{classify, Classified};
pub use crate::core::gate::{AccessGate, Verdict};
pub use crate::core::sequence::KnockSequence;
pub use crate::core::state::{KnockStateMachine, KnockStatus};
pub use crate::error::{GateError, Result};
pub use crate::hook::PacketHook;
