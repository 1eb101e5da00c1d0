//! The access gate: final forward/drop verdict per packet.
//!
//! Combines classifier output with the knock state machine. Only the
//! protected port is ever dropped; knock attempts and unrelated traffic are
//! always forwarded, since any port in the sequence may host a legitimate
//! unrelated service.
//!
//! The mutable progress state sits behind a mutex inside the gate so
//! `observe` and `is_open` are linearizable when packets arrive from
//! concurrent delivery paths. The critical section is a handful of integer
//! comparisons; nothing inside it blocks or allocates.

use crate::config::GateConfig;
use crate::core::classifier::{classify, Classified};
use crate::core::sequence::KnockSequence;
use crate::core::state::{KnockProgress, KnockStateMachine, KnockStatus};
use crate::error::Result;
use crate::utils::metrics::GateMetrics;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

/// Per-packet decision returned to the hook adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Continue normal processing
    Forward,
    /// Discard silently; no response is sent
    Drop,
}

/// One gate instance guards one protected port.
pub struct AccessGate {
    protected_port: u16,
    state: Mutex<KnockStateMachine>,
    metrics: GateMetrics,
}

impl AccessGate {
    /// Build a gate from validated configuration.
    ///
    /// Fails fast on any configuration problem; the state machine is never
    /// constructed from a rejected sequence.
    pub fn new(config: &GateConfig) -> Result<Self> {
        config.validate_strict()?;
        let sequence = KnockSequence::new(&config.sequence)?;

        Ok(Self {
            protected_port: config.protected_port,
            state: Mutex::new(KnockStateMachine::new(sequence, config.timeout)),
            metrics: GateMetrics::new(),
        })
    }

    /// Decide the verdict for one inbound packet using the wall clock.
    pub fn decide(&self, packet: &[u8]) -> Verdict {
        self.decide_at(packet, Instant::now())
    }

    /// Decide the verdict for one inbound packet at an explicit time.
    ///
    /// - Non-TCP or unparseable input forwards with no state change.
    /// - Traffic to the protected port forwards only while the gate is open.
    /// - Every other TCP port is treated as a knock attempt and always
    ///   forwarded.
    pub fn decide_at(&self, packet: &[u8], now: Instant) -> Verdict {
        self.metrics.packet_seen();

        let verdict = match classify(packet) {
            Classified::NotApplicable => Verdict::Forward,
            Classified::Tcp { dst_port } if dst_port == self.protected_port => {
                if self.lock_state().is_open() {
                    Verdict::Forward
                } else {
                    debug!(port = dst_port, "dropping packet to closed protected port");
                    Verdict::Drop
                }
            }
            Classified::Tcp { dst_port } => {
                let outcome = self.lock_state().observe(dst_port, now);
                if outcome.expired {
                    self.metrics.window_reset();
                }
                match outcome.progress {
                    KnockProgress::Advanced(_) => self.metrics.knock_matched(),
                    KnockProgress::Opened => {
                        self.metrics.knock_matched();
                        self.metrics.gate_opened();
                    }
                    KnockProgress::Ignored => {}
                }
                Verdict::Forward
            }
        };

        match verdict {
            Verdict::Forward => self.metrics.packet_forwarded(),
            Verdict::Drop => self.metrics.packet_dropped(),
        }

        verdict
    }

    /// Whether the protected port is currently accessible
    pub fn is_open(&self) -> bool {
        self.lock_state().is_open()
    }

    /// Current progress, for the administrative surface
    pub fn status(&self) -> KnockStatus {
        self.lock_state().status()
    }

    /// Administrative reset: close the gate and clear all progress
    pub fn reset(&self) {
        self.lock_state().reset();
    }

    pub fn protected_port(&self) -> u16 {
        self.protected_port
    }

    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    /// All transitions are total, so a panic elsewhere cannot leave the
    /// machine mid-update with a broken invariant; a poisoned lock is safe
    /// to take over.
    fn lock_state(&self) -> MutexGuard<'_, KnockStateMachine> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Unit tests *****************************************************************
