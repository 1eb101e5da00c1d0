//! Sequential-match knock state machine.
//!
//! One instance tracks progress toward opening one guarded port: how many
//! sequence entries have matched in order, when the last match happened, and
//! whether the gate is open. The timeout window is enforced lazily: an
//! expired partial sequence is only cleared when the *next* knock arrives,
//! never by a background timer.
//!
//! Two behaviors are deliberate and preserved from the reference design:
//! - A wrong port is a no-op, not a reset. The only reset path is the
//!   timeout check.
//! - Once open, the gate stays open. The lazy timeout check on a later knock
//!   is the only thing that can close it again short of an explicit
//!   [`KnockStateMachine::reset`].

use crate::core::sequence::KnockSequence;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Externally visible progress of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockStatus {
    /// No progress; waiting for the first knock
    Idle,
    /// This many entries matched in order; gate still closed
    Matching(usize),
    /// Sequence completed; gate open
    Open,
}

/// What one observed knock did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockProgress {
    /// Port did not match the next expected entry; no state change
    Ignored,
    /// Port matched; progress advanced to this index
    Advanced(usize),
    /// Port matched the final entry; the gate is now open
    Opened,
}

/// Full outcome of [`KnockStateMachine::observe`], including whether the
/// lazy timeout check fired before the knock was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnockOutcome {
    /// The window had lapsed and progress was reset before matching
    pub expired: bool,
    pub progress: KnockProgress,
}

/// Progress state for one guarded port.
///
/// Owns the only mutable data in the system. Callers that share an instance
/// across threads must serialize access; the gate wraps one in a mutex.
#[derive(Debug)]
pub struct KnockStateMachine {
    sequence: KnockSequence,
    timeout: Duration,
    index: usize,
    last_knock: Option<Instant>,
    open: bool,
}

impl KnockStateMachine {
    pub fn new(sequence: KnockSequence, timeout: Duration) -> Self {
        Self {
            sequence,
            timeout,
            index: 0,
            last_knock: None,
            open: false,
        }
    }

    /// Feed one observed knock (a TCP segment to a non-protected port).
    ///
    /// Runs the lazy timeout check, then compares `dst_port` against the
    /// next expected sequence entry. Total: never fails, never blocks,
    /// never allocates.
    pub fn observe(&mut self, dst_port: u16, now: Instant) -> KnockOutcome {
        let expired = self.expire_if_stale(now);

        // Once the sequence is complete `expected` is None, so no index can
        // ever be read past the end of the sequence.
        let progress = match self.sequence.expected(self.index) {
            Some(expected) if expected == dst_port => {
                self.last_knock = Some(now);
                self.index += 1;
                if self.index == self.sequence.len() {
                    self.open = true;
                    info!(port = dst_port, "knock sequence complete, gate open");
                    KnockProgress::Opened
                } else {
                    debug!(
                        port = dst_port,
                        index = self.index,
                        "knock matched, progress advanced"
                    );
                    KnockProgress::Advanced(self.index)
                }
            }
            _ => KnockProgress::Ignored,
        };

        KnockOutcome { expired, progress }
    }

    /// Whether the guarded port is currently accessible
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Clear all progress: index to 0, gate closed, timestamp unset
    pub fn reset(&mut self) {
        self.index = 0;
        self.last_knock = None;
        self.open = false;
    }

    pub fn status(&self) -> KnockStatus {
        if self.open {
            KnockStatus::Open
        } else if self.index == 0 {
            KnockStatus::Idle
        } else {
            KnockStatus::Matching(self.index)
        }
    }

    /// Number of knocks required by the configured sequence
    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Lazy window check: reset if the last knock is older than the timeout.
    /// Returns true if a reset happened.
    fn expire_if_stale(&mut self, now: Instant) -> bool {
        match self.last_knock {
            Some(last) if now.saturating_duration_since(last) > self.timeout => {
                debug!(index = self.index, "knock window lapsed, progress reset");
                self.reset();
                true
            }
            _ => false,
        }
    }
}

// Unit tests *****************************************************************
