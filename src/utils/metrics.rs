//! Observability and Metrics
//!
//! Atomic counters for gate activity. Updated on the packet hot path with
//! relaxed atomic adds only; reads produce a consistent-enough snapshot for
//! reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters for one gate instance.
#[derive(Debug)]
pub struct GateMetrics {
    /// Total packets handed to the gate
    pub packets_total: AtomicU64,
    /// Packets forwarded
    pub packets_forwarded: AtomicU64,
    /// Packets dropped at the protected port
    pub packets_dropped: AtomicU64,
    /// Knocks that matched the next expected sequence entry
    pub knocks_matched: AtomicU64,
    /// Times the full sequence completed
    pub gate_opened: AtomicU64,
    /// Lazy timeout resets
    pub window_resets: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl GateMetrics {
    pub fn new() -> Self {
        Self {
            packets_total: AtomicU64::new(0),
            packets_forwarded: AtomicU64::new(0),
            packets_dropped: AtomicU64::new(0),
            knocks_matched: AtomicU64::new(0),
            gate_opened: AtomicU64::new(0),
            window_resets: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn packet_seen(&self) {
        self.packets_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packet_forwarded(&self) {
        self.packets_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packet_dropped(&self) {
        self.packets_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn knock_matched(&self) {
        self.knocks_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gate_opened(&self) {
        self.gate_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn window_reset(&self) {
        self.window_resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since the gate was created
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Copy all counters for reporting
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_total: self.packets_total.load(Ordering::Relaxed),
            packets_forwarded: self.packets_forwarded.load(Ordering::Relaxed),
            packets_dropped: self.packets_dropped.load(Ordering::Relaxed),
            knocks_matched: self.knocks_matched.load(Ordering::Relaxed),
            gate_opened: self.gate_opened.load(Ordering::Relaxed),
            window_resets: self.window_resets.load(Ordering::Relaxed),
            uptime_secs: self.uptime_secs(),
        }
    }
}

impl Default for GateMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the gate counters.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub packets_total: u64,
    pub packets_forwarded: u64,
    pub packets_dropped: u64,
    pub knocks_matched: u64,
    pub gate_opened: u64,
    pub window_resets: u64,
    pub uptime_secs: u64,
}
