//! # Hook Adapter
//!
//! The contract between the gate and whatever intercepts packets.
//!
//! The host networking stack owns interception: it hands the gate one packet
//! per invocation and applies the returned verdict. This module defines that
//! callback contract ([`PacketHook`]) and ships one reference adapter, a
//! raw-socket [`Sniffer`] that observes inbound TCP traffic and reports what
//! the gate would do. Enforcement of `Drop` stays with the host stack.

use crate::core::gate::{AccessGate, Verdict};

pub mod sniffer;

pub use sniffer::Sniffer;

/// Callback body invoked once per intercepted packet.
///
/// Implementations must be synchronous and bounded-time; the caller may be
/// on a per-packet hot path.
pub trait PacketHook: Send + Sync {
    /// Produce a verdict for one raw IP datagram
    fn process(&self, packet: &[u8]) -> Verdict;
}

impl PacketHook for AccessGate {
    fn process(&self, packet: &[u8]) -> Verdict {
        self.decide(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;

    #[test]
    fn test_gate_implements_hook() {
        let gate = AccessGate::new(&GateConfig::default()).unwrap();
        let hook: &dyn PacketHook = &gate;

        // Garbage input is not applicable and forwards
        assert_eq!(hook.process(&[0u8; 4]), Verdict::Forward);
    }
}
