//! # Core Gate Components
//!
//! Per-packet classification and the sequential-match state machine.
//!
//! This module contains the hot-path logic: for every inbound packet it
//! extracts the TCP destination port, tracks progress through the configured
//! knock sequence, and produces a forward/drop verdict for the protected
//! port. All of it is synchronous, bounded-time, and allocation-free.
//!
//! ## Components
//! - **Classifier**: extracts (protocol, destination port) from raw IPv4 packets
//! - **Sequence**: the bounded, explicit-length knock sequence
//! - **State**: progress tracking with the lazy timeout window
//! - **Gate**: the final forward/drop decision for each packet

pub mod classifier;
pub mod gate;
pub mod sequence;
pub mod state;

// Unit test helpers

#[cfg(test)]
pub mod test_utils {
    /// IPv4 header of a real captured SYN segment (proto TCP, no options)
    pub fn get_ip_hex() -> &'static str {
        "45000040000040004006d3760a6ed06acc2cc03c"
    }

    /// TCP header of the same capture, destination port 80
    pub fn get_tcp_hex() -> &'static str {
        "c6b70050a4269c9300000000b002ffff92970000020405b4010303060101080abb6879f80000000004020000"
    }
}
