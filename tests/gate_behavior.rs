//! Integration tests for the end-to-end gate behavior: classification,
//! knock progress, timeout window, and protected-port verdicts.

mod common;

use common::tcp_packet;
use knock_gate::{AccessGate, GateConfig, KnockStatus, Verdict};
use std::time::{Duration, Instant};

fn gate_with(sequence: &[u16]) -> AccessGate {
    let config = GateConfig {
        protected_port: 22,
        timeout: Duration::from_secs(5),
        sequence: sequence.to_vec(),
    };
    AccessGate::new(&config).expect("valid test config")
}

fn at(base: Instant, tenths: u64) -> Instant {
    base + Duration::from_millis(tenths * 100)
}

#[test]
fn ordered_completion_unlocks_protected_port() {
    // Concrete scenario: sequence [1000, 2000, 3000], port 22, timeout 5s
    let gate = gate_with(&[1000, 2000, 3000]);
    let t0 = Instant::now();

    assert_eq!(gate.decide_at(&tcp_packet(40000, 22), t0), Verdict::Drop);

    gate.decide_at(&tcp_packet(40000, 1000), t0); // t=0s
    assert_eq!(gate.status(), KnockStatus::Matching(1));

    gate.decide_at(&tcp_packet(40000, 2000), at(t0, 20)); // t=2s
    assert_eq!(gate.status(), KnockStatus::Matching(2));

    gate.decide_at(&tcp_packet(40000, 3000), at(t0, 30)); // t=3s
    assert_eq!(gate.status(), KnockStatus::Open);

    // SYN to port 22 at t=3.1s forwards
    assert_eq!(gate.decide_at(&tcp_packet(40000, 22), at(t0, 31)), Verdict::Forward);
}

#[test]
fn stale_gap_forces_restart() {
    // Same scenario with a 6s gap between the 1000 and 2000 knocks
    let gate = gate_with(&[1000, 2000, 3000]);
    let t0 = Instant::now();

    gate.decide_at(&tcp_packet(40000, 1000), t0);
    assert_eq!(gate.status(), KnockStatus::Matching(1));

    // The stale knock is processed via the lazy reset path; 2000 against a
    // fresh Idle state is a no-op, so progress must not reach index 2
    gate.decide_at(&tcp_packet(40000, 2000), at(t0, 60));
    assert_eq!(gate.status(), KnockStatus::Idle);

    // The sequence must be restarted from 1000
    gate.decide_at(&tcp_packet(40000, 1000), at(t0, 61));
    gate.decide_at(&tcp_packet(40000, 2000), at(t0, 62));
    gate.decide_at(&tcp_packet(40000, 3000), at(t0, 63));
    assert_eq!(gate.decide_at(&tcp_packet(40000, 22), at(t0, 64)), Verdict::Forward);
}

#[test]
fn stale_first_entry_restarts_at_index_one() {
    let gate = gate_with(&[1000, 2000, 3000]);
    let t0 = Instant::now();

    gate.decide_at(&tcp_packet(40000, 1000), t0);
    // After the window lapses the first entry matches against the reset state
    gate.decide_at(&tcp_packet(40000, 1000), at(t0, 70));
    assert_eq!(gate.status(), KnockStatus::Matching(1));
}

#[test]
fn wrong_port_does_not_reset_progress() {
    let gate = gate_with(&[1000, 2000, 3000]);
    let t0 = Instant::now();

    gate.decide_at(&tcp_packet(40000, 1000), t0);
    gate.decide_at(&tcp_packet(40000, 2000), at(t0, 10));

    // In-window traffic to unrelated ports is forwarded and ignored
    for port in [8080, 443, 1000, 65535] {
        assert_eq!(
            gate.decide_at(&tcp_packet(40000, port), at(t0, 20)),
            Verdict::Forward
        );
    }
    assert_eq!(gate.status(), KnockStatus::Matching(2));

    gate.decide_at(&tcp_packet(40000, 3000), at(t0, 30));
    assert!(gate.is_open());
}

#[test]
fn gate_stays_open_under_further_knock_traffic() {
    let gate = gate_with(&[1000, 2000]);
    let t0 = Instant::now();

    gate.decide_at(&tcp_packet(40000, 1000), t0);
    gate.decide_at(&tcp_packet(40000, 2000), at(t0, 10));
    assert!(gate.is_open());

    for port in [1000, 2000, 9999] {
        gate.decide_at(&tcp_packet(40000, port), at(t0, 20));
        assert_eq!(gate.decide_at(&tcp_packet(40000, 22), at(t0, 21)), Verdict::Forward);
    }
}

#[test]
fn source_port_is_irrelevant() {
    let gate = gate_with(&[1000, 2000]);
    let t0 = Instant::now();

    // Knocks from entirely different source ports still advance in order
    gate.decide_at(&tcp_packet(50001, 1000), t0);
    gate.decide_at(&tcp_packet(50002, 2000), at(t0, 10));
    assert!(gate.is_open());
}

#[test]
fn single_knock_sequence() {
    let gate = gate_with(&[7777]);
    let t0 = Instant::now();

    assert_eq!(gate.decide_at(&tcp_packet(40000, 22), t0), Verdict::Drop);
    gate.decide_at(&tcp_packet(40000, 7777), t0);
    assert_eq!(gate.decide_at(&tcp_packet(40000, 22), at(t0, 1)), Verdict::Forward);
}
