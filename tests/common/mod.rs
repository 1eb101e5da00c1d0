//! Shared packet builders for integration tests.

#![allow(dead_code)]

/// Minimal IPv4 datagram carrying a TCP header aimed at `dst_port`.
///
/// Checksums are left zero; the gate assumes the delivery layer has already
/// validated header integrity.
pub fn tcp_packet(src_port: u16, dst_port: u16) -> Vec<u8> {
    let mut packet = vec![0u8; 40];
    packet[0] = 0x45; // version 4, IHL 5
    packet[2..4].copy_from_slice(&40u16.to_be_bytes()); // total length
    packet[8] = 64; // TTL
    packet[9] = 6; // TCP
    packet[20..22].copy_from_slice(&src_port.to_be_bytes());
    packet[22..24].copy_from_slice(&dst_port.to_be_bytes());
    packet[32] = 5 << 4; // data offset
    packet[33] = 0x02; // SYN
    packet
}

/// Same shape as [`tcp_packet`] but marked UDP in the protocol field.
pub fn udp_packet(dst_port: u16) -> Vec<u8> {
    let mut packet = tcp_packet(40000, dst_port);
    packet[9] = 17;
    packet
}
