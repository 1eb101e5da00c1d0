//! Packet classification for the decision hot path.
//!
//! [`classify`] is a pure function over the raw bytes of an IP datagram. It
//! answers the only question the gate needs: is this a TCP segment, and if
//! so, what destination port is it aimed at? Anything else (non-IPv4,
//! non-TCP, or truncated input) is [`Classified::NotApplicable`] and must be
//! forwarded unchanged by the caller.
//!
//! The packet-delivery layer is assumed to have verified header integrity;
//! no checksum validation happens here.

/// Minimum IPv4 header length in bytes (IHL of 5, no options)
const IPV4_MIN_HEADER_LEN: usize = 20;

/// IP protocol number for TCP
const IPPROTO_TCP: u8 = 6;

/// Classification result for one inbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// A TCP segment with its destination port
    Tcp { dst_port: u16 },
    /// Not TCP, not IPv4, or too short to carry the fields we read
    NotApplicable,
}

/// Extract the TCP destination port from a raw IPv4 datagram.
///
/// Pure and allocation-free; suitable for a per-packet hot path.
pub fn classify(packet: &[u8]) -> Classified {
    if packet.len() < IPV4_MIN_HEADER_LEN {
        return Classified::NotApplicable;
    }

    let version = packet[0] >> 4;
    let ihl = (packet[0] & 0x0f) as usize;
    if version != 4 || ihl < 5 {
        return Classified::NotApplicable;
    }

    // IHL counts 32-bit words; the TCP header starts right after it
    let ip_header_len = ihl * 4;
    if packet.len() < ip_header_len {
        return Classified::NotApplicable;
    }

    if packet[9] != IPPROTO_TCP {
        return Classified::NotApplicable;
    }

    // Destination port is the second big-endian u16 of the TCP header
    match packet.get(ip_header_len + 2..ip_header_len + 4) {
        Some(bytes) => Classified::Tcp {
            dst_port: u16::from_be_bytes([bytes[0], bytes[1]]),
        },
        None => Classified::NotApplicable,
    }
}

// Unit tests *****************************************************************
