//! The knock sequence: an ordered, bounded list of ports.
//!
//! Stored with an explicit length. There is no sentinel terminator, so every
//! slot up to [`MAX_SEQUENCE_LENGTH`] holds a real port and lookups past the
//! end return `None` instead of reading a guard value.

use crate::config::MAX_SEQUENCE_LENGTH;
use crate::error::{GateError, Result};

/// Validated, ordered list of knock ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnockSequence {
    ports: Vec<u16>,
}

impl KnockSequence {
    /// Build a sequence, enforcing the length bound, distinctness, and the
    /// absence of port 0. Fails fast; an overlong sequence is rejected,
    /// never truncated.
    pub fn new(ports: &[u16]) -> Result<Self> {
        let errors = check(ports);
        if !errors.is_empty() {
            return Err(GateError::Config(errors.join("; ")));
        }

        Ok(Self {
            ports: ports.to_vec(),
        })
    }

    /// Number of knocks required to open the gate
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Port expected at `index`, or `None` once the sequence is complete
    pub fn expected(&self, index: usize) -> Option<u16> {
        self.ports.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.ports
    }
}

impl TryFrom<Vec<u16>> for KnockSequence {
    type Error = GateError;

    fn try_from(ports: Vec<u16>) -> Result<Self> {
        Self::new(&ports)
    }
}

/// Collect every problem with a candidate sequence.
///
/// Shared between [`KnockSequence::new`] and the configuration validator so
/// the rules live in one place.
pub fn check(ports: &[u16]) -> Vec<String> {
    let mut errors = Vec::new();

    if ports.is_empty() {
        errors.push("Knock sequence cannot be empty".to_string());
    } else if ports.len() > MAX_SEQUENCE_LENGTH {
        errors.push(format!(
            "Knock sequence too long: {} entries (maximum: {})",
            ports.len(),
            MAX_SEQUENCE_LENGTH
        ));
    }

    if ports.contains(&0) {
        errors.push("Knock sequence cannot contain port 0".to_string());
    }

    for (i, port) in ports.iter().enumerate() {
        if ports[..i].contains(port) {
            errors.push(format!("Knock sequence contains duplicate port {port}"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sequence() {
        let seq = KnockSequence::new(&[1000, 2000, 3000]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.expected(0), Some(1000));
        assert_eq!(seq.expected(2), Some(3000));
        assert_eq!(seq.expected(3), None);
    }

    #[test]
    fn test_single_port_sequence() {
        let seq = KnockSequence::new(&[7777]).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.expected(1), None);
    }

    #[test]
    fn test_maximum_length_accepted() {
        let ports: Vec<u16> = (1..=MAX_SEQUENCE_LENGTH as u16).map(|p| p * 100).collect();
        let seq = KnockSequence::new(&ports).unwrap();
        assert_eq!(seq.len(), MAX_SEQUENCE_LENGTH);
    }

    #[test]
    fn test_overlong_rejected() {
        let ports: Vec<u16> = (1..=(MAX_SEQUENCE_LENGTH as u16 + 1)).map(|p| p * 100).collect();
        assert!(KnockSequence::new(&ports).is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(KnockSequence::new(&[]).is_err());
    }

    #[test]
    fn test_duplicate_rejected() {
        let errors = check(&[1000, 2000, 1000]);
        assert!(errors.iter().any(|e| e.contains("duplicate port 1000")));
    }

    #[test]
    fn test_port_zero_rejected() {
        let errors = check(&[1000, 0]);
        assert!(errors.iter().any(|e| e.contains("port 0")));
    }
}
