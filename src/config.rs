//! # Configuration Management
//!
//! Centralized configuration for the knock gate.
//!
//! This module provides the immutable startup configuration: the protected
//! port, the knock timeout, and the ordered knock sequence.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Security Considerations
//! - Validation is fail-fast: a sequence longer than the supported bound is
//!   rejected outright, never truncated.
//! - The sequence is stored with an explicit length. There is no in-band
//!   terminator value, so the full bound of 10 entries is usable.

use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Maximum number of entries in a knock sequence.
pub const MAX_SEQUENCE_LENGTH: usize = 10;

/// Port guarded by the gate unless configured otherwise.
pub const DEFAULT_PROTECTED_PORT: u16 = 22;

/// Maximum gap between consecutive correct knocks.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Example knock sequence used when none is configured.
pub const DEFAULT_SEQUENCE: [u16; 3] = [1234, 4321, 4444];

/// Immutable gate configuration, read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// TCP port hidden behind the gate
    pub protected_port: u16,

    /// Maximum gap between consecutive correct knocks before progress resets
    #[serde(with = "duration_serde")]
    pub timeout: Duration,

    /// Ordered list of ports that must be knocked to open the gate
    pub sequence: Vec<u16>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_port: DEFAULT_PROTECTED_PORT,
            timeout: DEFAULT_TIMEOUT,
            sequence: DEFAULT_SEQUENCE.to_vec(),
        }
    }
}

impl GateConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| GateError::Config(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| GateError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| GateError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Start with defaults
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(port) = std::env::var("KNOCK_GATE_PROTECTED_PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.protected_port = val;
            }
        }

        if let Ok(timeout) = std::env::var("KNOCK_GATE_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.timeout = Duration::from_millis(val);
            }
        }

        if let Ok(sequence) = std::env::var("KNOCK_GATE_SEQUENCE") {
            config.sequence = parse_sequence(&sequence)?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Validate protected port
        if self.protected_port == 0 {
            errors.push("Protected port cannot be 0".to_string());
        }

        // Validate timeout
        if self.timeout.is_zero() {
            errors.push("Knock timeout must be greater than 0".to_string());
        } else if self.timeout.as_secs() > 3600 {
            errors.push("Knock timeout too long (maximum: 1 hour)".to_string());
        }

        // Validate sequence shape (length bound, distinctness, no port 0)
        errors.extend(crate::core::sequence::check(&self.sequence));

        // A sequence entry equal to the protected port could never be
        // observed as a knock, so the gate could never open
        if self.sequence.contains(&self.protected_port) {
            errors.push(format!(
                "Knock sequence must not contain the protected port {}",
                self.protected_port
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(GateError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Parse a comma-separated knock sequence, e.g. `"1000,2000,3000"`
pub fn parse_sequence(input: &str) -> Result<Vec<u16>> {
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u16>()
                .map_err(|_| GateError::Config(format!("Invalid port in sequence: '{part}'")))
        })
        .collect()
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
