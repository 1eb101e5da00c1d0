//! # Error Types
//!
//! Error handling for the knock gate.
//!
//! After startup the decision path is infallible: classification and state
//! transitions are total functions, and malformed input is classified as
//! not-applicable rather than reported as an error. Everything that *can*
//! fail (configuration loading and validation, socket setup for the
//! reference hook) surfaces through [`GateError`].
//!
//! All errors implement `std::error::Error` for interoperability.

use std::io;
use thiserror::Error;

/// Primary error type for gate setup and hook operations.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Socket error: {0}")]
    Socket(#[from] nix::errno::Errno),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

/// Type alias for Results using GateError
pub type Result<T> = std::result::Result<T, GateError>;
