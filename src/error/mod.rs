//! Error handling for the ledger
//!
//! This module provides comprehensive error types for all ledger operations.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Comprehensive error types for ledger operations
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// A transaction submission is missing a required field
    MissingField(String),
    /// A candidate chain failed validation
    InvalidChain(String),
    /// A chain with zero blocks was received from a peer
    EmptyChain,
    /// A peer could not be reached during resolution
    UnreachablePeer(String),
    /// Network communication errors
    Network(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// Cryptographic operation errors
    Crypto(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::MissingField(field) => {
                write!(f, "Missing required transaction field: {field}")
            }
            LedgerError::InvalidChain(msg) => write!(f, "Invalid chain: {msg}"),
            LedgerError::EmptyChain => write!(f, "Chain contains no blocks"),
            LedgerError::UnreachablePeer(addr) => write!(f, "Unreachable peer: {addr}"),
            LedgerError::Network(msg) => write!(f, "Network error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}
