//! Utility functions and helpers
//!
//! This module contains cryptographic utilities and other helper
//! functions used throughout the ledger.

pub mod crypto;

pub use crypto::{current_timestamp, sha256_digest};
