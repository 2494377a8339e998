//! Configuration management
//!
//! This module handles basic configuration settings for a ledger node,
//! including the network address it serves on and its node identifier.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
