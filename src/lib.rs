//! # Stamp Ledger - A Minimal Distributed Ledger
//!
//! A single, appendable, hash-linked chain of blocks, each holding a batch
//! of stamp-collecting transactions, produced by a SHA-256 proof-of-work
//! puzzle and reconciled across nodes by the longest-valid-chain rule.
//!
//! ## How the code is organized
//! - `core/`: the ledger engine (blocks, transactions, mining, chain
//!   validation, consensus resolution)
//! - `network/`: the request server exposing the ledger operations, the
//!   client for driving a node and fetching peer chains, and the peer
//!   registry
//! - `config/`: node address and identity settings
//! - `cli/`: command-line interface for all node operations
//! - `utils/`: hashing and timestamp helpers
//!
//! ## Key design decisions
//! - The ledger is one owned instance behind an explicit mutex; mining,
//!   submission, and chain replacement each hold it for their whole
//!   duration, so the pending pool can never be half-sealed
//! - Block hashing uses a canonical serialization (sorted JSON keys) so any
//!   two nodes agree on every digest
//! - Conflict resolution compares chain length only; difficulty is a
//!   constant prefix, so length and cumulative work are interchangeable

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod network;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    hash_block, Block, ConsensusResolver, Ledger, ProofOfWork, ResolveOutcome, Transaction,
    DIFFICULTY_PREFIX, GENESIS_PREVIOUS_HASH, GENESIS_PROOF,
};
pub use error::{LedgerError, Result};
pub use network::{fetch_chain, send_request, PeerRegistry, Request, Response, Server};
pub use utils::{current_timestamp, sha256_digest};
