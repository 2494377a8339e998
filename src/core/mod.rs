//! Core ledger functionality
//!
//! This module contains the fundamental ledger components including
//! blocks, transactions, chain management, proof-of-work, and the
//! longest-valid-chain consensus rule.

pub mod block;
pub mod consensus;
pub mod ledger;
pub mod proof_of_work;
pub mod transaction;

pub use block::{hash_block, Block};
pub use consensus::{ConsensusResolver, ResolveOutcome};
pub use ledger::{Ledger, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use proof_of_work::{ProofOfWork, DIFFICULTY_PREFIX};
pub use transaction::Transaction;
