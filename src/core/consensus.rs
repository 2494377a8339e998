// Longest-valid-chain conflict resolution between nodes.
//
// The rule compares chain length only, not cumulative work. With a constant
// difficulty prefix the two are equivalent; if difficulty ever became
// variable this rule would need strengthening.

use crate::core::{Block, Ledger};
use crate::error::{LedgerError, Result};
use log::{info, warn};

/// Whether a resolution round replaced the local chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Replaced,
    Kept,
}

impl ResolveOutcome {
    pub fn replaced(&self) -> bool {
        matches!(self, ResolveOutcome::Replaced)
    }
}

pub struct ConsensusResolver;

impl ConsensusResolver {
    /// Scan already-materialized candidate chains and replace the local
    /// chain if a strictly longer valid one exists.
    ///
    /// Ties never replace. A malformed or empty candidate is skipped and
    /// does not abort evaluation of the rest; no candidate's fault degrades
    /// the local chain. The pending pool is untouched either way.
    pub fn resolve<I>(ledger: &mut Ledger, candidates: I) -> ResolveOutcome
    where
        I: IntoIterator<Item = Vec<Block>>,
    {
        let mut best: Option<Vec<Block>> = None;
        let mut best_len = ledger.len();

        for candidate in candidates {
            match Self::screen_candidate(&candidate, best_len) {
                Ok(()) => {
                    best_len = candidate.len();
                    best = Some(candidate);
                }
                Err(e) => {
                    warn!("Skipping candidate chain: {e}");
                }
            }
        }

        match best {
            Some(chain) => {
                ledger.replace_chain(chain);
                info!("Local chain replaced by peer chain of length {best_len}");
                ResolveOutcome::Replaced
            }
            None => {
                info!("Local chain is authoritative at length {}", ledger.len());
                ResolveOutcome::Kept
            }
        }
    }

    /// A candidate beats the running best only if it is strictly longer and
    /// passes full validation.
    fn screen_candidate(candidate: &[Block], best_len: usize) -> Result<()> {
        if candidate.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        if candidate.len() <= best_len {
            return Err(LedgerError::InvalidChain(format!(
                "candidate length {} does not exceed current best {best_len}",
                candidate.len()
            )));
        }
        if !Ledger::is_valid_chain(candidate) {
            return Err(LedgerError::InvalidChain(
                "candidate failed chain validation".to_string(),
            ));
        }
        Ok(())
    }
}
