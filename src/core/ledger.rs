// This is the core ledger implementation - the heart of the system
// The ledger owns the chain and the pending-transaction pool and is the
// sole mutator of both. Callers that interleave mining, submission, and
// resolution must hold exclusive access for the whole operation; the server
// keeps one ledger behind a mutex for exactly that reason.

use crate::core::{hash_block, Block, ProofOfWork, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::current_timestamp;
use log::{info, warn};

/// Proof baked into the genesis block.
pub const GENESIS_PROOF: u64 = 100;
/// Sentinel previous hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// The append-only chain of blocks plus the current pending pool.
///
/// Created once at process start with only the genesis block; lives for the
/// process lifetime. Invariants for every i > 1:
/// `chain[i].previous_hash == hash_block(chain[i-1])`,
/// `chain[i].index == chain[i-1].index + 1`, and
/// `valid_proof(chain[i-1].proof, chain[i].proof)`.
pub struct Ledger {
    chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create a fresh ledger containing only the genesis block.
    pub fn new() -> Result<Ledger> {
        let mut ledger = Ledger {
            chain: vec![],
            pending_transactions: vec![],
        };
        ledger.new_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()))?;
        info!("Ledger initialized with genesis block");
        Ok(ledger)
    }

    /// Queue a transaction for the next mined block. Returns the index of
    /// the block that will hold it.
    pub fn new_transaction(&mut self, transaction: Transaction) -> u64 {
        self.pending_transactions.push(transaction);
        self.last_block().get_index() + 1
    }

    /// Seal the pending pool into a new block and append it to the chain.
    ///
    /// The seal and the pool clear happen together; a submission arriving
    /// while a caller holds the ledger lands either fully before or fully
    /// after this step, never inside it.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> Result<&Block> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => {
                let last = self.chain.last().ok_or(LedgerError::EmptyChain)?;
                hash_block(last)?
            }
        };

        let block = Block::new(
            self.chain.len() as u64 + 1,
            current_timestamp()?,
            std::mem::take(&mut self.pending_transactions),
            proof,
            previous_hash,
        );
        self.chain.push(block);

        let sealed = self
            .chain
            .last()
            .expect("Chain cannot be empty after push - this should never happen");
        info!(
            "Sealed block {} with {} transactions",
            sealed.get_index(),
            sealed.get_transactions().len()
        );
        Ok(sealed)
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger always contains at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        self.chain.as_slice()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        self.pending_transactions.as_slice()
    }

    /// Validate any candidate chain, local or peer-reported.
    ///
    /// Walks each adjacent pair from the second block on and checks the
    /// previous-hash linkage and the proof-of-work bond. An empty chain or a
    /// lone genesis block is valid.
    pub fn is_valid_chain(chain: &[Block]) -> bool {
        for pair in chain.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);

            let prev_hash = match hash_block(prev) {
                Ok(hash) => hash,
                Err(e) => {
                    warn!("Failed to hash block {}: {e}", prev.get_index());
                    return false;
                }
            };
            if cur.get_previous_hash() != prev_hash {
                warn!(
                    "Chain broken at block {}: previous hash mismatch",
                    cur.get_index()
                );
                return false;
            }

            if !ProofOfWork::valid_proof(prev.get_proof(), cur.get_proof()) {
                warn!(
                    "Chain broken at block {}: proof fails validation",
                    cur.get_index()
                );
                return false;
            }
        }
        true
    }

    /// Replace the chain wholesale with a longer valid one from a peer.
    ///
    /// The pending pool is left untouched: mining activity in flight is not
    /// merged or replayed.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        info!(
            "Replacing local chain of length {} with chain of length {}",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction::new("alice".to_string(), "Penny Black".to_string(), 1840, 250)
    }

    /// Mine one honest block on top of the given ledger.
    fn mine(ledger: &mut Ledger) {
        let last = ledger.last_block();
        let proof = ProofOfWork::new(last.get_proof()).run();
        let previous_hash = hash_block(last).unwrap();
        ledger.new_block(proof, Some(previous_hash)).unwrap();
    }

    #[test]
    fn test_genesis_block_shape() {
        let ledger = Ledger::new().unwrap();
        let genesis = ledger.last_block();

        assert_eq!(ledger.len(), 1);
        assert_eq!(genesis.get_index(), 1);
        assert_eq!(genesis.get_proof(), GENESIS_PROOF);
        assert_eq!(genesis.get_previous_hash(), GENESIS_PREVIOUS_HASH);
        assert!(genesis.get_transactions().is_empty());
        assert!(ledger.pending_transactions().is_empty());
    }

    #[test]
    fn test_new_transaction_targets_next_block() {
        let mut ledger = Ledger::new().unwrap();

        let index = ledger.new_transaction(sample_transaction());

        assert_eq!(index, 2);
        assert_eq!(ledger.pending_transactions().len(), 1);
    }

    #[test]
    fn test_sealing_moves_exactly_the_pending_pool() {
        let mut ledger = Ledger::new().unwrap();
        ledger.new_transaction(sample_transaction());

        mine(&mut ledger);

        let block = ledger.last_block();
        assert_eq!(block.get_index(), 2);
        assert_eq!(block.get_transactions(), &[sample_transaction()]);
        assert!(ledger.pending_transactions().is_empty());
    }

    #[test]
    fn test_mining_with_empty_pool_is_valid() {
        let mut ledger = Ledger::new().unwrap();

        mine(&mut ledger);

        assert!(ledger.last_block().get_transactions().is_empty());
        assert!(Ledger::is_valid_chain(ledger.chain()));
    }

    #[test]
    fn test_honestly_built_chain_is_valid() {
        let mut ledger = Ledger::new().unwrap();
        for _ in 0..3 {
            ledger.new_transaction(sample_transaction());
            mine(&mut ledger);
        }

        assert_eq!(ledger.len(), 4);
        assert!(Ledger::is_valid_chain(ledger.chain()));
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut ledger = Ledger::new().unwrap();
        mine(&mut ledger);
        mine(&mut ledger);

        let chain = ledger.chain();
        for pair in chain.windows(2) {
            assert!(pair[0].get_timestamp() <= pair[1].get_timestamp());
        }
    }

    #[test]
    fn test_tampered_previous_hash_invalidates_chain() {
        let mut ledger = Ledger::new().unwrap();
        mine(&mut ledger);
        mine(&mut ledger);

        let mut chain = ledger.chain().to_vec();
        let victim = &chain[2];
        chain[2] = Block::new(
            victim.get_index(),
            victim.get_timestamp(),
            victim.get_transactions().to_vec(),
            victim.get_proof(),
            "tampered".to_string(),
        );

        assert!(!Ledger::is_valid_chain(&chain));
    }

    #[test]
    fn test_non_satisfying_proof_invalidates_chain() {
        let mut ledger = Ledger::new().unwrap();
        mine(&mut ledger);

        let mut chain = ledger.chain().to_vec();
        let victim = &chain[1];
        chain[1] = Block::new(
            victim.get_index(),
            victim.get_timestamp(),
            victim.get_transactions().to_vec(),
            victim.get_proof() + 1,
            victim.get_previous_hash().to_string(),
        );

        assert!(!Ledger::is_valid_chain(&chain));
    }

    #[test]
    fn test_empty_and_single_block_chains_are_valid() {
        assert!(Ledger::is_valid_chain(&[]));
        let ledger = Ledger::new().unwrap();
        assert!(Ledger::is_valid_chain(ledger.chain()));
    }

    #[test]
    fn test_replace_chain_keeps_pending_pool() {
        let mut ledger = Ledger::new().unwrap();
        ledger.new_transaction(sample_transaction());

        let mut other = Ledger::new().unwrap();
        mine(&mut other);
        let replacement = other.chain().to_vec();

        ledger.replace_chain(replacement);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.pending_transactions().len(), 1);
    }
}
