use crate::core::Transaction;
use crate::error::Result;
use crate::utils::sha256_digest;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};

/// A sealed, immutable unit of the chain.
///
/// A block never changes once appended; it is owned exclusively by the
/// ledger's chain and leaves it only by value when serialized for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: i64,
    transactions: Vec<Transaction>,
    proof: u64,
    previous_hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp: i64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Block {
        Block {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_proof(&self) -> u64 {
        self.proof
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }
}

/// Compute the SHA-256 hex digest of a block's canonical serialization.
///
/// The block is rendered as JSON with alphabetically sorted keys before
/// hashing, so two nodes hashing logically-identical blocks always produce
/// the same digest. Any change to any field, including transaction order,
/// changes the digest. This is the integrity bond between consecutive blocks.
pub fn hash_block(block: &Block) -> Result<String> {
    // serde_json::Value objects are BTreeMap-backed, which sorts the keys
    let value = serde_json::to_value(block)?;
    let canonical = serde_json::to_string(&value)?;
    Ok(HEXLOWER.encode(&sha256_digest(canonical.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new("alice".to_string(), "Penny Black".to_string(), 1840, 250),
            Transaction::new("bob".to_string(), "Inverted Jenny".to_string(), 1918, 1000),
        ]
    }

    #[test]
    fn test_hash_is_deterministic() {
        let block = Block::new(2, 1700000000000, sample_transactions(), 35293, "abc".to_string());

        let first = hash_block(&block).unwrap();
        let second = hash_block(&block).unwrap();
        assert_eq!(first, second);

        // A logically identical block hashes to the same digest
        let clone = Block::new(2, 1700000000000, sample_transactions(), 35293, "abc".to_string());
        assert_eq!(first, hash_block(&clone).unwrap());
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let block = Block::new(1, 0, vec![], 100, "1".to_string());
        let digest = hash_block(&block).unwrap();

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_changing_any_field_changes_hash() {
        let base = Block::new(2, 1700000000000, sample_transactions(), 35293, "abc".to_string());
        let base_hash = hash_block(&base).unwrap();

        let variants = vec![
            Block::new(3, 1700000000000, sample_transactions(), 35293, "abc".to_string()),
            Block::new(2, 1700000000001, sample_transactions(), 35293, "abc".to_string()),
            Block::new(2, 1700000000000, vec![], 35293, "abc".to_string()),
            Block::new(2, 1700000000000, sample_transactions(), 35294, "abc".to_string()),
            Block::new(2, 1700000000000, sample_transactions(), 35293, "abd".to_string()),
        ];

        for variant in variants {
            assert_ne!(base_hash, hash_block(&variant).unwrap());
        }
    }

    #[test]
    fn test_transaction_order_is_hashed() {
        let mut reversed = sample_transactions();
        reversed.reverse();

        let forward = Block::new(2, 0, sample_transactions(), 35293, "abc".to_string());
        let backward = Block::new(2, 0, reversed, 35293, "abc".to_string());

        assert_ne!(hash_block(&forward).unwrap(), hash_block(&backward).unwrap());
    }
}
