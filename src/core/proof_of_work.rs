use crate::utils::sha256_digest;
use data_encoding::HEXLOWER;
use log::info;

/// Leading hex digits a valid proof's digest must exhibit. Constant; there
/// is no retargeting.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// The proof-of-work puzzle for one block.
///
/// Finding a proof is expensive (linear search over SHA-256 digests) while
/// checking one is a single hash. That asymmetry is the entire basis of
/// "work" in this scheme, and the longest-valid-chain rule depends on it.
///
/// The search runs to completion once started; wrapping it in a value keeps
/// room for a future bound without changing the `valid_proof` contract.
pub struct ProofOfWork {
    last_proof: u64,
}

impl ProofOfWork {
    pub fn new(last_proof: u64) -> ProofOfWork {
        ProofOfWork { last_proof }
    }

    /// Check whether `sha256("{last_proof}{proof}")` begins with the
    /// difficulty prefix.
    pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        let digest = HEXLOWER.encode(&sha256_digest(guess.as_bytes()));
        digest.starts_with(DIFFICULTY_PREFIX)
    }

    /// Search for the smallest proof satisfying `valid_proof` against the
    /// previous block's proof. Deterministic: the same `last_proof` always
    /// yields the same answer, so any peer can re-run the check.
    pub fn run(&self) -> u64 {
        info!("Starting proof-of-work search from last proof {}", self.last_proof);
        let mut proof: u64 = 0;
        while !Self::valid_proof(self.last_proof, proof) {
            proof += 1;
        }
        info!("Proof-of-work completed: {proof}");
        proof
    }
}
