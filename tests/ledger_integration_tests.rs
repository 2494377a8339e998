//! Ledger integration tests
//!
//! Tests the core ledger functionality end to end, focusing on the
//! critical flows: submit, mine, validate, and resolve.

use stamp_ledger::{
    hash_block, ConsensusResolver, Ledger, ProofOfWork, ResolveOutcome, Transaction,
};

/// Mine one honest block on top of the given ledger.
fn mine(ledger: &mut Ledger) {
    let last = ledger.last_block();
    let proof = ProofOfWork::new(last.get_proof()).run();
    let previous_hash = hash_block(last).unwrap();
    ledger.new_block(proof, Some(previous_hash)).unwrap();
}

fn build_ledger(extra_blocks: usize) -> Ledger {
    let mut ledger = Ledger::new().unwrap();
    for _ in 0..extra_blocks {
        mine(&mut ledger);
    }
    ledger
}

#[test]
fn test_submit_then_mine_places_exactly_that_transaction() {
    let mut ledger = Ledger::new().unwrap();

    let tx = Transaction::new("alice".to_string(), "Penny Black".to_string(), 1840, 250);
    let target_index = ledger.new_transaction(tx.clone());
    assert_eq!(target_index, 2);

    mine(&mut ledger);

    let block = ledger.last_block();
    assert_eq!(block.get_index(), target_index);
    assert_eq!(block.get_transactions(), &[tx]);
    assert!(ledger.pending_transactions().is_empty());
}

#[test]
fn test_chain_grows_valid_from_genesis() {
    let ledger = build_ledger(4);

    assert_eq!(ledger.len(), 5);
    assert!(Ledger::is_valid_chain(ledger.chain()));

    // Indexes increase by exactly one per block
    for (i, block) in ledger.chain().iter().enumerate() {
        assert_eq!(block.get_index(), i as u64 + 1);
    }
}

#[test]
fn test_every_block_is_bonded_to_its_predecessor() {
    let ledger = build_ledger(3);
    let chain = ledger.chain();

    for pair in chain.windows(2) {
        assert_eq!(
            pair[1].get_previous_hash(),
            hash_block(&pair[0]).unwrap()
        );
        assert!(ProofOfWork::valid_proof(
            pair[0].get_proof(),
            pair[1].get_proof()
        ));
    }
}

#[test]
fn test_proof_of_work_round_trip() {
    let ledger = build_ledger(1);
    let last_proof = ledger.last_block().get_proof();

    let proof = ProofOfWork::new(last_proof).run();
    assert!(ProofOfWork::valid_proof(last_proof, proof));
}

#[test]
fn test_mining_on_an_empty_pool() {
    let mut ledger = Ledger::new().unwrap();

    mine(&mut ledger);

    assert!(ledger.last_block().get_transactions().is_empty());
    assert!(Ledger::is_valid_chain(ledger.chain()));
}

#[test]
fn test_resolve_adopts_longer_valid_peer_chain() {
    // Local chain of length 3, one valid peer chain of length 5
    let mut local = build_ledger(2);
    let peer = build_ledger(4).chain().to_vec();

    let outcome = ConsensusResolver::resolve(&mut local, vec![peer.clone()]);

    assert_eq!(outcome, ResolveOutcome::Replaced);
    assert_eq!(local.chain(), peer.as_slice());
}

#[test]
fn test_resolve_keeps_local_over_longer_invalid_peer() {
    let mut local = build_ledger(2);
    let original = local.chain().to_vec();

    // A length-5 peer chain with a proof swapped out fails validation
    let mut peer = build_ledger(4).chain().to_vec();
    let tip = peer.last().unwrap().clone();
    *peer.last_mut().unwrap() = stamp_ledger::Block::new(
        tip.get_index(),
        tip.get_timestamp(),
        tip.get_transactions().to_vec(),
        tip.get_proof() + 1,
        tip.get_previous_hash().to_string(),
    );

    let outcome = ConsensusResolver::resolve(&mut local, vec![peer]);

    assert_eq!(outcome, ResolveOutcome::Kept);
    assert_eq!(local.chain(), original.as_slice());
}

#[test]
fn test_resolve_survives_one_bad_peer_among_many() {
    let mut local = build_ledger(2);
    let good = build_ledger(4).chain().to_vec();

    // Empty chains must be rejected defensively when received externally
    let outcome = ConsensusResolver::resolve(&mut local, vec![vec![], good]);

    assert_eq!(outcome, ResolveOutcome::Replaced);
    assert_eq!(local.len(), 5);
}

#[test]
fn test_pending_pool_survives_resolution() {
    let mut local = build_ledger(2);
    local.new_transaction(Transaction::new(
        "bob".to_string(),
        "Inverted Jenny".to_string(),
        1918,
        1000,
    ));
    let peer = build_ledger(4).chain().to_vec();

    ConsensusResolver::resolve(&mut local, vec![peer]);

    // Mining activity in flight is not merged or replayed, just kept pending
    assert_eq!(local.pending_transactions().len(), 1);
    let target = local.new_transaction(Transaction::new(
        "carol".to_string(),
        "Treskilling Yellow".to_string(),
        1855,
        3000,
    ));
    assert_eq!(target, 6);
}
