//! End-to-end behaviour of the chain through its public API.

use std::sync::Arc;
use std::thread;

use bookchain::core::{create_block_at, is_valid, validate_chain};
use bookchain::{AppendOutcome, Chain, ChainConfig, CheckoutRecord, ValidationError};
use proptest::prelude::*;

const TS: i64 = 1_736_870_400_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn fixed_chain() -> Chain {
    Chain::with_config(ChainConfig {
        genesis_timestamp: Some(TS),
    })
    .unwrap()
}

#[test]
fn genesis_then_two_appends() {
    init_tracing();
    let chain = Chain::bootstrap().unwrap();

    let a = chain
        .append(CheckoutRecord::new("book-a", "ada", "2024-01-01"))
        .unwrap();
    let b = chain
        .append(CheckoutRecord::new("book-b", "bob", "2024-01-02"))
        .unwrap();
    assert!(a.is_accepted());
    assert!(b.is_accepted());

    let blocks = chain.snapshot();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks.iter().map(|b| b.position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    for pair in blocks.windows(2) {
        assert_eq!(pair[1].previous_hash, Some(pair[0].content_hash));
        assert!(is_valid(&pair[1], &pair[0]));
    }
    assert_eq!(blocks[1].payload.book_id, "book-a");
    assert_eq!(blocks[2].payload.user, "bob");
}

#[test]
fn fresh_chain_has_only_genesis() {
    let chain = Chain::bootstrap().unwrap();
    let blocks = chain.snapshot();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].position, 0);
    assert!(blocks[0].payload.is_genesis);
    assert_eq!(blocks[0].previous_hash, None);
}

#[test]
fn off_by_one_candidate_leaves_chain_unchanged() {
    init_tracing();
    let chain = fixed_chain();
    let genesis = chain.tail();

    let mut candidate =
        create_block_at(&genesis, CheckoutRecord::new("b", "eve", "d"), TS + 5).unwrap();
    candidate.position += 1;

    let outcome = chain.append_block(candidate).unwrap();
    assert!(matches!(outcome, AppendOutcome::Rejected(_)));
    assert_eq!(chain.snapshot().len(), 1);
}

#[test]
fn skipped_position_is_rejected() {
    let chain = fixed_chain();
    chain.append(CheckoutRecord::new("b", "ada", "d")).unwrap();
    chain.append(CheckoutRecord::new("b", "bob", "d")).unwrap();
    let tail = chain.tail();
    assert_eq!(tail.position, 2);

    let mut skip = create_block_at(&tail, CheckoutRecord::new("b", "eve", "d"), TS).unwrap();
    skip.position = 4;
    skip.content_hash = skip.recompute_hash().unwrap();

    let outcome = chain.append_block(skip).unwrap();
    assert_eq!(
        outcome,
        AppendOutcome::Rejected(ValidationError::InvalidPosition {
            expected: 3,
            got: 4
        })
    );
    assert_eq!(chain.len(), 3);
}

#[test]
fn snapshot_round_trips_through_json() {
    let chain = fixed_chain();
    chain.append(CheckoutRecord::new("b", "ada", "d")).unwrap();

    let json = serde_json::to_string(&chain.snapshot()).unwrap();
    let blocks: Vec<bookchain::Block> = serde_json::from_str(&json).unwrap();

    assert_eq!(blocks, chain.snapshot());
    assert!(validate_chain(&blocks).is_ok());
}

#[test]
fn concurrent_appends_keep_chain_linear() {
    init_tracing();
    let chain = Arc::new(fixed_chain());
    let writers = 8;
    let per_writer = 25;

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let chain = Arc::clone(&chain);
            thread::spawn(move || {
                for i in 0..per_writer {
                    let outcome = chain
                        .append(CheckoutRecord::new(
                            format!("book-{i}"),
                            format!("writer-{w}"),
                            "2024-01-01",
                        ))
                        .unwrap();
                    assert!(outcome.is_accepted());
                }
            })
        })
        .collect();

    // Readers run alongside the writers.
    for _ in 0..10 {
        let snapshot = chain.snapshot();
        assert!(validate_chain(&snapshot).is_ok());
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(chain.len(), 1 + writers * per_writer);
    assert!(chain.verify().is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_appended_block_validates_against_its_predecessor(
        users in prop::collection::vec("[a-z]{1,12}", 1..20)
    ) {
        let chain = fixed_chain();
        for user in &users {
            let outcome = chain.append(CheckoutRecord::new("book", user.as_str(), "d")).unwrap();
            prop_assert!(outcome.is_accepted());
        }

        let blocks = chain.snapshot();
        prop_assert_eq!(blocks.len(), users.len() + 1);
        for pair in blocks.windows(2) {
            prop_assert!(is_valid(&pair[1], &pair[0]));
        }
    }
}
