//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bookchain::{Block, BlockHash, Chain, ChainConfig, CheckoutRecord};
use bookchain_core::create_block_at;

/// Genesis timestamp used by every fixture chain.
pub const GENESIS_TIMESTAMP: i64 = 1_736_870_400_000;

/// A chain with a fixed genesis timestamp.
pub struct TestChain {
    pub chain: Chain,
}

impl TestChain {
    /// Create a chain holding only genesis.
    pub fn new() -> Self {
        let chain = Chain::with_config(ChainConfig {
            genesis_timestamp: Some(GENESIS_TIMESTAMP),
        })
        .expect("genesis always builds");
        Self { chain }
    }

    /// Create a chain with `count` checkouts appended after genesis.
    pub fn with_checkouts(count: usize) -> Self {
        let fixture = Self::new();
        for i in 0..count {
            let outcome = fixture
                .chain
                .append(checkout(i))
                .expect("fixture checkout appends");
            assert!(outcome.is_accepted(), "fixture checkout {} rejected", i);
        }
        fixture
    }

    /// Build a valid candidate off the current tail without appending it.
    pub fn candidate(&self, payload: CheckoutRecord) -> Block {
        create_block_at(&self.chain.tail(), payload, GENESIS_TIMESTAMP + 1)
            .expect("candidate always builds")
    }
}

impl Default for TestChain {
    fn default() -> Self {
        Self::new()
    }
}

/// The i-th fixture checkout.
pub fn checkout(i: usize) -> CheckoutRecord {
    CheckoutRecord::new(
        format!("book-{}", i),
        format!("user-{}", i % 3),
        "2024-01-14",
    )
}

/// A single-field modification applied without recomputing the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tamper {
    Position,
    Timestamp,
    PreviousHash,
    BookId,
    User,
    CheckoutDate,
    GenesisFlag,
}

impl Tamper {
    /// Every kind of tampering.
    pub const ALL: [Tamper; 7] = [
        Tamper::Position,
        Tamper::Timestamp,
        Tamper::PreviousHash,
        Tamper::BookId,
        Tamper::User,
        Tamper::CheckoutDate,
        Tamper::GenesisFlag,
    ];

    /// Return a copy of `block` with one field changed.
    pub fn apply(self, block: &Block) -> Block {
        let mut t = block.clone();
        match self {
            Tamper::Position => t.position = t.position.wrapping_add(1),
            Tamper::Timestamp => t.timestamp = t.timestamp.wrapping_add(1),
            Tamper::PreviousHash => {
                let mut bytes = t.previous_hash.map(|h| h.0).unwrap_or_default();
                bytes[0] ^= 0xff;
                t.previous_hash = Some(BlockHash::from_bytes(bytes));
            }
            Tamper::BookId => t.payload.book_id.push('!'),
            Tamper::User => t.payload.user.push('!'),
            Tamper::CheckoutDate => t.payload.checkout_date.push('!'),
            Tamper::GenesisFlag => t.payload.is_genesis = !t.payload.is_genesis,
        }
        t
    }
}
