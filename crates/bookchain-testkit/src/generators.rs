//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bookchain_core::{create_block_at, Block, BlockHash, CheckoutRecord};

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp (Unix ms).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800_000
}

/// Generate a non-genesis checkout record.
pub fn checkout_record() -> impl Strategy<Value = CheckoutRecord> {
    ("[a-z0-9-]{0,16}", "\\PC{0,16}", "[0-9]{4}-[0-9]{2}-[0-9]{2}").prop_map(
        |(book_id, user, date)| CheckoutRecord::new(book_id, user, date),
    )
}

/// Parameters for generating a valid chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub genesis_timestamp: i64,
    pub checkouts: Vec<(CheckoutRecord, i64)>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            timestamp(),
            prop::collection::vec((checkout_record(), timestamp()), 0..16),
        )
            .prop_map(|(genesis_timestamp, checkouts)| ChainParams {
                genesis_timestamp,
                checkouts,
            })
            .boxed()
    }
}

/// Build the block sequence described by `params`.
pub fn blocks_from_params(params: &ChainParams) -> Vec<Block> {
    let genesis = Block::genesis(params.genesis_timestamp).expect("genesis always builds");
    let mut blocks = vec![genesis];
    for (payload, ts) in &params.checkouts {
        let tail = blocks.last().expect("starts with genesis");
        let block = create_block_at(tail, payload.clone(), *ts).expect("block always builds");
        blocks.push(block);
    }
    blocks
}
