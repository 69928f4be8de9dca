//! Blocks: immutable, hash-linked records of checkout events.
//!
//! A block is created once by [`create_block`] (or [`Block::genesis`]) and
//! never edited afterwards. The chain grows only by appending new blocks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::hash::compute_hash;
use crate::types::{previous_hash, BlockHash};

/// A book checkout event, the payload carried by every block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
    /// Identifier of the checked-out book.
    pub book_id: String,

    /// Who checked the book out.
    pub user: String,

    /// Client-supplied checkout date. Opaque to the chain.
    pub checkout_date: String,

    /// Set only on the genesis payload.
    #[serde(default)]
    pub is_genesis: bool,
}

impl CheckoutRecord {
    /// Create a regular (non-genesis) checkout record.
    pub fn new(
        book_id: impl Into<String>,
        user: impl Into<String>,
        checkout_date: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user: user.into(),
            checkout_date: checkout_date.into(),
            is_genesis: false,
        }
    }

    /// The payload of a genesis block.
    pub fn genesis() -> Self {
        Self {
            book_id: String::new(),
            user: String::new(),
            checkout_date: String::new(),
            is_genesis: true,
        }
    }
}

/// One link in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (genesis = 0).
    pub position: u64,

    /// The checkout event recorded by this block.
    pub payload: CheckoutRecord,

    /// Creation time in Unix milliseconds.
    pub timestamp: i64,

    /// Hash over (position, timestamp, payload, previous hash).
    pub content_hash: BlockHash,

    /// Content hash of the predecessor (None only for genesis).
    #[serde(with = "previous_hash")]
    pub previous_hash: Option<BlockHash>,
}

impl Block {
    /// Build the genesis block at the given timestamp.
    pub fn genesis(timestamp: i64) -> Result<Self, CoreError> {
        let payload = CheckoutRecord::genesis();
        let content_hash = compute_hash(0, timestamp, &payload, None)?;

        Ok(Self {
            position: 0,
            payload,
            timestamp,
            content_hash,
            previous_hash: None,
        })
    }

    /// Recompute the content hash from this block's own fields.
    pub fn recompute_hash(&self) -> Result<BlockHash, CoreError> {
        compute_hash(
            self.position,
            self.timestamp,
            &self.payload,
            self.previous_hash.as_ref(),
        )
    }

    /// Whether this block carries the genesis payload.
    pub fn is_genesis(&self) -> bool {
        self.payload.is_genesis
    }
}

/// Build the block that follows `previous`, stamped with the current time.
///
/// No validation happens here; acceptance is decided by
/// [`validate_block`](crate::validation::validate_block).
pub fn create_block(previous: &Block, payload: CheckoutRecord) -> Result<Block, CoreError> {
    create_block_at(previous, payload, now_millis())
}

/// Build the block that follows `previous` with an explicit timestamp.
pub fn create_block_at(
    previous: &Block,
    payload: CheckoutRecord,
    timestamp: i64,
) -> Result<Block, CoreError> {
    let position = previous
        .position
        .checked_add(1)
        .ok_or(CoreError::PositionOverflow(previous.position))?;
    let previous_hash = previous.content_hash;
    let content_hash = compute_hash(position, timestamp, &payload, Some(&previous_hash))?;

    Ok(Block {
        position,
        payload,
        timestamp,
        content_hash,
        previous_hash: Some(previous_hash),
    })
}

/// Current wall-clock time in Unix milliseconds.
///
/// Clocks set before the epoch yield negative values.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}
