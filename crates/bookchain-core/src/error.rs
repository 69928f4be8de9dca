//! Error types for Bookchain core.

use thiserror::Error;

use crate::types::BlockHash;

/// Errors that can occur while building or encoding blocks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("malformed checkout record: {0}")]
    MalformedRecord(String),

    #[error("position overflow after {0}")]
    PositionOverflow(u64),
}

/// Reasons a candidate block fails validation against its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("previous hash mismatch: tail is {expected}, candidate links to {got:?}")]
    PreviousHashMismatch {
        expected: BlockHash,
        got: Option<BlockHash>,
    },

    #[error("content hash mismatch at position {position}: stored {stored}, computed {computed}")]
    ContentHashMismatch {
        position: u64,
        stored: BlockHash,
        computed: BlockHash,
    },

    #[error("invalid position: expected {expected}, got {got}")]
    InvalidPosition { expected: u64, got: u64 },

    #[error("invalid genesis block: {0}")]
    InvalidGenesis(String),

    #[error("chain is empty")]
    EmptyChain,

    #[error("could not recompute hash: {0}")]
    Encoding(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        ValidationError::Encoding(e.to_string())
    }
}
