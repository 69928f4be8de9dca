//! The Chain: an ordered, append-only sequence of blocks.
//!
//! Every append reads the tail, builds a candidate, validates it and pushes
//! it while holding the write lock, so concurrent appends are serialized.
//! Reads take the read lock and hand out clones.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_core::{
    create_block, now_millis, validate_block, validate_chain, Block, CheckoutRecord, CoreError,
    ValidationError,
};

use crate::error::{ChainError, Result};

/// Configuration for a chain.
#[derive(Debug, Clone, Default)]
pub struct ChainConfig {
    /// Fixed genesis timestamp (Unix ms). Wall-clock time when `None`.
    pub genesis_timestamp: Option<i64>,
}

/// Result of submitting a block to the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The block passed validation and is now the tail.
    Accepted(Block),
    /// The block failed validation; the chain is unchanged.
    Rejected(ValidationError),
}

impl AppendOutcome {
    /// Whether the block was appended.
    pub fn is_accepted(&self) -> bool {
        matches!(self, AppendOutcome::Accepted(_))
    }

    /// The appended block, if any.
    pub fn block(&self) -> Option<&Block> {
        match self {
            AppendOutcome::Accepted(block) => Some(block),
            AppendOutcome::Rejected(_) => None,
        }
    }
}

/// An in-memory, hash-linked chain of checkout blocks.
///
/// Share it between tasks as `Arc<Chain>`.
pub struct Chain {
    blocks: RwLock<Vec<Block>>,
}

impl Chain {
    /// Create a chain holding only a wall-clock genesis block.
    pub fn bootstrap() -> Result<Self> {
        Self::with_config(ChainConfig::default())
    }

    /// Create a chain holding only a genesis block.
    pub fn with_config(config: ChainConfig) -> Result<Self> {
        let timestamp = config.genesis_timestamp.unwrap_or_else(now_millis);
        let genesis = Block::genesis(timestamp)?;

        tracing::info!(
            timestamp,
            genesis_hash = %genesis.content_hash,
            "chain bootstrapped"
        );

        Ok(Self {
            blocks: RwLock::new(vec![genesis]),
        })
    }

    /// Append a checkout event.
    ///
    /// The candidate is built off the current tail and validated under the
    /// same lock. Payloads flagged as genesis are refused.
    pub fn append(&self, payload: CheckoutRecord) -> Result<AppendOutcome> {
        ensure_not_genesis(&payload)?;

        let mut blocks = self.write();
        let candidate = create_block(tail_of(&blocks), payload)?;
        accept(&mut blocks, candidate)
    }

    /// Submit a block built elsewhere, validating it against the current tail.
    pub fn append_block(&self, candidate: Block) -> Result<AppendOutcome> {
        ensure_not_genesis(&candidate.payload)?;

        let mut blocks = self.write();
        accept(&mut blocks, candidate)
    }

    /// All blocks in chain order.
    pub fn snapshot(&self) -> Vec<Block> {
        self.read().clone()
    }

    /// The most recently appended block.
    pub fn tail(&self) -> Block {
        tail_of(&self.read()).clone()
    }

    /// The block at `position`, if the chain is that long.
    pub fn get(&self, position: u64) -> Option<Block> {
        let index = usize::try_from(position).ok()?;
        self.read().get(index).cloned()
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always false: a chain holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Re-check every block from genesis to tail.
    pub fn verify(&self) -> std::result::Result<(), ValidationError> {
        validate_chain(&self.read())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        // Blocks are only ever pushed whole, so a poisoned lock still guards
        // a consistent sequence.
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn tail_of(blocks: &[Block]) -> &Block {
    blocks.last().expect("chain always holds a genesis block")
}

fn ensure_not_genesis(payload: &CheckoutRecord) -> Result<()> {
    if payload.is_genesis {
        return Err(ChainError::MalformedPayload(
            "genesis flag is reserved for the first block".into(),
        ));
    }
    Ok(())
}

fn accept(blocks: &mut Vec<Block>, candidate: Block) -> Result<AppendOutcome> {
    match validate_block(&candidate, tail_of(blocks)) {
        Ok(()) => {
            tracing::debug!(
                position = candidate.position,
                hash = %candidate.content_hash,
                "block appended"
            );
            blocks.push(candidate.clone());
            Ok(AppendOutcome::Accepted(candidate))
        }
        Err(reason) => reject(candidate.position, reason),
    }
}

/// Turn a failed check into an outcome. A hash that could not be recomputed
/// is an error, not a rejection.
fn reject(position: u64, reason: ValidationError) -> Result<AppendOutcome> {
    match reason {
        ValidationError::Encoding(msg) => {
            tracing::error!(position, error = %msg, "could not recompute candidate hash");
            Err(ChainError::Core(CoreError::Encoding(msg)))
        }
        reason => {
            tracing::warn!(position, %reason, "block rejected");
            Ok(AppendOutcome::Rejected(reason))
        }
    }
}
