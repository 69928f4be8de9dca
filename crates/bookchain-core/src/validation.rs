//! Block validation: linkage, tamper and sequencing checks.

use crate::block::Block;
use crate::error::ValidationError;

/// Validate a candidate block against the block it claims to follow.
///
/// Checks run in this order and stop at the first failure:
/// 1. The candidate links to `previous.content_hash` (stale tail)
/// 2. The candidate's stored hash matches a recomputation (tampering)
/// 3. The candidate sits exactly one position after `previous`
pub fn validate_block(candidate: &Block, previous: &Block) -> Result<(), ValidationError> {
    // 1. Linkage
    if candidate.previous_hash != Some(previous.content_hash) {
        return Err(ValidationError::PreviousHashMismatch {
            expected: previous.content_hash,
            got: candidate.previous_hash,
        });
    }

    // 2. Content hash
    let computed = candidate.recompute_hash()?;
    if computed != candidate.content_hash {
        return Err(ValidationError::ContentHashMismatch {
            position: candidate.position,
            stored: candidate.content_hash,
            computed,
        });
    }

    // 3. Sequencing
    let expected = previous.position.checked_add(1);
    if expected != Some(candidate.position) {
        return Err(ValidationError::InvalidPosition {
            expected: expected.unwrap_or(u64::MAX),
            got: candidate.position,
        });
    }

    Ok(())
}

/// Boolean form of [`validate_block`].
pub fn is_valid(candidate: &Block, previous: &Block) -> bool {
    validate_block(candidate, previous).is_ok()
}

/// Validate a block as the first block of a chain.
pub fn validate_genesis(block: &Block) -> Result<(), ValidationError> {
    if block.position != 0 {
        return Err(ValidationError::InvalidGenesis(format!(
            "position {}",
            block.position
        )));
    }
    if block.previous_hash.is_some() {
        return Err(ValidationError::InvalidGenesis(
            "genesis must not link to a predecessor".into(),
        ));
    }
    if !block.is_genesis() {
        return Err(ValidationError::InvalidGenesis(
            "payload is not flagged as genesis".into(),
        ));
    }

    let computed = block.recompute_hash()?;
    if computed != block.content_hash {
        return Err(ValidationError::ContentHashMismatch {
            position: 0,
            stored: block.content_hash,
            computed,
        });
    }
    Ok(())
}

/// Validate an entire chain from genesis to tail.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ValidationError> {
    let genesis = blocks.first().ok_or(ValidationError::EmptyChain)?;
    validate_genesis(genesis)?;

    for pair in blocks.windows(2) {
        validate_block(&pair[1], &pair[0])?;
    }
    Ok(())
}
