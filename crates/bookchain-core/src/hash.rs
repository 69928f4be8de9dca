//! Content hashing for blocks.
//!
//! Hash input layout (bytes, in order):
//!   1. `DOMAIN` tag
//!   2. position, base-10 ASCII
//!   3. 0x1F
//!   4. timestamp (Unix ms), base-10 ASCII, leading `-` if negative
//!   5. 0x1F
//!   6. canonical CBOR of the payload
//!   7. previous hash as 64 lowercase hex chars (nothing for genesis)
//!
//! The CBOR payload is self-delimiting and the previous hash has a fixed
//! length, so only the two numbers need an explicit separator.

use crate::block::CheckoutRecord;
use crate::canonical::canonical_record_bytes;
use crate::error::CoreError;
use crate::types::BlockHash;

/// Domain separation tag for block content hashes.
pub const DOMAIN: &[u8] = b"bookchain/block/v1\x1f";

const FIELD_SEPARATOR: u8 = 0x1f;

/// Compute the content hash of a block from its parts.
pub fn compute_hash(
    position: u64,
    timestamp: i64,
    payload: &CheckoutRecord,
    previous_hash: Option<&BlockHash>,
) -> Result<BlockHash, CoreError> {
    let input = hash_input(position, timestamp, payload, previous_hash)?;
    Ok(BlockHash::hash(&input))
}

/// Build the exact bytes that [`compute_hash`] digests.
pub fn hash_input(
    position: u64,
    timestamp: i64,
    payload: &CheckoutRecord,
    previous_hash: Option<&BlockHash>,
) -> Result<Vec<u8>, CoreError> {
    let payload_bytes = canonical_record_bytes(payload)?;

    let mut buf = Vec::with_capacity(DOMAIN.len() + payload_bytes.len() + 96);
    buf.extend_from_slice(DOMAIN);
    buf.extend_from_slice(position.to_string().as_bytes());
    buf.push(FIELD_SEPARATOR);
    buf.extend_from_slice(timestamp.to_string().as_bytes());
    buf.push(FIELD_SEPARATOR);
    buf.extend_from_slice(&payload_bytes);
    if let Some(prev) = previous_hash {
        buf.extend_from_slice(prev.to_hex().as_bytes());
    }
    Ok(buf)
}
