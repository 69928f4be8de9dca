//! # Bookchain Core
//!
//! Pure primitives for Bookchain: blocks, canonical payload encoding, content
//! hashing and validation.
//!
//! This crate contains no I/O, no locking and no networking.
//!
//! ## Key Types
//!
//! - [`Block`] - An immutable, hash-linked record
//! - [`CheckoutRecord`] - The checkout event a block carries
//! - [`BlockHash`] - 32-byte BLAKE3 content hash
//! - [`Book`] - Catalogue entry with a derived id
//!
//! ## Building and checking blocks
//!
//! ```rust
//! use bookchain_core::{create_block_at, is_valid, Block, CheckoutRecord};
//!
//! let genesis = Block::genesis(0).unwrap();
//! let block = create_block_at(&genesis, CheckoutRecord::new("b-1", "ada", "2024-01-01"), 1)
//!     .unwrap();
//! assert!(is_valid(&block, &genesis));
//! ```

pub mod block;
pub mod book;
pub mod canonical;
pub mod error;
pub mod hash;
pub mod types;
pub mod validation;

pub use block::{create_block, create_block_at, now_millis, Block, CheckoutRecord};
pub use book::{derive_book_id, Book};
pub use canonical::{canonical_record_bytes, decode_record};
pub use error::{CoreError, ValidationError};
pub use hash::compute_hash;
pub use types::BlockHash;
pub use validation::{is_valid, validate_block, validate_chain, validate_genesis};
