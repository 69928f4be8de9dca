//! # Bookchain
//!
//! An in-memory, append-only, hash-linked log of book checkouts.
//!
//! ## Overview
//!
//! - **Block**: Immutable. Never edited. Bound to its predecessor by hash.
//! - **Chain**: Starts with one genesis block and only grows at the tail.
//! - **Append**: Builds a candidate off the tail, validates it, and either
//!   accepts it or reports why it was rejected.
//!
//! ## Usage
//!
//! ```rust
//! use bookchain::{AppendOutcome, Chain, CheckoutRecord};
//!
//! let chain = Chain::bootstrap().unwrap();
//!
//! let outcome = chain
//!     .append(CheckoutRecord::new("book-1", "ada", "2024-01-01"))
//!     .unwrap();
//! assert!(matches!(outcome, AppendOutcome::Accepted(_)));
//!
//! let blocks = chain.snapshot();
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[1].previous_hash, Some(blocks[0].content_hash));
//! ```
//!
//! ## Re-exports
//!
//! `bookchain::core` re-exports the primitives crate.

pub mod chain;
pub mod error;

pub use bookchain_core as core;

pub use chain::{AppendOutcome, Chain, ChainConfig};
pub use error::{ChainError, Result};

pub use bookchain_core::{
    derive_book_id, Block, BlockHash, Book, CheckoutRecord, CoreError, ValidationError,
};
