//! # Bookchain Testkit
//!
//! Testing utilities for Bookchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned canonical payload bytes and the hash layout
//! - **Generators**: Proptest strategies for valid chains and payloads
//! - **Fixtures**: Deterministic chains and single-field tampering helpers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use bookchain_testkit::vectors::{all_vectors, content_hash_for};
//!
//! for vector in all_vectors() {
//!     println!("{}: {}", vector.name, content_hash_for(&vector));
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bookchain_testkit::generators::{blocks_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn chains_validate(params: ChainParams) {
//!         let blocks = blocks_from_params(&params);
//!         prop_assert!(bookchain_core::validate_chain(&blocks).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bookchain_testkit::fixtures::TestChain;
//!
//! let fixture = TestChain::with_checkouts(3);
//! assert_eq!(fixture.chain.len(), 4);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{checkout, Tamper, TestChain};
pub use generators::{blocks_from_params, ChainParams};
pub use vectors::{all_vectors, content_hash_for, verify_all_vectors, GoldenVector};
