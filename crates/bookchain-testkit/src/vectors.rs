//! Golden test vectors for the block hash layout.
//!
//! Both the canonical payload bytes and the resulting content hashes are
//! pinned. Any change to the domain tag, the field layout or the digest shows
//! up here as a mismatch.

use bookchain_core::canonical_record_bytes;
use bookchain_core::hash::{compute_hash, hash_input};
use bookchain_core::{BlockHash, CheckoutRecord};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub position: u64,
    pub timestamp: i64,
    pub book_id: &'static str,
    pub user: &'static str,
    pub checkout_date: &'static str,
    pub is_genesis: bool,
    /// Predecessor hash bytes (None for genesis).
    pub previous_hash: Option<[u8; 32]>,
    /// Expected canonical payload bytes (hex).
    pub expected_payload_cbor: &'static str,
    /// Expected content hash (hex).
    pub expected_content_hash: &'static str,
}

impl GoldenVector {
    /// The vector's payload.
    pub fn payload(&self) -> CheckoutRecord {
        CheckoutRecord {
            book_id: self.book_id.to_string(),
            user: self.user.to_string(),
            checkout_date: self.checkout_date.to_string(),
            is_genesis: self.is_genesis,
        }
    }

    /// The vector's predecessor hash.
    pub fn previous(&self) -> Option<BlockHash> {
        self.previous_hash.map(BlockHash::from_bytes)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis",
            position: 0,
            timestamp: 1_736_870_400_000,
            book_id: "",
            user: "",
            checkout_date: "",
            is_genesis: true,
            previous_hash: None,
            expected_payload_cbor: "a400600160026003f5",
            expected_content_hash:
                "1e60dac98059bb187df6370098a7f46a2fe41dc21e3c49d9e04737149ec8bb8a",
        },
        GoldenVector {
            name: "first checkout",
            position: 1,
            timestamp: 1_736_870_401_000,
            book_id: "book-1",
            user: "ada",
            checkout_date: "2024-01-14",
            is_genesis: false,
            previous_hash: Some([0xaa; 32]),
            expected_payload_cbor:
                "a40066626f6f6b2d310163616461026a323032342d30312d313403f4",
            expected_content_hash:
                "444592fe968ea2386bd67163e262407ee0f8a484e3b1e1362ccb8e7d1d682c08",
        },
        GoldenVector {
            name: "non-ascii user at epoch",
            position: 42,
            timestamp: 0,
            book_id: "978-0",
            user: "José",
            checkout_date: "",
            is_genesis: false,
            previous_hash: Some([0x00; 32]),
            expected_payload_cbor: "a400653937382d3001654a6f73c3a9026003f4",
            expected_content_hash:
                "a8ef853d265c3a0fd3e3027b1ce7f41dbf419122c533f6566ca6ebddc967967d",
        },
    ]
}

/// Compute the content hash for a vector.
pub fn content_hash_for(vector: &GoldenVector) -> BlockHash {
    let previous = vector.previous();
    compute_hash(
        vector.position,
        vector.timestamp,
        &vector.payload(),
        previous.as_ref(),
    )
    .expect("golden payloads always encode")
}

/// Check every vector; returns (name, matches, computed content hash).
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let payload_hex = canonical_record_bytes(&v.payload())
                .map(hex::encode)
                .unwrap_or_default();
            let hash = content_hash_for(v).to_hex();

            let matches =
                payload_hex == v.expected_payload_cbor && hash == v.expected_content_hash;

            (v.name.to_string(), matches, hash)
        })
        .collect()
}
