//! Strong type definitions for Bookchain.
//!
//! Hashes are newtypes so a content hash can never be confused with an
//! arbitrary string. On the wire they are lowercase hex strings.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 32-byte BLAKE3 digest binding a block's fields together.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Hash arbitrary bytes.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BlockHash::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Serde adapter for a predecessor link.
///
/// `None` (the genesis sentinel) is written as the empty string, and the
/// empty string reads back as `None`.
pub mod previous_hash {
    use super::BlockHash;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<BlockHash>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(hash) => serializer.serialize_str(&hash.to_hex()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BlockHash>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        BlockHash::from_hex(&s).map(Some).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hash_hex_roundtrip() {
        let hash = BlockHash::from_bytes([0x42; 32]);
        let recovered = BlockHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, recovered);
    }

    #[test]
    fn test_block_hash_rejects_short_hex() {
        assert!(BlockHash::from_hex("abcd").is_err());
        assert!(BlockHash::from_hex("").is_err());
    }

    #[test]
    fn test_block_hash_display_is_full_hex() {
        let hash = BlockHash::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", hash), "ab".repeat(32));
    }

    #[test]
    fn test_block_hash_debug_is_truncated() {
        let hash = BlockHash::from_bytes([0xcd; 32]);
        assert_eq!(format!("{:?}", hash), "BlockHash(cdcdcdcdcdcdcdcd)");
    }

    #[test]
    fn test_block_hash_json_is_hex_string() {
        let hash = BlockHash::from_bytes([0x01; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Link {
        #[serde(with = "previous_hash")]
        prev: Option<BlockHash>,
    }

    #[test]
    fn test_previous_hash_sentinel_is_empty_string() {
        let json = serde_json::to_string(&Link { prev: None }).unwrap();
        assert_eq!(json, r#"{"prev":""}"#);
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prev, None);
    }

    #[test]
    fn test_previous_hash_rejects_garbage() {
        let result: Result<Link, _> = serde_json::from_str(r#"{"prev":"not-hex"}"#);
        assert!(result.is_err());
    }
}
