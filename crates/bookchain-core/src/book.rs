//! Book records and their derived identifiers.
//!
//! Book ids are unrelated to chain integrity; they are a short digest of a
//! book's ISBN and publication date.

use serde::{Deserialize, Serialize};

/// Number of digest bytes kept in a book id.
pub const BOOK_ID_LEN: usize = 16;

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Derived identifier; any client-supplied value is overwritten.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub isbn: String,
}

impl Book {
    /// Return this book with `id` derived from its ISBN and publication date.
    pub fn with_derived_id(mut self) -> Self {
        self.id = derive_book_id(&self.isbn, &self.published_date);
        self
    }
}

/// Derive a 32-character hex id from `isbn || published_date`.
pub fn derive_book_id(isbn: &str, published_date: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(isbn.as_bytes());
    hasher.update(published_date.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest.as_bytes()[..BOOK_ID_LEN])
}
