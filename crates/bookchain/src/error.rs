//! Error types for chain operations.

use bookchain_core::CoreError;
use thiserror::Error;

/// Errors that can occur during chain operations.
///
/// A block failing validation is not an error; it is reported as
/// [`AppendOutcome::Rejected`](crate::AppendOutcome::Rejected).
#[derive(Debug, Error)]
pub enum ChainError {
    /// A block could not be built or encoded.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The submitted payload is not acceptable as a checkout.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
