//! Error types for the DVEL core.

use thiserror::Error;

/// Core errors that can occur while handling raw event material.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("malformed hex: {0}")]
    MalformedHex(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

/// Validation verdicts for an event checked against a per-author context.
///
/// Every variant leaves the context untouched; only an `Ok` result advances
/// the author's timestamp watermark.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported event version: {0}")]
    InvalidVersion(u8),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("timestamp {timestamp} rewinds past watermark {last_timestamp}")]
    TimestampNonMonotonic { last_timestamp: u64, timestamp: u64 },
}
