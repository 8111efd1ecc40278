//! Error types for the engine facade.

use thiserror::Error;

use dvel_core::ValidationError;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An event failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A signing operation was requested but the engine has no keypair.
    #[error("no signing key configured")]
    NoSigningKey,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
