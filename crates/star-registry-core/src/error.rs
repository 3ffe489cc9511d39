//! Error types for the Star Registry Core.

use thiserror::Error;

/// Core errors that can occur while handling blocks and keys.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("block has not been sealed")]
    UnsealedBlock,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Errors produced while building or parsing an ownership challenge message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("message does not match <address>:<timestamp>:starRegistry")]
    Malformed,

    #[error("challenge timestamp is not a valid integer: {0}")]
    InvalidTimestamp(String),

    #[error("address must not contain ':': {0}")]
    InvalidAddress(String),
}
