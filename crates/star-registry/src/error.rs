//! Error types for the Ledger.

use star_registry_core::{ChainDefect, ChallengeError, CoreError};
use thiserror::Error;

/// Rejections of a star submission or challenge request.
///
/// None of these touch the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Message is not `<address>:<digits>:starRegistry`.
    #[error("malformed ownership message: {0}")]
    Parse(String),

    /// Address embedded in the message differs from the submitting address.
    #[error("message address {message_address} does not match {address}")]
    AddressMismatch {
        address: String,
        message_address: String,
    },

    /// Timestamp digits do not fit an integer.
    #[error("invalid message timestamp: {0}")]
    TimestampParse(String),

    /// The verifier rejected the signature.
    #[error("signature verification failed for {0}")]
    SignatureInvalid(String),

    /// Message issued too long ago; a new challenge is required.
    #[error("ownership message expired: issued {elapsed_ms} ms ago, window is {window_ms} ms")]
    ExpiredMessage { elapsed_ms: i64, window_ms: i64 },

    /// Address cannot be embedded in a challenge message.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl SubmissionError {
    /// Whether the client can fix the request and resubmit.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SubmissionError::SignatureInvalid(_))
    }
}

impl From<ChallengeError> for SubmissionError {
    fn from(e: ChallengeError) -> Self {
        match e {
            ChallengeError::Malformed => SubmissionError::Parse(e.to_string()),
            ChallengeError::InvalidTimestamp(digits) => SubmissionError::TimestampParse(digits),
            ChallengeError::InvalidAddress(address) => SubmissionError::InvalidAddress(address),
        }
    }
}

/// Full-chain validation failed right after an append.
///
/// The appended block stays in place; there is no rollback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chain integrity violated after append: {}", render_defects(.defects))]
pub struct IntegrityError {
    pub defects: Vec<ChainDefect>,
}

fn render_defects(defects: &[ChainDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Submission rejected before reaching the chain.
    #[error("submission rejected: {0}")]
    Submission(#[from] SubmissionError),

    /// The chain is corrupt.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Payload encoding or block error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl LedgerError {
    /// Whether the caller can recover by fixing and resubmitting.
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Submission(e) => e.is_retryable(),
            LedgerError::Integrity(_) | LedgerError::Core(_) => false,
        }
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, LedgerError::Integrity(_))
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
