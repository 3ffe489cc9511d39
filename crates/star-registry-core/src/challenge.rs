//! Ownership challenge messages.
//!
//! A challenge is the text `<address>:<unix seconds>:starRegistry`. Wallets
//! sign it verbatim, so the format is a stable contract. The embedded
//! timestamp is the only state the protocol keeps.

use std::fmt;

use crate::error::ChallengeError;

/// The literal tag closing every challenge message.
pub const REGISTRY_TAG: &str = "starRegistry";

/// Field delimiter inside a challenge message.
pub const DELIMITER: char = ':';

/// A parsed (or freshly issued) ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeMessage {
    pub address: String,
    /// Issuance time in Unix seconds.
    pub timestamp: i64,
}

impl ChallengeMessage {
    /// Build a challenge for an address issued at `timestamp` seconds.
    pub fn new(address: impl Into<String>, timestamp: i64) -> Result<Self, ChallengeError> {
        let address = address.into();
        if address.is_empty() || address.contains(DELIMITER) {
            return Err(ChallengeError::InvalidAddress(address));
        }
        Ok(Self { address, timestamp })
    }

    /// Parse a message of the form `<token>:<digits>:starRegistry`.
    pub fn parse(message: &str) -> Result<Self, ChallengeError> {
        let (address, digits) = split_message(message)?;
        Ok(Self {
            address: address.to_string(),
            timestamp: parse_timestamp(digits)?,
        })
    }

    /// Issuance time in Unix milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.saturating_mul(1000)
    }
}

/// Split a message into its address token and timestamp digits.
///
/// Checks the shape only: three fields, a non-empty token, an all-digit
/// middle field and the literal registry tag.
pub fn split_message(message: &str) -> Result<(&str, &str), ChallengeError> {
    let mut parts = message.split(DELIMITER);
    let (Some(address), Some(digits), Some(tag), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ChallengeError::Malformed);
    };

    if address.is_empty()
        || tag != REGISTRY_TAG
        || digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ChallengeError::Malformed);
    }

    Ok((address, digits))
}

/// Parse the timestamp digits of a message.
pub fn parse_timestamp(digits: &str) -> Result<i64, ChallengeError> {
    digits
        .parse::<i64>()
        .map_err(|_| ChallengeError::InvalidTimestamp(digits.to_string()))
}

impl fmt::Display for ChallengeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.address, DELIMITER, self.timestamp, DELIMITER, REGISTRY_TAG
        )
    }
}
