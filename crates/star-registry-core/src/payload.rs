//! Block payloads: the structured values carried in a block's `data` bytes.
//!
//! Payloads are encoded as JSON with fields in declaration order, so the same
//! value always produces the same bytes and decoding yields exactly the value
//! that was encoded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The fixed data string carried by the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Payload of the genesis block: `{"data":"Genesis Block"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPayload {
    pub data: String,
}

impl GenesisPayload {
    pub fn new() -> Self {
        Self {
            data: GENESIS_DATA.to_string(),
        }
    }
}

impl Default for GenesisPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptive information about a registered star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarInfo {
    /// Declination.
    pub dec: String,
    /// Right ascension.
    pub ra: String,
    /// Free-form story attached by the owner.
    pub story: String,
    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,
    /// Constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,
}

impl StarInfo {
    pub fn new(dec: impl Into<String>, ra: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            story: story.into(),
            mag: None,
            cen: None,
        }
    }

    pub fn with_magnitude(mut self, mag: impl Into<String>) -> Self {
        self.mag = Some(mag.into());
        self
    }

    pub fn with_constellation(mut self, cen: impl Into<String>) -> Self {
        self.cen = Some(cen.into());
        self
    }
}

/// Payload of every non-genesis block: an ownership claim over a star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClaim {
    pub owner: String,
    pub star: StarInfo,
}

/// Encode a payload value to its block `data` bytes.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(value).map_err(|e| CoreError::EncodingError(e.to_string()))
}

/// Decode block `data` bytes back into a payload value.
pub fn decode_payload<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}
