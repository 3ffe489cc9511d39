//! Block: an opaque payload plus its chain-linkage metadata.
//!
//! A block is built unsealed from a payload. The ledger seals it exactly once,
//! assigning height, time, previous block hash and the digest over all of
//! them. After sealing the value is never re-hashed implicitly: only
//! [`Block::validate`] recomputes the digest, which is how tampering shows up.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_block_bytes;
use crate::crypto::Blake3Hash;
use crate::error::CoreError;
use crate::payload::{decode_payload, encode_payload, GenesisPayload, StarClaim};
use crate::types::BlockHash;

/// A block in the star registry chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    data: Bytes,
    height: u64,
    time: i64,
    previous_block_hash: Option<BlockHash>,
    hash: Option<BlockHash>,
}

impl Block {
    /// Create an unsealed block carrying the given payload bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            height: 0,
            time: 0,
            previous_block_hash: None,
            hash: None,
        }
    }

    /// Create an unsealed block from a structured payload.
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self, CoreError> {
        Ok(Self::new(encode_payload(payload)?))
    }

    /// Create the unsealed genesis block.
    pub fn genesis() -> Result<Self, CoreError> {
        Self::from_payload(&GenesisPayload::new())
    }

    /// Seal the block at a chain position.
    ///
    /// Assigns height, time and previous block hash, then computes the digest
    /// over them. Only the ledger calls this, once per block.
    pub fn seal(mut self, height: u64, time: i64, previous_block_hash: Option<BlockHash>) -> Self {
        self.height = height;
        self.time = time;
        self.previous_block_hash = previous_block_hash;
        self.hash = Some(self.compute_hash());
        self
    }

    /// Compute the digest of the current field values.
    pub fn compute_hash(&self) -> BlockHash {
        let bytes = canonical_block_bytes(
            &self.data,
            self.height,
            self.time,
            self.previous_block_hash.as_ref(),
        );
        BlockHash(Blake3Hash::hash(&bytes).0)
    }

    /// Check that the stored digest matches the current field values.
    ///
    /// An unsealed block has nothing to compare against and reports `false`.
    pub fn validate(&self) -> bool {
        match &self.hash {
            Some(stored) => *stored == self.compute_hash(),
            None => {
                tracing::debug!(height = self.height, "validate called on unsealed block");
                false
            }
        }
    }

    /// Decode the payload bytes into a structured value.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        decode_payload(&self.data)
    }

    /// Decode the payload as the genesis record.
    pub fn genesis_payload(&self) -> Result<GenesisPayload, CoreError> {
        self.payload()
    }

    /// Decode the payload as a star ownership claim.
    pub fn star_claim(&self) -> Result<StarClaim, CoreError> {
        self.payload()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Hex encoding of the payload bytes.
    pub fn data_hex(&self) -> String {
        hex::encode(&self.data)
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn previous_block_hash(&self) -> Option<&BlockHash> {
        self.previous_block_hash.as_ref()
    }

    /// The digest assigned at seal time, if sealed.
    pub fn hash(&self) -> Option<&BlockHash> {
        self.hash.as_ref()
    }

    /// The sealed digest, or an error for an unsealed block.
    pub fn sealed_hash(&self) -> Result<&BlockHash, CoreError> {
        self.hash.as_ref().ok_or(CoreError::UnsealedBlock)
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_block_hash.is_none()
    }

    // Copy-with-override. None of these re-hash, so the result of overriding
    // a sealed field fails `validate()`. Used to simulate corruption.

    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_height(mut self, height: u64) -> Self {
        self.height = height;
        self
    }

    pub fn with_time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn with_previous_block_hash(mut self, previous: Option<BlockHash>) -> Self {
        self.previous_block_hash = previous;
        self
    }

    pub fn with_hash(mut self, hash: BlockHash) -> Self {
        self.hash = Some(hash);
        self
    }
}
