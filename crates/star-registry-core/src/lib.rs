//! # Star Registry Core
//!
//! Pure primitives for the Star Registry: blocks, digests, canonicalization,
//! chain validation and the ownership challenge format.
//!
//! This crate contains no I/O, no locking, no clock. It is pure computation
//! over hash-linked data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - Payload bytes plus chain-linkage metadata
//! - [`BlockHash`] - Blake3 digest over a block's canonical bytes
//! - [`ChainDefect`] - A position reported by [`validate_chain`]
//! - [`ChallengeMessage`] - `<address>:<seconds>:starRegistry`
//! - [`SignatureVerifier`] - The signature-checking capability
//!
//! ## Canonicalization
//!
//! Block digests are computed over deterministic CBOR. See [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod challenge;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod types;
pub mod validation;
pub mod verify;

pub use block::Block;
pub use canonical::canonical_block_bytes;
pub use challenge::{parse_timestamp, split_message, ChallengeMessage, REGISTRY_TAG};
pub use crypto::{Blake3Hash, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{ChallengeError, CoreError};
pub use payload::{GenesisPayload, StarClaim, StarInfo, GENESIS_DATA};
pub use types::BlockHash;
pub use validation::{defect_messages, validate_chain, ChainDefect};
pub use verify::{Ed25519Verifier, SignatureVerifier};
