//! Signature verification capability.
//!
//! The ledger only needs a yes/no answer to "did `address` sign `message`".
//! [`SignatureVerifier`] is that seam; [`Ed25519Verifier`] is the default.

use crate::crypto::{Ed25519PublicKey, Ed25519Signature};

/// Answers whether `signature` over `message` was produced by `address`.
///
/// Implementations must be synchronous and free of side effects.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 verifier: address is a hex public key, signature is hex bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let Ok(public_key) = Ed25519PublicKey::from_hex(address) else {
            return false;
        };
        let Ok(signature) = Ed25519Signature::from_hex(signature) else {
            return false;
        };
        public_key.verify(message.as_bytes(), &signature).is_ok()
    }
}
