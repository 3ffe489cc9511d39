//! The Ledger: the in-memory star registry chain.
//!
//! The Ledger owns the block sequence, serializes appends, re-validates the
//! whole chain after every mutation and gates star claims behind a signed,
//! time-boxed ownership message.

use std::sync::Arc;

use tokio::sync::RwLock;

use star_registry_core::{
    parse_timestamp, split_message, validate_chain, Block, BlockHash, ChainDefect,
    ChallengeMessage, SignatureVerifier, StarClaim, StarInfo,
};

use crate::config::LedgerConfig;
use crate::error::{IntegrityError, LedgerError, Result, SubmissionError};

/// A challenge issued to a wallet, to be signed and submitted with a star.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipChallenge {
    pub message: String,
}

/// The star registry ledger.
///
/// Provides:
/// - Chain queries by height, hash and owner
/// - Full-chain validation
/// - Ownership challenge issuance
/// - Signature-gated star submission
pub struct Ledger {
    /// The chain, in height order.
    chain: RwLock<Vec<Block>>,
    /// Signature verification capability.
    verifier: Arc<dyn SignatureVerifier>,
    /// Configuration.
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger seeded with its genesis block.
    pub fn new(verifier: impl SignatureVerifier + 'static, config: LedgerConfig) -> Result<Self> {
        Self::with_verifier(Arc::new(verifier), config)
    }

    /// Create a ledger sharing an existing verifier.
    pub fn with_verifier(verifier: Arc<dyn SignatureVerifier>, config: LedgerConfig) -> Result<Self> {
        let mut chain = Vec::new();
        let genesis = seal_and_push(&mut chain, Block::genesis()?, config.clock.now_millis())?;
        tracing::info!(hash = %hash_hex(&genesis), "ledger seeded with genesis block");

        Ok(Self {
            chain: RwLock::new(chain),
            verifier,
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chain Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of blocks in the chain.
    pub async fn height(&self) -> u64 {
        self.chain.read().await.len() as u64
    }

    /// Seal a block at the tip of the chain and re-validate the whole chain.
    ///
    /// Height, time and previous hash are assigned under the write lock, so
    /// concurrent appends each get their own position. If validation finds
    /// any defect the block stays appended and an integrity error is returned.
    pub async fn append(&self, block: Block) -> Result<Block> {
        let mut chain = self.chain.write().await;
        let sealed = seal_and_push(&mut chain, block, self.config.clock.now_millis())?;

        tracing::info!(
            height = sealed.height(),
            hash = %hash_hex(&sealed),
            "block appended"
        );
        Ok(sealed)
    }

    /// Get a block by its height.
    pub async fn get_block_by_height(&self, height: u64) -> Option<Block> {
        let chain = self.chain.read().await;
        usize::try_from(height)
            .ok()
            .and_then(|index| chain.get(index))
            .cloned()
    }

    /// Get the first block whose digest equals `hash`.
    pub async fn get_block_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        let chain = self.chain.read().await;
        chain.iter().find(|b| b.hash() == Some(hash)).cloned()
    }

    /// The block at the tip of the chain.
    pub async fn latest_block(&self) -> Option<Block> {
        self.chain.read().await.last().cloned()
    }

    /// Snapshot of the whole chain.
    pub async fn blocks(&self) -> Vec<Block> {
        self.chain.read().await.clone()
    }

    /// All star claims owned by `address`, in ascending height order.
    pub async fn get_stars_by_address(&self, address: &str) -> Vec<StarClaim> {
        let chain = self.chain.read().await;
        chain
            .iter()
            .skip(1)
            .filter_map(|block| match block.star_claim() {
                Ok(claim) => Some(claim),
                Err(e) => {
                    tracing::debug!(height = block.height(), error = %e, "skipping undecodable payload");
                    None
                }
            })
            .filter(|claim| claim.owner == address)
            .collect()
    }

    /// Validate the whole chain. Never fails; an empty list means consistent.
    pub async fn validate_chain(&self) -> Vec<ChainDefect> {
        let chain = self.chain.read().await;
        validate_chain(&chain)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Protocol
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge message for `address` to sign.
    ///
    /// Nothing is recorded: the timestamp inside the message is the state.
    pub fn request_message_ownership_verification(
        &self,
        address: &str,
    ) -> std::result::Result<OwnershipChallenge, SubmissionError> {
        let challenge = ChallengeMessage::new(address, self.config.clock.now_secs())?;
        tracing::debug!(address, timestamp = challenge.timestamp, "ownership challenge issued");
        Ok(OwnershipChallenge {
            message: challenge.to_string(),
        })
    }

    /// Record a star for `address` once its signed message checks out.
    ///
    /// Any rejection leaves the chain untouched. An integrity failure while
    /// appending is reported as [`LedgerError::Integrity`].
    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: StarInfo,
    ) -> Result<Block> {
        if let Err(e) = self.check_submission(address, message, signature) {
            tracing::warn!(address, error = %e, "star submission rejected");
            return Err(e.into());
        }

        let claim = StarClaim {
            owner: address.to_string(),
            star,
        };
        self.append(Block::from_payload(&claim)?).await
    }

    /// Steps 1-5 of a submission: shape, address, timestamp, signature, age.
    fn check_submission(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> std::result::Result<(), SubmissionError> {
        let (message_address, digits) = split_message(message)?;

        if message_address != address {
            return Err(SubmissionError::AddressMismatch {
                address: address.to_string(),
                message_address: message_address.to_string(),
            });
        }

        let issued_secs = parse_timestamp(digits)?;

        if !self.verifier.verify(message, address, signature) {
            return Err(SubmissionError::SignatureInvalid(address.to_string()));
        }

        let issued_ms = issued_secs.saturating_mul(1000);
        let elapsed_ms = self.config.clock.now_millis().saturating_sub(issued_ms);
        let window_ms = self.config.freshness_window_millis();
        if elapsed_ms >= window_ms {
            return Err(SubmissionError::ExpiredMessage {
                elapsed_ms,
                window_ms,
            });
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Integrity Testing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the block at `height` with `f(block)`, bypassing sealing.
    ///
    /// Simulates in-memory corruption. Returns false if no such block exists.
    #[cfg(any(test, feature = "testing"))]
    pub async fn tamper_block(&self, height: u64, f: impl FnOnce(Block) -> Block) -> bool {
        let mut chain = self.chain.write().await;
        let Some(slot) = usize::try_from(height).ok().and_then(|i| chain.get_mut(i)) else {
            return false;
        };
        *slot = f(slot.clone());
        true
    }
}

/// Seal `block` at the tip of `chain`, push it and re-validate everything.
fn seal_and_push(chain: &mut Vec<Block>, block: Block, now: i64) -> Result<Block> {
    let height = chain.len() as u64;
    let previous = chain.last().and_then(|b| b.hash().copied());
    let sealed = block.seal(height, now, previous);
    chain.push(sealed.clone());

    let defects = validate_chain(chain);
    if !defects.is_empty() {
        let err = IntegrityError { defects };
        tracing::error!(height, error = %err, "chain failed validation after append");
        return Err(LedgerError::Integrity(err));
    }

    Ok(sealed)
}

fn hash_hex(block: &Block) -> String {
    block.hash().map(BlockHash::to_hex).unwrap_or_default()
}
