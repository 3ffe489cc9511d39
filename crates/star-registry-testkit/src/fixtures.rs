//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;
use std::time::Duration;

use star_registry::{Ledger, LedgerConfig, ManualClock};
use star_registry_core::{Block, Ed25519Verifier, Keypair, StarInfo};

/// Fixed start time for fixture ledgers: 2025-01-14T16:00:00Z.
pub const FIXTURE_START_MILLIS: i64 = 1_736_870_400_000;

/// A wallet that can answer ownership challenges.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub keypair: Keypair,
}

impl Wallet {
    /// Create a wallet with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Sign a challenge message, returning the hex signature.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign_message(message)
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

/// A ledger on a manual clock plus a wallet to drive it.
pub struct TestFixture {
    pub ledger: Ledger,
    pub clock: Arc<ManualClock>,
    pub wallet: Wallet,
}

impl TestFixture {
    /// Ed25519-verified ledger starting at [`FIXTURE_START_MILLIS`].
    pub fn new() -> Self {
        Self::with_wallet(Wallet::with_seed([0x42; 32]))
    }

    pub fn with_wallet(wallet: Wallet) -> Self {
        let clock = Arc::new(ManualClock::new(FIXTURE_START_MILLIS));
        let config = LedgerConfig::default().with_clock(clock.clone());
        let ledger = Ledger::new(Ed25519Verifier, config).expect("genesis seeding cannot fail");
        Self {
            ledger,
            clock,
            wallet,
        }
    }

    pub fn address(&self) -> String {
        self.wallet.address()
    }

    /// Request a challenge for the fixture wallet and sign it.
    ///
    /// Returns `(message, signature)`.
    pub fn signed_challenge(&self) -> (String, String) {
        signed_challenge(&self.ledger, &self.wallet)
    }

    /// Run the full protocol for the fixture wallet.
    pub async fn claim_star(&self, star: StarInfo) -> Block {
        let (message, signature) = self.signed_challenge();
        self.ledger
            .submit_star(&self.address(), &message, &signature, star)
            .await
            .expect("fixture submission should succeed")
    }

    /// Append `count` raw blocks, advancing the clock one millisecond each.
    pub async fn grow(&self, count: usize) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(count);
        for i in 0..count {
            self.clock.advance(Duration::from_millis(1));
            let block = self
                .ledger
                .append(Block::new(format!("block {}", i).into_bytes()))
                .await
                .expect("append on a clean chain should succeed");
            blocks.push(block);
        }
        blocks
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Request a challenge for `wallet` from `ledger` and sign it.
pub fn signed_challenge(ledger: &Ledger, wallet: &Wallet) -> (String, String) {
    let challenge = ledger
        .request_message_ownership_verification(&wallet.address())
        .expect("wallet addresses are hex");
    let signature = wallet.sign(&challenge.message);
    (challenge.message, signature)
}

/// A sample star.
pub fn sample_star(story: &str) -> StarInfo {
    StarInfo::new("68° 52' 56.9", "16h 29m 1.0s", story)
}

/// Create multiple wallets for multi-party tests.
pub fn multi_party_wallets(count: usize) -> Vec<Wallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            Wallet::with_seed(seed)
        })
        .collect()
}
