//! # Star Registry
//!
//! An append-only, hash-linked ledger of star ownership claims. A claim is
//! only recorded when the claimant proves control of a wallet address by
//! signing a short-lived challenge message.
//!
//! ## Overview
//!
//! - **Blocks**: payload bytes sealed with height, time and the previous
//!   block's digest
//! - **Validation**: every append re-checks the whole chain; tampering shows
//!   up as positional defects
//! - **Ownership protocol**: request a challenge, sign it, submit it with the
//!   star within five minutes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_registry::{Ledger, LedgerConfig};
//! use star_registry::core::{Ed25519Verifier, Keypair, StarInfo};
//!
//! async fn example() {
//!     let ledger = Ledger::new(Ed25519Verifier, LedgerConfig::default()).unwrap();
//!
//!     let wallet = Keypair::generate();
//!     let address = wallet.address();
//!
//!     let challenge = ledger
//!         .request_message_ownership_verification(&address)
//!         .unwrap();
//!     let signature = wallet.sign_message(&challenge.message);
//!
//!     let star = StarInfo::new("68° 52' 56.9", "16h 29m 1.0s", "First light");
//!     let block = ledger
//!         .submit_star(&address, &challenge.message, &signature, star)
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(block.height(), 1);
//!     assert!(ledger.validate_chain().await.is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `star_registry::core` - Core primitives (Block, BlockHash, StarInfo, etc.)

pub mod config;
pub mod error;
pub mod ledger;

pub use star_registry_core as core;

pub use config::{Clock, LedgerConfig, ManualClock, SystemClock, DEFAULT_FRESHNESS_WINDOW};
pub use error::{IntegrityError, LedgerError, Result, SubmissionError};
pub use ledger::{Ledger, OwnershipChallenge};

pub use star_registry_core::{
    Block, BlockHash, ChainDefect, Ed25519Verifier, Keypair, SignatureVerifier, StarClaim,
    StarInfo,
};
