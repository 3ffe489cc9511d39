//! # Star Registry Testkit
//!
//! Testing utilities for the Star Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned canonical encodings of block fields
//! - **Generators**: Proptest strategies for blocks, chains and stars
//! - **Fixtures**: Wallets and a manually clocked ledger
//!
//! ## Golden Vectors
//!
//! ```rust
//! use star_registry_testkit::vectors::{all_vectors, block_from_vector};
//!
//! for vector in all_vectors() {
//!     let block = block_from_vector(&vector);
//!     println!("{}: {}", vector.name, block.compute_hash().to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use star_registry_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn block_hash_is_deterministic(params: BlockParams) {
//!         let b1 = block_from_params(&params);
//!         let b2 = block_from_params(&params);
//!         prop_assert_eq!(b1.hash(), b2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use star_registry_testkit::fixtures::{sample_star, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let block = fixture.claim_star(sample_star("first light")).await;
//! assert_eq!(block.height(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_wallets, sample_star, signed_challenge, TestFixture, Wallet};
pub use generators::{block_from_params, linked_chain, BlockParams};
pub use vectors::{all_vectors, block_from_vector, verify_all_vectors, GoldenVector};
