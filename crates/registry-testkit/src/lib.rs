//! # Registry Testkit
//!
//! Testing utilities for the registry client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed seeds and records with the exact issuer, canonical JSON, hash and signature they must produce
//! - **Generators**: Proptest strategies for records, parameters and keypairs
//! - **Fixtures**: a registry over a scripted transport, failing crypto providers, canned search bodies
//!
//! ## Golden Vectors
//!
//! ```rust
//! use registry_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, derived) in verify_all_vectors() {
//!     println!("{name}: {matches} {}", derived.hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use registry_testkit::generators::RecordParams;
//!
//! proptest! {
//!     #[test]
//!     fn resigning_is_stable(params: RecordParams) {
//!         let issuer = params.keypair.public_key();
//!         prop_assert_eq!(
//!             params.record.unsigned_for(&issuer).canonical_json(),
//!             params.input().unsigned_for(&issuer).canonical_json(),
//!         );
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use registry_testkit::fixtures::{books_and_music, TestFixture};
//!
//! let fixture = TestFixture::with_seed([1; 32]);
//! fixture.transport.push_ok(books_and_music());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    books_and_music, init_tracing, multi_party_keypairs, search_response, FailingCrypto,
    TestFixture,
};
pub use generators::RecordParams;
pub use vectors::{all_vectors, derive, verify_all_vectors, Derived, GoldenVector};
