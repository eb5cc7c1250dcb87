//! # Registry Core
//!
//! Pure primitives for the registry client: keys and signatures, URI
//! templates, canonical record encoding and search-result shapes.
//!
//! This crate contains no I/O and no networking.
//!
//! ## Key Types
//!
//! - [`Keypair`] / [`PublicKey`] / [`Signature`] - Ed25519 identity
//! - [`Sha256Digest`] - content digest of a record
//! - [`Record`] / [`UnsignedRecord`] - the two states of the signing pipeline
//! - [`ResolvedUri`] - a URI template with placeholders substituted
//! - [`SearchHit`] / [`SearchResponse`] / [`Category`] - search results
//!
//! ## Canonicalization
//!
//! Records are signed over compact JSON with sorted keys. See [`canonical`].

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod hit;
pub mod record;
pub mod template;

pub use canonical::{canonical_json, canonical_object};
pub use crypto::{decode_base58, encode_base58, Keypair, PublicKey, Sha256Digest, Signature};
pub use error::CoreError;
pub use hit::{Category, HitsTotal, SearchHit, SearchHits, SearchResponse};
pub use record::{Record, UnsignedRecord};
pub use template::{param_to_string, params_from, resolve, Params, ResolvedUri};
