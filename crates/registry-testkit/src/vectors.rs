//! Golden vectors for record signing.
//!
//! Each vector fixes a seed and an input record and pins every derived wire
//! value: the issuer, the canonical JSON, its base58 SHA-256 hash, and the
//! base64 Ed25519 signature over it. A record that already carries stale
//! credentials must produce the same outputs as a fresh one.

use registry_core::{Keypair, Record, Sha256Digest};
use serde_json::Value;

/// A golden signing vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Input record as JSON text, possibly carrying stale `hash`/`signature`.
    pub record: &'static str,
    pub expected_issuer: &'static str,
    pub expected_canonical: &'static str,
    /// base58 of SHA-256 over the canonical JSON.
    pub expected_hash: &'static str,
    /// base64 Ed25519 signature over the canonical JSON.
    pub expected_signature: &'static str,
}

/// Values derived from a vector's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub issuer: String,
    pub canonical: String,
    pub hash: String,
    pub signature: String,
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "single field",
            seed: [0x01; 32],
            record: r#"{"title":"Bike"}"#,
            expected_issuer: "AKnL4NNf3DGWZJS6cPknBuEGnVsV4A4m5tgebLHaRSZ9",
            expected_canonical: r#"{"issuer":"AKnL4NNf3DGWZJS6cPknBuEGnVsV4A4m5tgebLHaRSZ9","title":"Bike"}"#,
            expected_hash: "CnsScE9ckGAxCrmcywHJFqdCYv1v6VDLhAdBk5VwnusT",
            expected_signature: "Y59072HSIAxItCVdYmP9LpPTTOmU0t0kLcTqLtYTadBoTk/0ShlacWX3f8gNcedzN0jGPt9yJdg1yTZqnCbEDw==",
        },
        GoldenVector {
            name: "nested object and array",
            seed: [0x02; 32],
            record: r#"{"title":"Flat","location":{"city":"Paris","zip":"75001"},"tags":["b","a"],"price":450}"#,
            expected_issuer: "9hSR6S7WPtxmTojgo6GG3k4yDPecgJY292j7xrsUGWBu",
            expected_canonical: r#"{"issuer":"9hSR6S7WPtxmTojgo6GG3k4yDPecgJY292j7xrsUGWBu","location":{"city":"Paris","zip":"75001"},"price":450,"tags":["b","a"],"title":"Flat"}"#,
            expected_hash: "CKkN8XqXH82XTsn4tesdZFhdsJ8StJZiRuAjqrstbm9d",
            expected_signature: "VScpgel/0hAe5JW/4e8OJGkXLzEepvSRB3UHeLJe/6PkSofsxS3xWdpTk7NxCTwcvNIK7Z952qEr53C+lGd6CA==",
        },
        GoldenVector {
            name: "stale credentials and foreign issuer",
            seed: [0x03; 32],
            record: r#"{"title":"Guitar","category":"c2","hash":"STALE","signature":"STALE","issuer":"someone"}"#,
            expected_issuer: "GyGKxMyg1p9SsHfm15MkNUu1u9TN2JtTspcdmrtGUdse",
            expected_canonical: r#"{"category":"c2","issuer":"GyGKxMyg1p9SsHfm15MkNUu1u9TN2JtTspcdmrtGUdse","title":"Guitar"}"#,
            expected_hash: "eMsxqNYeSx6naLd2wSYtbVkmMZC7xzzVM5it8JDcmfR",
            expected_signature: "oheT0OrJYF0ue83By98cFLjfJJn0EUJ63MeNcrc/jiyQqjQTkRxBZ4kZK7wZ8fVV6OSEvJeDPKKwKkloWKbODg==",
        },
    ]
}

/// Derive the wire values for a vector with the in-process primitives.
///
/// Panics naming the vector when its record is not a JSON object.
pub fn derive(vector: &GoldenVector) -> Derived {
    let keypair = Keypair::from_seed(&vector.seed);
    let value: Value = serde_json::from_str(vector.record)
        .unwrap_or_else(|e| panic!("vector '{}' record is not JSON: {e}", vector.name));
    let record = Record::from_value(value)
        .unwrap_or_else(|e| panic!("vector '{}' record is not an object: {e}", vector.name));

    let unsigned = record.unsigned_for(&keypair.public_key());
    let canonical = unsigned.canonical_json();
    Derived {
        issuer: keypair.public_key().to_base58(),
        hash: Sha256Digest::hash(canonical.as_bytes()).to_base58(),
        signature: keypair.sign(canonical.as_bytes()).to_base64(),
        canonical,
    }
}

/// Check every vector, reporting `(name, matches, derived)`.
pub fn verify_all_vectors() -> Vec<(String, bool, Derived)> {
    all_vectors()
        .iter()
        .map(|v| {
            let derived = derive(v);
            let matches = derived.issuer == v.expected_issuer
                && derived.canonical == v.expected_canonical
                && derived.hash == v.expected_hash
                && derived.signature == v.expected_signature;
            (v.name.to_string(), matches, derived)
        })
        .collect()
}
