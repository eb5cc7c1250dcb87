//! Registry records.
//!
//! A record is an open mapping of caller-defined fields plus three reserved
//! fields managed only by the signing pipeline: `issuer`, `hash` and
//! `signature`. Signing goes through two explicit states:
//!
//! 1. [`Record::unsigned_for`] strips any `hash`/`signature` and sets `issuer`,
//!    producing an [`UnsignedRecord`] whose canonical JSON is the signing input.
//! 2. [`UnsignedRecord::seal`] attaches a digest and signature computed over
//!    that input, producing a new [`Record`].
//!
//! The `hash` and `signature` fields therefore never cover themselves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::canonical_object;
use crate::crypto::{PublicKey, Sha256Digest};
use crate::error::CoreError;

/// Reserved field names.
pub mod fields {
    pub const ISSUER: &str = "issuer";
    pub const HASH: &str = "hash";
    pub const SIGNATURE: &str = "signature";
}

/// A registry record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::MalformedRecord(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Set a field, returning the record for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields, reserved ones included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn issuer(&self) -> Option<&str> {
        self.0.get(fields::ISSUER).and_then(Value::as_str)
    }

    pub fn hash(&self) -> Option<&str> {
        self.0.get(fields::HASH).and_then(Value::as_str)
    }

    pub fn signature(&self) -> Option<&str> {
        self.0.get(fields::SIGNATURE).and_then(Value::as_str)
    }

    /// Copy the record without `hash`/`signature`, issued by `issuer`.
    ///
    /// Stale credentials from an earlier signing are discarded, not rejected.
    pub fn unsigned_for(&self, issuer: &PublicKey) -> UnsignedRecord {
        let mut map = self.0.clone();
        map.remove(fields::SIGNATURE);
        map.remove(fields::HASH);
        map.insert(fields::ISSUER.to_string(), Value::String(issuer.to_base58()));
        UnsignedRecord(map)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A record prepared for signing: `issuer` set, `hash` and `signature` absent.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedRecord(Map<String, Value>);

impl UnsignedRecord {
    /// The canonical JSON string that is both hashed and signed.
    pub fn canonical_json(&self) -> String {
        canonical_object(&self.0)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Attach the digest (base58) and the encoded signature.
    pub fn seal(self, hash: &Sha256Digest, signature: impl Into<String>) -> Record {
        let mut map = self.0;
        map.insert(fields::HASH.to_string(), Value::String(hash.to_base58()));
        map.insert(fields::SIGNATURE.to_string(), Value::String(signature.into()));
        Record(map)
    }
}
