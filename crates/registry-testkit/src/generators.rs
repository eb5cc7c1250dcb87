//! Proptest generators for property-based testing.

use proptest::prelude::*;
use registry_core::{Keypair, Params, Record};
use serde_json::{Map, Value};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// A caller field name; never one of the reserved names.
pub fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,11}"
        .prop_filter("reserved field", |name| {
            !matches!(name.as_str(), "issuer" | "hash" | "signature")
        })
}

/// A JSON scalar without floats.
pub fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

/// A JSON value nested up to three levels.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(field_name(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// A record of caller fields only.
pub fn record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map(field_name(), json_value(), 0..8)
        .prop_map(|fields| Record::from_fields(fields.into_iter().collect()))
}

/// Request parameters with string values.
pub fn params() -> impl Strategy<Value = Params> {
    prop::collection::btree_map(field_name(), "[a-zA-Z0-9]{1,8}", 0..6).prop_map(|m| {
        m.into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Params>()
    })
}

/// Inputs for a signing property.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub keypair: Keypair,
    pub record: Record,
    pub stale_hash: Option<String>,
    pub stale_signature: Option<String>,
}

impl RecordParams {
    /// The record with any stale credentials attached.
    pub fn input(&self) -> Record {
        let mut record = self.record.clone();
        if let Some(hash) = &self.stale_hash {
            record.insert("hash", hash.clone());
        }
        if let Some(signature) = &self.stale_signature {
            record.insert("signature", signature.clone());
        }
        record
    }
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            record(),
            proptest::option::of("[A-Za-z0-9]{1,44}"),
            proptest::option::of("[A-Za-z0-9+/=]{1,88}"),
        )
            .prop_map(|(seed, record, stale_hash, stale_signature)| RecordParams {
                keypair: Keypair::from_seed(&seed),
                record,
                stale_hash,
                stale_signature,
            })
            .boxed()
    }
}
