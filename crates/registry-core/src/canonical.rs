//! Canonical JSON encoding for deterministic signing.
//!
//! Rules:
//! - No insignificant whitespace
//! - Object keys sorted by byte order, recursively
//! - Array order preserved
//! - Scalars encoded exactly as `serde_json` writes them
//!
//! The canonical string of a record is the single input to both its content
//! hash and its signature. Key order does not depend on how serde_json was
//! compiled (`preserve_order` or not).

use serde_json::{Map, Value};

/// Encode a JSON value to its canonical string.
pub fn canonical_json(value: &Value) -> String {
    let mut buf = String::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Encode a JSON object to its canonical string.
pub fn canonical_object(map: &Map<String, Value>) -> String {
    let mut buf = String::new();
    encode_object(&mut buf, map);
    buf
}

fn encode_value_to(buf: &mut String, value: &Value) {
    match value {
        Value::Object(map) => encode_object(buf, map),
        Value::Array(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                encode_value_to(buf, item);
            }
            buf.push(']');
        }
        scalar => buf.push_str(&scalar.to_string()),
    }
}

fn encode_object(buf: &mut String, map: &Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    buf.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        encode_key(buf, key);
        buf.push(':');
        encode_value_to(buf, value);
    }
    buf.push('}');
}

fn encode_key(buf: &mut String, key: &str) {
    buf.push_str(&Value::String(key.to_owned()).to_string());
}
