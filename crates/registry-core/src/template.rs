//! URI templating.
//!
//! A template is a URI containing `:name` placeholders. Resolving a template
//! against a parameter map substitutes every placeholder whose name is
//! supplied; every parameter without a matching placeholder is returned as a
//! query parameter instead. Nothing is escaped here; the transport encodes
//! the query string.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// Parameters for a templated request, keyed by name.
pub type Params = Map<String, Value>;

/// A template with its placeholders substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUri {
    /// The URI with matched placeholders replaced.
    pub uri: String,
    /// Parameters that matched no placeholder.
    pub query: Params,
}

impl ResolvedUri {
    /// The residual query parameters as stringified pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(k, v)| (k.clone(), param_to_string(v)))
            .collect()
    }
}

/// Build a parameter map from a JSON value.
///
/// Anything other than a JSON object yields no parameters.
pub fn params_from(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Stringify a parameter value: strings verbatim, everything else as JSON text.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve `template` against `params`.
pub fn resolve(template: &str, params: &Params) -> ResolvedUri {
    let mut uri = String::with_capacity(template.len());
    let mut matched: HashSet<&str> = HashSet::new();
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        uri.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = placeholder_len(after);
        let name = &after[..len];

        match params.get(name).filter(|_| len > 0) {
            Some(value) => {
                uri.push_str(&param_to_string(value));
                matched.insert(name);
            }
            None => {
                uri.push(':');
                uri.push_str(name);
            }
        }
        rest = &after[len..];
    }
    uri.push_str(rest);

    let query = params
        .iter()
        .filter(|(name, _)| !matched.contains(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    ResolvedUri { uri, query }
}

/// Byte length of the identifier at the start of `s` (`[A-Za-z_][A-Za-z0-9_]*`).
fn placeholder_len(s: &str) -> usize {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return 0,
    }
    1 + bytes
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}
