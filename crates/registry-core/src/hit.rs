//! Search-result shapes returned by the registry's `_search` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search hit.
///
/// Also used as a uniform document wrapper; [`SearchHit::empty`] gives a
/// placeholder for callers that expect a hit even when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl SearchHit {
    /// A hit with null identifiers and an empty source.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The `hits.total` field, either a bare count or `{ "value": n, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HitsTotal {
    Count(u64),
    Object {
        value: u64,
        #[serde(default)]
        relation: Option<String>,
    },
}

impl HitsTotal {
    pub fn value(&self) -> u64 {
        match self {
            HitsTotal::Count(n) => *n,
            HitsTotal::Object { value, .. } => *value,
        }
    }
}

impl Default for HitsTotal {
    fn default() -> Self {
        HitsTotal::Count(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub total: HitsTotal,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Body of a `_search` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: SearchHits,
}

impl SearchResponse {
    /// True when the server reported no matches.
    pub fn is_empty(&self) -> bool {
        self.hits.total.value() == 0 || self.hits.hits.is_empty()
    }
}

/// A record category: the hit's source annotated with the hit's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Category {
    /// Build a category from a search hit. The hit id wins over any `id` in the source.
    pub fn from_hit(hit: SearchHit) -> Self {
        let mut fields = hit.source;
        fields.remove("id");
        Self {
            id: hit.id.unwrap_or_default(),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }
}
