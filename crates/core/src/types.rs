//! Catalog record types and the canonical product identifier.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical product identifier.
///
/// Derived from a product's sorted, de-duplicated stem set joined with `_`
/// (e.g. `baked beans` → `bake_bean`). Two products whose names normalize to
/// the same stem set share an id and are merged in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One record of the product catalog feed.
///
/// The feed is JSON-lines; field names follow the upstream API. `nutrition`
/// is opaque passthrough data and is never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Raw display name, prior to canonicalization.
    #[serde(rename = "product")]
    pub name: String,

    /// Popularity count: how many recipes reference this product.
    pub recipe_count: u64,

    /// Optional reference to the parent product's id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Opaque nutrition payload, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<serde_json::Value>,
}

impl ProductRecord {
    /// Convenience constructor for a root record with no parent.
    pub fn new(name: impl Into<String>, recipe_count: u64) -> Self {
        ProductRecord {
            name: name.into(),
            recipe_count,
            parent_id: None,
            nutrition: None,
        }
    }

    /// Attach a parent reference.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
