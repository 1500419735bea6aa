//! Ordered, type-preserving manifest document building and writing.
//!
//! Generated manifests end up committed to version control, so output must be
//! stable and human-diffable: key order equals insertion order, and a value
//! set as an object serializes with object syntax even when empty, which
//! manifest readers treat differently from an empty list.

pub mod writer;

pub use writer::ManifestWriter;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// An ordered key/value document assembled into the package manifest.
///
/// Values are `serde_json::Value`, the tagged sum that keeps object vs. array
/// fidelity independent of how the value was constructed. The crate enables
/// serde_json's `preserve_order` feature so nested objects keep their
/// insertion order too.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManifestDocument {
    entries: IndexMap<String, Value>,
}

impl ManifestDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a top-level key. Re-setting an existing key overwrites its value
    /// but keeps the key's original position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Shallow merge: every top-level key of `other` overwrites the matching
    /// key in `self`. Nested objects are replaced wholesale, not merged.
    pub fn merge(&mut self, other: ManifestDocument) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The document as a JSON value, keys in insertion order.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Pretty-printed JSON with a trailing newline, the on-disk form.
    pub fn to_json_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ManifestDocument {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (key, value) in iter {
            doc.set(key, value);
        }
        doc
    }
}
