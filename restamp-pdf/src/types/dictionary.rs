use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::types::Object;

/// Represents a PDF dictionary object containing key-value pairs.
///
/// Keys are PDF names stored without their leading `/`; values can be any
/// PDF object. A key may also be present with no value at all (`/key`
/// immediately followed by `>>` in the source); such entries survive
/// round-trips as a bare key.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Dictionary {
    records: BTreeMap<SmolStr, Option<Object>>,
}

impl Dictionary {
    /// The value stored under `key`, if the key exists and carries one.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.records.get(key).and_then(|value| value.as_ref())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<SmolStr>, value: Option<Object>) {
        self.records.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.records.remove(key);
    }

    /// Fold `other` into this dictionary; keys from `other` win.
    pub fn merge(&mut self, other: Dictionary) {
        self.records.extend(other.records);
    }

    pub fn serialize(&self, out: &mut Vec<u8>, source: &[u8]) {
        out.extend_from_slice(b"<<");
        for (key, value) in &self.records {
            out.push(b'/');
            out.extend_from_slice(key.as_bytes());
            if let Some(value) = value {
                value.serialize(out, source);
            }
        }
        out.extend_from_slice(b">>\n");
    }
}

impl<K: std::convert::Into<SmolStr>> From<Vec<(K, Object)>> for Dictionary {
    fn from(value: Vec<(K, Object)>) -> Self {
        let value = value.into_iter().map(|(key, val)| (key.into(), Some(val)));

        Self {
            records: BTreeMap::from_iter(value),
        }
    }
}

impl<K: std::convert::Into<SmolStr>, const N: usize> From<[(K, Object); N]> for Dictionary {
    fn from(value: [(K, Object); N]) -> Self {
        let value = value.map(|(key, val)| (key.into(), Some(val)));

        Self {
            records: BTreeMap::from(value),
        }
    }
}

impl std::ops::Deref for Dictionary {
    type Target = BTreeMap<SmolStr, Option<Object>>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
