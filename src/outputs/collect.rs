/// Normalize raw stack outputs into an `OutputMap`.
use std::collections::BTreeMap;

use serde::Serialize;

/// A single output entry as returned by the stack lookup.
///
/// Either side may be absent; such entries are dropped by [`collect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPair {
    /// Output key, e.g. `BucketName`.
    pub key: Option<String>,
    /// Output value.
    pub value: Option<String>,
}

impl OutputPair {
    /// Build a pair with both sides present.
    #[cfg(test)]
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// Output key to value mapping.
///
/// Every entry has both a key and a value. Iteration is in ascending
/// byte-wise key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputMap(BTreeMap<String, String>);

impl OutputMap {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a OutputMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Build an `OutputMap` from raw pairs.
///
/// Pairs missing a key or a value are skipped. A repeated key keeps the
/// last value seen.
#[must_use]
pub fn collect<I>(pairs: I) -> OutputMap
where
    I: IntoIterator<Item = OutputPair>,
{
    let mut map = BTreeMap::new();
    for pair in pairs {
        if let OutputPair {
            key: Some(key),
            value: Some(value),
        } = pair
        {
            map.insert(key, value);
        }
    }
    OutputMap(map)
}
