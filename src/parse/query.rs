//! Query-option map with form-urlencoded semantics.
//!
//! Connection options ride in the URL query (`?sslmode=disable&timeout=10`).
//! Keys are case-sensitive and order is preserved so generated DSNs stay
//! stable across runs.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An insertion-ordered map of connection options.
///
/// Duplicate keys follow the form convention: the key keeps its first
/// position, the **last** value written wins. Keys are case-sensitive
/// (`sslmode` and `SSLMode` are distinct options).
///
/// # Examples
///
/// ```
/// use connstr::Params;
///
/// let mut params = Params::new();
/// params.insert("sslmode", "disable");
/// params.insert("timeout", "10");
/// params.insert("sslmode", "require");
///
/// assert_eq!(params.get("sslmode"), Some("require"));
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.to_query_string(), "sslmode=require&timeout=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an option map with pre-allocated capacity for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Sets an option. An existing key keeps its position but takes the new
    /// value; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.into(),
            None => self.inner.push((key, value.into())),
        }
    }

    /// Sets an option only if the key is not already present.
    ///
    /// This is the merge rule for driver default options: values supplied by
    /// the caller always win over descriptor defaults.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains(&key) {
            self.inner.push((key, value.into()));
        }
    }

    /// Returns the value for the given key, or `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes the entry for the given key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.inner.iter().position(|(k, _)| k == key)?;
        Some(self.inner.remove(idx).1)
    }

    /// Returns `true` if the map contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no options.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over all `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the options back into form-urlencoded query syntax
    /// (without a leading `?`). Spaces become `+`, reserved characters are
    /// percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            out.append_pair(k, v);
        }
        out.finish()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
