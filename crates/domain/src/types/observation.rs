//! Named scalar measurements fed to monitors

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// A map from metric or feature name to a value.
///
/// Monitors read only the keys they track and ignore the rest, so one
/// observation can carry both performance metrics and text statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(BTreeMap<String, f64>);

impl Observation {
    /// Empty observation
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// ```
    /// use textops_domain::Observation;
    ///
    /// let obs = Observation::new().with("accuracy", 0.9).with("latency", 12.0);
    /// assert_eq!(obs.get("accuracy"), Some(0.9));
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    /// Value recorded for `key`
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No values recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry of `other` into `self`, overwriting shared keys
    pub fn merge(&mut self, other: &Observation) {
        self.0.extend(other.0.iter().map(|(k, v)| (k.clone(), *v)));
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Observation {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, f64>> for Observation {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Observation {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let obs = Observation::new().with("accuracy", 0.8).with("latency", 5.0);
        assert_eq!(obs.len(), 2);
        assert_eq!(obs.get("latency"), Some(5.0));
        assert_eq!(obs.get("missing"), None);
        assert_eq!(obs.keys().collect::<Vec<_>>(), vec!["accuracy", "latency"]);
    }

    #[test]
    fn merge_overwrites_shared_keys() {
        let mut base = Observation::from_iter([("a", 1.0), ("b", 2.0)]);
        base.merge(&Observation::new().with("b", 3.0).with("c", 4.0));
        assert_eq!(base, Observation::from_iter([("a", 1.0), ("b", 3.0), ("c", 4.0)]));
    }

    #[test]
    fn serializes_as_plain_map() {
        let obs = Observation::new().with("text_length", 42.0);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"text_length":42.0}"#);
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }
}
