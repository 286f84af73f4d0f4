//! Free-form model hyper-parameters
//!
//! The registry hands a [`ModelParams`] to each constructor. Params arrive as
//! a JSON object (from a config file or a caller) and every implementation
//! validates only the keys it understands.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, TextOpsError};

/// Keyword arguments for a classifier constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelParams(Map<String, Value>);

impl ModelParams {
    /// Empty parameter set; every model falls back to its defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or overwrite `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw JSON value for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Supplied keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of supplied keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No keys supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject any key outside `allowed`.
    pub fn ensure_only(&self, model_type: &str, allowed: &[&str]) -> Result<()> {
        match self.keys().find(|key| !allowed.contains(key)) {
            Some(key) => Err(TextOpsError::invalid_input(format!(
                "unknown parameter '{key}' for model type '{model_type}' (expected one of: {})",
                allowed.join(", ")
            ))),
            None => Ok(()),
        }
    }

    /// `key` as a number; `InvalidInput` if it is something else
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.typed(key, "a number", Value::as_f64)
    }

    /// `key` as a non-negative integer
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        self.typed(key, "a non-negative integer", Value::as_u64)
    }

    /// `key` as a `usize`
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>> {
        self.typed(key, "a non-negative integer", |v| {
            v.as_u64().and_then(|n| usize::try_from(n).ok())
        })
    }

    /// `key` as a string
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        self.typed(key, "a string", Value::as_str)
    }

    /// Read a two-element integer array such as `[1, 2]`.
    pub fn get_usize_pair(&self, key: &str) -> Result<Option<(usize, usize)>> {
        self.typed(key, "a pair of non-negative integers", |v| {
            let items = v.as_array()?;
            let [a, b] = items.as_slice() else {
                return None;
            };
            let a = usize::try_from(a.as_u64()?).ok()?;
            let b = usize::try_from(b.as_u64()?).ok()?;
            Some((a, b))
        })
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| {
                TextOpsError::invalid_input(format!(
                    "parameter '{key}' must be {expected}, got {value}"
                ))
            }),
        }
    }
}

impl From<Map<String, Value>> for ModelParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
