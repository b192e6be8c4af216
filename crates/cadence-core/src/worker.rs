//! Worker options carried on a descriptor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const EVAL_KEY: &str = "eval";

/// Options handed to the worker that runs a job.
///
/// Keys other than `eval` are opaque and passed through untouched. `eval =
/// true` tells the executor that the descriptor's `path` is inline source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerOptions(BTreeMap<String, Value>);

impl WorkerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Whether `eval` is set to `true`.
    pub fn is_eval(&self) -> bool {
        matches!(self.0.get(EVAL_KEY), Some(Value::Bool(true)))
    }

    /// Copy the caller's options and force `eval = true`.
    ///
    /// Caller keys survive except `eval`, which is always overwritten. The
    /// caller's map is never aliased.
    pub fn with_forced_eval(caller: Option<&WorkerOptions>) -> WorkerOptions {
        let mut merged = caller.cloned().unwrap_or_default();
        merged.0.insert(EVAL_KEY.to_string(), Value::Bool(true));
        merged
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for WorkerOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
