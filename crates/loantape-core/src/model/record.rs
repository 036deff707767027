//! A single snapshot row.

use crate::model::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a snapshot, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and loaders.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.fields.insert(column.into(), value);
    }

    pub fn get_field(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Numeric value of a field; `None` when absent or not numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get_field(column).and_then(Value::as_f64)
    }

    /// Trimmed text of a field; `None` when absent or empty.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get_field(column).and_then(Value::normalized_key)
    }

    /// True when the field equals `expected` after trimming.
    pub fn text_eq(&self, column: &str, expected: &str) -> bool {
        self.text(column).as_deref() == Some(expected)
    }
}
