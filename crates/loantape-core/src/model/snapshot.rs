//! Snapshot: one dated export of the full loan tape.

use crate::model::{Record, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered, read-only collection of records.
///
/// Snapshots are never mutated by the engine or the analytics module;
/// operations that narrow a snapshot return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    label: String,
    columns: Vec<String>,
    records: Vec<Record>,
    digest: Option<String>,
}

impl Snapshot {
    /// Create a snapshot from declared columns and records.
    ///
    /// Duplicate column names are collapsed, keeping the first position.
    pub fn new(label: impl Into<String>, columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut seen = BTreeSet::new();
        let columns = columns
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        Self {
            label: label.into(),
            columns,
            records,
            digest: None,
        }
    }

    /// Attach the content digest of the source file.
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Declared columns in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_set(&self) -> BTreeSet<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the numeric values of a column.
    ///
    /// Returns `None` when the column is not declared. Non-numeric and empty
    /// cells are skipped.
    pub fn sum(&self, column: &str) -> Option<f64> {
        if !self.has_column(column) {
            return None;
        }
        Some(self.records.iter().filter_map(|r| r.number(column)).sum())
    }

    /// Sum of a column, treating an undeclared column as zero.
    pub fn sum_or_zero(&self, column: &str) -> f64 {
        self.sum(column).unwrap_or(0.0)
    }

    /// New snapshot holding only the records matching `keep`.
    pub fn filter<F>(&self, keep: F) -> Snapshot
    where
        F: Fn(&Record) -> bool,
    {
        Snapshot {
            label: self.label.clone(),
            columns: self.columns.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            digest: self.digest.clone(),
        }
    }

    /// Value of `column` for every record, in record order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.records.iter().map(move |r| r.get_field(column))
    }
}
