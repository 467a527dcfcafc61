//! In-memory records: ordered column-name-to-value mappings.
//!
//! A record set is a slice of [`Record`]s sharing one set of column names.
//! The schema of a record set is taken from its first record, once.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// A value in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value, as ingested.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Numeric reading of the value.
    ///
    /// Text is trimmed and parsed; empty or unparseable text yields `None`.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            DataValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            }
            DataValue::Null => None,
        }
    }

    /// Double-precision reading, for comparisons near a threshold.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(f64::from(*n)),
            DataValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            }
            DataValue::Null => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Null => Ok(()),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

/// One row of tabular data: column names to values, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, DataValue>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style. Re-inserting a key keeps its position.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DataValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.fields.get(key)
    }

    /// Numeric reading of a field (`None` when missing or non-numeric).
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(DataValue::as_f32)
    }

    /// Display text of a field (empty when missing).
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Column names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<DataValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Ordered column names of a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Infer the schema from the first record.
    ///
    /// Later records are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `records` is empty.
    pub fn infer(records: &[Record]) -> Result<Self> {
        let first = records.first().ok_or(Error::EmptyInput)?;
        let columns: Vec<String> = first.keys().map(str::to_string).collect();
        log::debug!("inferred schema with {} columns from first of {} records", columns.len(), records.len());
        Ok(Self { columns })
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
