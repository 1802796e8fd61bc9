//! # Catalog rows
//!
//! Raw observational rows as returned by the remote tabular service, and the tools that turn
//! them into canonical per-body records.
//!
//! A [`RawRecord`] is an insertion-ordered map from column name to an optional
//! [`CatalogValue`]. `None` means the column was `null` (or absent) in the row; there is no
//! numeric sentinel for missing data.
//!
//! ## Submodules
//!
//! - [`reducer`] – collapses duplicated rows of a body into one canonical record
//!   (median for numbers, mode for text).
//! - [`schema`] – typed projections ([`schema::StarRecord`], [`schema::PlanetRecord`]) of a
//!   reduced record.
//! - [`archive`] – the query boundary towards the remote catalog service.
//!
//! ## Example
//!
//! ```rust
//! use orrery::catalog::{reducer::reduce, CatalogValue, RawRecord};
//!
//! let rows: Vec<RawRecord> = vec![
//!     RawRecord::from_iter([("pl_name", CatalogValue::from("b")), ("pl_orbper", 3.0.into())]),
//!     RawRecord::from_iter([("pl_name", CatalogValue::from("b")), ("pl_orbper", 5.0.into())]),
//! ];
//! let reduced = reduce(&rows, "pl_name");
//! assert_eq!(reduced[0].number("pl_orbper"), Some(4.0));
//! ```
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::orrery_errors::OrreryError;

pub mod archive;
pub mod reducer;
pub mod schema;

/// A scalar cell of a catalog row.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Number(f64),
    Text(String),
}

impl CatalogValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CatalogValue::Number(n) => Some(*n),
            CatalogValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CatalogValue::Number(_) => None,
            CatalogValue::Text(s) => Some(s),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CatalogValue::Number(_))
    }

    /// Convert a JSON scalar into a catalog value.
    ///
    /// `null` maps to `None`, booleans to `0`/`1`. Arrays and objects are not scalars and are
    /// rejected with [`OrreryError::CatalogResponse`].
    pub fn from_json(value: &Value) -> Result<Option<Self>, OrreryError> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(CatalogValue::Number(if *b { 1.0 } else { 0.0 }))),
            Value::Number(n) => n.as_f64().map(|x| Some(CatalogValue::Number(x))).ok_or_else(|| {
                OrreryError::CatalogResponse(format!("number out of range: {n}"))
            }),
            Value::String(s) => Ok(Some(CatalogValue::Text(s.clone()))),
            other => Err(OrreryError::CatalogResponse(format!(
                "expected a scalar cell, got {other}"
            ))),
        }
    }

    /// Interpret a CSV cell: empty is missing, anything parseable as `f64` is a number.
    pub fn from_csv_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        match cell.parse::<f64>() {
            Ok(n) => Some(CatalogValue::Number(n)),
            Err(_) => Some(CatalogValue::Text(cell.to_string())),
        }
    }
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Number(n) => write!(f, "{n}"),
            CatalogValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CatalogValue {
    fn from(n: f64) -> Self {
        CatalogValue::Number(n)
    }
}

impl From<i32> for CatalogValue {
    fn from(n: i32) -> Self {
        CatalogValue::Number(n as f64)
    }
}

impl From<&str> for CatalogValue {
    fn from(s: &str) -> Self {
        CatalogValue::Text(s.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(s: String) -> Self {
        CatalogValue::Text(s)
    }
}

/// One catalog row: column name → optional scalar, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: IndexMap<String, Option<CatalogValue>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, keeping its original position if it already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: Option<CatalogValue>) {
        self.fields.insert(column.into(), value);
    }

    /// Value of a column; `None` both when the column is absent and when it is `null`.
    pub fn get(&self, column: &str) -> Option<&CatalogValue> {
        self.fields.get(column).and_then(Option::as_ref)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CatalogValue::as_number)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CatalogValue::as_text)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&CatalogValue>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from one JSON object as returned by the archive.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Result<Self, OrreryError> {
        let mut record = RawRecord::new();
        for (column, cell) in object {
            record.insert(column.clone(), CatalogValue::from_json(cell)?);
        }
        Ok(record)
    }
}

impl<K: Into<String>> FromIterator<(K, CatalogValue)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, CatalogValue)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (column, value) in iter {
            record.insert(column, Some(value));
        }
        record
    }
}

impl<K: Into<String>> FromIterator<(K, Option<CatalogValue>)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, Option<CatalogValue>)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// Decode a JSON array of row objects.
pub fn rows_from_json(body: &str) -> Result<Vec<RawRecord>, OrreryError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(rows) = value else {
        return Err(OrreryError::CatalogResponse(
            "expected a JSON array of rows".into(),
        ));
    };

    rows.iter()
        .map(|row| -> Result<RawRecord, OrreryError> {
            match row {
                Value::Object(object) => RawRecord::from_json_object(object),
                other => Err(OrreryError::CatalogResponse(format!(
                    "expected a row object, got {other}"
                ))),
            }
        })
        .collect()
}

/// Decode CSV rows with a header line, the other output format of the archive.
pub fn rows_from_csv<R: std::io::Read>(reader: R) -> Result<Vec<RawRecord>, OrreryError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    csv_reader
        .records()
        .map(|record| -> Result<RawRecord, OrreryError> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(column, cell)| (column, CatalogValue::from_csv_cell(cell)))
                .collect())
        })
        .collect()
}
