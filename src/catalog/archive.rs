//! # Catalog source boundary
//!
//! The reconciliation pipeline never talks to the network directly. It asks a
//! [`CatalogSource`] for the rows matching a [`TapQuery`] (column list, table, filter) and
//! receives either the rows or an error. An empty row set is a valid answer; a transport or
//! decoding failure is always surfaced as an [`OrreryError`], never as an empty result.
//!
//! Two sources are provided:
//!
//! * [`ArchiveClient`] – blocking HTTP client for the NASA Exoplanet Archive TAP service.
//! * [`InMemoryCatalog`] – rows loaded up-front (from JSON, CSV, or code), answering simple
//!   `column='value'` filters. Handy for tests and offline work.
//!
//! ```rust, no_run
//! use orrery::catalog::archive::{ArchiveClient, CatalogSource, TapQuery};
//! use orrery::constants::{PLANET_COLUMNS, PS_TABLE};
//!
//! let client = ArchiveClient::new();
//! let query = TapQuery::new(&PLANET_COLUMNS, PS_TABLE, TapQuery::equals("hostname", "Kepler-16")).unwrap();
//! let rows = client.fetch(&query).unwrap();
//! println!("{} rows", rows.len());
//! ```
use std::{
    collections::HashMap,
    sync::LazyLock,
    time::Duration,
};

use itertools::Itertools;
use log::debug;
use regex::Regex;
use ureq::Agent;

use crate::orrery_errors::OrreryError;

use super::{rows_from_csv, rows_from_json, RawRecord};

/// Synchronous TAP endpoint of the NASA Exoplanet Archive
pub const ARCHIVE_TAP_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

static EQUALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*'((?:[^']|'')*)'\s*$")
        .expect("valid condition regex")
});

/// One tabular query: `select <columns> from <table> where <condition>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TapQuery {
    columns: Vec<String>,
    table: String,
    condition: String,
}

impl TapQuery {
    /// Build a query, rejecting column or table names that are not plain identifiers.
    pub fn new<S: AsRef<str>>(
        columns: &[S],
        table: &str,
        condition: impl Into<String>,
    ) -> Result<Self, OrreryError> {
        if columns.is_empty() {
            return Err(OrreryError::InvalidQuery("empty column list".into()));
        }
        for name in columns.iter().map(|c| c.as_ref()).chain([table]) {
            if !IDENTIFIER_RE.is_match(name) {
                return Err(OrreryError::InvalidQuery(format!(
                    "`{name}` is not a valid identifier"
                )));
            }
        }

        Ok(TapQuery {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            table: table.to_string(),
            condition: condition.into(),
        })
    }

    /// Equality filter with the value quoted as an ADQL string literal.
    pub fn equals(column: &str, value: &str) -> String {
        format!("{column}='{}'", value.replace('\'', "''"))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// ADQL text of the query.
    pub fn to_adql(&self) -> String {
        let mut adql = format!("select {} from {}", self.columns.iter().join(","), self.table);
        if !self.condition.trim().is_empty() {
            adql.push_str(" where ");
            adql.push_str(&self.condition);
        }
        adql
    }
}

/// Anything able to answer a [`TapQuery`] with catalog rows.
pub trait CatalogSource {
    fn fetch(&self, query: &TapQuery) -> Result<Vec<RawRecord>, OrreryError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn fetch(&self, query: &TapQuery) -> Result<Vec<RawRecord>, OrreryError> {
        (**self).fetch(query)
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn fetch(&self, query: &TapQuery) -> Result<Vec<RawRecord>, OrreryError> {
        (**self).fetch(query)
    }
}

/// Blocking client for the archive TAP service.
///
/// The underlying [`ureq::Agent`] is reused between queries and carries a global timeout.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    http_client: Agent,
    endpoint: String,
}

impl Default for ArchiveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveClient {
    pub fn new() -> Self {
        Self::with_endpoint(ARCHIVE_TAP_URL, Duration::from_secs(30))
    }

    /// Client for another TAP endpoint (mirror, local proxy…).
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        ArchiveClient {
            http_client: agent,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CatalogSource for ArchiveClient {
    fn fetch(&self, query: &TapQuery) -> Result<Vec<RawRecord>, OrreryError> {
        let adql = query.to_adql();
        debug!("TAP query: {adql}");

        let body = self
            .http_client
            .get(&self.endpoint)
            .query("query", &adql)
            .query("format", "json")
            .call()?
            .body_mut()
            .read_to_string()?;

        rows_from_json(&body)
    }
}

/// Catalog rows held in memory, grouped by table name.
///
/// Only conditions of the form `column='value'` (or an empty condition) are understood;
/// any other condition is rejected with [`OrreryError::InvalidQuery`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: HashMap<String, Vec<RawRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rows(&mut self, table: &str, rows: impl IntoIterator<Item = RawRecord>) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Add rows decoded from an archive JSON reply.
    pub fn add_json(&mut self, table: &str, body: &str) -> Result<(), OrreryError> {
        let rows = rows_from_json(body)?;
        self.add_rows(table, rows);
        Ok(())
    }

    /// Add rows decoded from an archive CSV reply.
    pub fn add_csv<R: std::io::Read>(&mut self, table: &str, reader: R) -> Result<(), OrreryError> {
        let rows = rows_from_csv(reader)?;
        self.add_rows(table, rows);
        Ok(())
    }
}

impl CatalogSource for InMemoryCatalog {
    fn fetch(&self, query: &TapQuery) -> Result<Vec<RawRecord>, OrreryError> {
        let filter = if query.condition().trim().is_empty() {
            None
        } else {
            let captures = EQUALS_RE.captures(query.condition()).ok_or_else(|| {
                OrreryError::InvalidQuery(format!(
                    "unsupported in-memory condition: {}",
                    query.condition()
                ))
            })?;
            Some((captures[1].to_string(), captures[2].replace("''", "'")))
        };

        let Some(rows) = self.tables.get(query.table()) else {
            return Ok(Vec::new());
        };

        Ok(rows
            .iter()
            .filter(|row| match &filter {
                None => true,
                Some((column, value)) => row
                    .get(column)
                    .is_some_and(|cell| cell.to_string() == *value),
            })
            .map(|row| -> RawRecord {
                query
                    .columns()
                    .iter()
                    .filter(|column| row.contains_column(column))
                    .map(|column| (column.as_str(), row.get(column).cloned()))
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod archive_test {
    use super::*;
    use crate::catalog::CatalogValue;

    #[test]
    fn test_adql_rendering() {
        let query = TapQuery::new(
            &["pl_name", "hostname"],
            "ps",
            TapQuery::equals("hostname", "Kepler-16"),
        )
        .unwrap();
        assert_eq!(
            query.to_adql(),
            "select pl_name,hostname from ps where hostname='Kepler-16'"
        );
    }

    #[test]
    fn test_equals_escapes_quotes() {
        assert_eq!(TapQuery::equals("hostname", "Barnard's"), "hostname='Barnard''s'");
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(
            TapQuery::new(&["pl_name; drop"], "ps", ""),
            Err(OrreryError::InvalidQuery(
                "`pl_name; drop` is not a valid identifier".into()
            ))
        );
        let empty: [&str; 0] = [];
        assert!(TapQuery::new(&empty, "ps", "").is_err());
    }

    #[test]
    fn test_in_memory_filter_and_projection() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_json(
                "ps",
                r#"[
                    {"pl_name": "a b", "hostname": "Barnard's", "pl_orbper": 3.1},
                    {"pl_name": "c b", "hostname": "C", "pl_orbper": 1.0}
                ]"#,
            )
            .unwrap();

        let query = TapQuery::new(
            &["pl_name", "pl_bmassj"],
            "ps",
            TapQuery::equals("hostname", "Barnard's"),
        )
        .unwrap();
        let rows = catalog.fetch(&query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("pl_name"), Some(&CatalogValue::from("a b")));
        assert!(!rows[0].contains_column("pl_orbper"));
        assert!(!rows[0].contains_column("pl_bmassj"));
    }

    #[test]
    fn test_in_memory_unknown_table_is_empty() {
        let catalog = InMemoryCatalog::new();
        let query = TapQuery::new(&["pl_name"], "pscomppars", "").unwrap();
        assert_eq!(catalog.fetch(&query).unwrap(), Vec::<RawRecord>::new());
    }

    #[test]
    fn test_in_memory_rejects_complex_condition() {
        let catalog = InMemoryCatalog::new();
        let query = TapQuery::new(&["pl_name"], "ps", "pl_orbper > 3").unwrap();
        assert!(matches!(
            catalog.fetch(&query),
            Err(OrreryError::InvalidQuery(_))
        ));
    }
}
