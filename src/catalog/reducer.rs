//! # Record reduction
//!
//! The archive returns one row per observing campaign, so a single star or planet usually
//! appears several times with partially overlapping, sometimes conflicting columns.
//! This module collapses those rows into one canonical record per body.
//!
//! ## Algorithm
//!
//! 1. [`group_by_identifier`] partitions the rows on the identifier column, keeping the order
//!    in which identifiers were first seen. Every column seen in any row of a group becomes an
//!    array with one slot per row (`None` where that row lacks the value).
//! 2. [`reduce`] resolves each array independently:
//!    - missing entries are dropped; an empty array resolves to `None`,
//!    - if the first surviving entry is a number, the column resolves to the [`median`],
//!    - otherwise it resolves to the [`mode`], ties going to the first value encountered.
//!
//! Rows with no identifier are never merged into an existing group: each one forms a
//! singleton group with `identifier == None` so the anomaly stays visible to the caller.
use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use super::{CatalogValue, RawRecord};

/// All rows sharing one identifier, laid out column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    identifier: Option<CatalogValue>,
    n_rows: usize,
    fields: IndexMap<String, Vec<Option<CatalogValue>>>,
}

impl RecordGroup {
    fn from_rows(identifier: Option<CatalogValue>, rows: &[&RawRecord]) -> Self {
        let mut fields: IndexMap<String, Vec<Option<CatalogValue>>> = IndexMap::new();
        for row in rows {
            for column in row.columns() {
                if !fields.contains_key(column) {
                    let values = rows.iter().map(|r| r.get(column).cloned()).collect();
                    fields.insert(column.to_string(), values);
                }
            }
        }

        RecordGroup {
            identifier,
            n_rows: rows.len(),
            fields,
        }
    }

    /// Identifier shared by the rows, `None` for a row that had no identifier.
    pub fn identifier(&self) -> Option<&CatalogValue> {
        self.identifier.as_ref()
    }

    /// Number of raw rows in this group.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Per-row values of one column, `None` if no row of the group has this column.
    pub fn values(&self, column: &str) -> Option<&[Option<CatalogValue>]> {
        self.fields.get(column).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Hashable view of an identifier value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Number(u64),
    Text(String),
}

impl From<&CatalogValue> for GroupKey {
    fn from(value: &CatalogValue) -> Self {
        match value {
            // -0.0 and 0.0 must land in the same group
            CatalogValue::Number(n) if *n == 0.0 => GroupKey::Number(0.0f64.to_bits()),
            CatalogValue::Number(n) => GroupKey::Number(n.to_bits()),
            CatalogValue::Text(s) => GroupKey::Text(s.clone()),
        }
    }
}

/// Partition `rows` on the value of `identifier`.
///
/// Arguments
/// -----------------
/// * `rows`: raw catalog rows, possibly several per body.
/// * `identifier`: the column identifying a body (e.g. `"pl_name"`).
///
/// Return
/// ----------
/// * One [`RecordGroup`] per distinct identifier, in first-seen order. Each row lacking the
///   identifier yields its own group with `identifier() == None`.
pub fn group_by_identifier(rows: &[RawRecord], identifier: &str) -> Vec<RecordGroup> {
    let mut order: Vec<(Option<CatalogValue>, Vec<&RawRecord>)> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for row in rows {
        match row.get(identifier) {
            Some(id) => {
                let key = GroupKey::from(id);
                match index.get(&key) {
                    Some(&slot) => order[slot].1.push(row),
                    None => {
                        index.insert(key, order.len());
                        order.push((Some(id.clone()), vec![row]));
                    }
                }
            }
            None => {
                warn!("catalog row without `{identifier}` kept as its own group");
                order.push((None, vec![row]));
            }
        }
    }

    order
        .into_iter()
        .map(|(id, group_rows)| RecordGroup::from_rows(id, &group_rows))
        .collect()
}

/// Collapse `rows` into one canonical record per identifier.
///
/// The identifier column is carried through unchanged; every other column is resolved by
/// [`resolve_column`]. Output order follows [`group_by_identifier`].
pub fn reduce(rows: &[RawRecord], identifier: &str) -> Vec<RawRecord> {
    group_by_identifier(rows, identifier)
        .iter()
        .map(|group| reduce_group(group, identifier))
        .collect()
}

/// Resolve one [`RecordGroup`] into a canonical record.
pub fn reduce_group(group: &RecordGroup, identifier: &str) -> RawRecord {
    if group.len() > 1 {
        debug!(
            "reducing {} rows for {}",
            group.len(),
            group
                .identifier()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<no identifier>".into())
        );
    }

    group
        .fields
        .iter()
        .map(|(column, values)| {
            let value = if column == identifier {
                group.identifier.clone()
            } else {
                resolve_column(column, values)
            };
            (column.as_str(), value)
        })
        .collect()
}

/// Aggregate the per-row values of one column.
///
/// The kind of the first non-missing value decides the aggregate: median for numbers,
/// mode otherwise. Values of the other kind are ignored for a numeric column.
pub fn resolve_column(column: &str, values: &[Option<CatalogValue>]) -> Option<CatalogValue> {
    let present: Vec<&CatalogValue> = values.iter().flatten().collect();
    let first = present.first()?;

    if first.is_number() {
        let numbers: Vec<f64> = present.iter().filter_map(|v| v.as_number()).collect();
        if numbers.len() != present.len() {
            warn!(
                "column `{column}`: ignoring {} non-numeric value(s)",
                present.len() - numbers.len()
            );
        }
        median(&numbers).map(CatalogValue::Number)
    } else {
        mode(&present).cloned()
    }
}

/// Textbook median, NaN values excluded.
///
/// For an even count the two central values are averaged. Returns `None` when no valid
/// value remains.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; on a tie the value encountered first wins.
pub fn mode<'a>(values: &[&'a CatalogValue]) -> Option<&'a CatalogValue> {
    let mut counts: Vec<(&CatalogValue, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| **seen == **value) {
            Some((_, count)) => *count += 1,
            None => counts.push((*value, 1)),
        }
    }

    let mut best: Option<(&CatalogValue, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod reducer_test {
    use super::*;

    fn num(x: f64) -> Option<CatalogValue> {
        Some(CatalogValue::Number(x))
    }

    fn planet_row(name: &str, period: Option<f64>, method: Option<&str>) -> RawRecord {
        let mut row = RawRecord::new();
        row.insert("pl_name", Some(name.into()));
        row.insert("pl_orbper", period.map(CatalogValue::from));
        row.insert("discoverymethod", method.map(CatalogValue::from));
        row
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[1.0, 3.0, 5.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[f64::NAN, 2.0]), Some(2.0));
    }

    #[test]
    fn test_mode_tie_break_is_first_seen() {
        let a = CatalogValue::from("a");
        let b = CatalogValue::from("b");
        for _ in 0..10 {
            assert_eq!(mode(&[&a, &b, &a, &b]), Some(&a));
            assert_eq!(mode(&[&b, &a, &a, &b]), Some(&b));
        }
        assert_eq!(mode(&[&b, &a, &a]), Some(&a));
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let rows = vec![
            planet_row("c", Some(1.0), None),
            planet_row("b", Some(2.0), None),
            planet_row("c", Some(3.0), None),
        ];
        let groups = group_by_identifier(&rows, "pl_name");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].identifier(), Some(&CatalogValue::from("c")));
        assert_eq!(groups[0].len(), 2);
        assert_eq!(
            groups[0].values("pl_orbper").unwrap(),
            &[num(1.0), num(3.0)]
        );
        assert_eq!(groups[1].identifier(), Some(&CatalogValue::from("b")));
    }

    #[test]
    fn test_group_pads_missing_columns() {
        let mut extra = planet_row("b", None, None);
        extra.insert("pl_orbincl", Some(89.0.into()));
        let rows = vec![planet_row("b", Some(2.0), None), extra];

        let groups = group_by_identifier(&rows, "pl_name");
        assert_eq!(
            groups[0].values("pl_orbincl").unwrap(),
            &[None, num(89.0)]
        );
        assert_eq!(groups[0].values("pl_orbper").unwrap(), &[num(2.0), None]);
    }

    #[test]
    fn test_rows_without_identifier_are_singletons() {
        let mut anonymous = RawRecord::new();
        anonymous.insert("pl_orbper", Some(10.0.into()));
        let rows = vec![
            planet_row("b", Some(2.0), None),
            anonymous.clone(),
            anonymous,
            planet_row("b", Some(4.0), None),
        ];

        let groups = group_by_identifier(&rows, "pl_name");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[1].identifier().is_none());
        assert!(groups[2].identifier().is_none());
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_reduce_median_and_mode() {
        let rows = vec![
            planet_row("b", Some(1.0), Some("Transit")),
            planet_row("b", Some(2.0), Some("Radial Velocity")),
            planet_row("b", None, Some("Transit")),
            planet_row("b", Some(4.0), None),
            planet_row("b", Some(3.0), Some("Radial Velocity")),
        ];
        let reduced = reduce(&rows, "pl_name");
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].text("pl_name"), Some("b"));
        assert_eq!(reduced[0].number("pl_orbper"), Some(2.5));
        assert_eq!(reduced[0].text("discoverymethod"), Some("Transit"));
    }

    #[test]
    fn test_reduce_all_missing_resolves_to_none() {
        let rows = vec![planet_row("b", None, None), planet_row("b", None, None)];
        let reduced = reduce(&rows, "pl_name");
        assert!(reduced[0].contains_column("pl_orbper"));
        assert_eq!(reduced[0].get("pl_orbper"), None);
    }

    #[test]
    fn test_reduce_is_idempotent_on_reduced_input() {
        let rows = vec![
            planet_row("b", Some(1.0), Some("Transit")),
            planet_row("c", None, Some("Imaging")),
            planet_row("d", Some(7.5), None),
        ];
        let once = reduce(&rows, "pl_name");
        assert_eq!(once, rows);
        assert_eq!(reduce(&once, "pl_name"), once);
    }

    #[test]
    fn test_numeric_column_ignores_text() {
        let values = vec![num(2.0), Some(CatalogValue::from("n/a")), num(4.0)];
        assert_eq!(resolve_column("x", &values), Some(CatalogValue::Number(3.0)));
    }

    #[test]
    fn test_numeric_identifier() {
        let rows: Vec<RawRecord> = vec![
            RawRecord::from_iter([("id", CatalogValue::from(1.0)), ("v", 2.0.into())]),
            RawRecord::from_iter([("id", CatalogValue::from(1.0)), ("v", 6.0.into())]),
        ];
        let reduced = reduce(&rows, "id");
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].number("id"), Some(1.0));
        assert_eq!(reduced[0].number("v"), Some(4.0));
    }
}
