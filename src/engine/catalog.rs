//! Catalog snapshot construction.
//!
//! A `CatalogSnapshot` bundles the three read-only structures every lookup
//! consults. They are built together from one record list and never mutated
//! afterwards:
//!
//! - **catalog**: `serie -> Record`, iterated in source order.
//! - **by_linea**: `linea -> position in catalog`, for records that have one.
//! - **prefixes**: every distinct all-digit 10-character serial prefix, in the
//!   order it was first seen.
//!
//! ## Invariants
//!
//! - `by_linea` values are positions into `catalog` and are derived from the
//!   final catalog, after duplicate series have been collapsed.
//! - A repeated serie keeps its first position and its last record.
//! - A repeated línea maps to the last record (in catalog order) that carries
//!   it. Nothing downstream defends against such collisions.

use crate::Record;
use chrono::{Local, NaiveDateTime};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Length of the batch prefix shared by serials printed on the same run of cards.
pub const PREFIX_LEN: usize = 10;

/// Immutable catalog plus its derived indices.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    catalog: IndexMap<String, Record>,
    by_linea: HashMap<String, usize>,
    prefixes: IndexSet<String>,
    built_at: NaiveDateTime,
}

/// Sizes of a snapshot's structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub records: usize,
    pub lineas: usize,
    pub prefixes: usize,
}

impl CatalogSnapshot {
    /// Build a snapshot from records in source order. O(number of records).
    pub fn build(records: impl IntoIterator<Item = Record>) -> Self {
        let mut catalog: IndexMap<String, Record> = IndexMap::new();
        for record in records {
            catalog.insert(record.serie.clone(), record);
        }

        let mut by_linea = HashMap::new();
        let mut prefixes = IndexSet::new();
        for (position, record) in catalog.values().enumerate() {
            if let Some(linea) = record.indexed_linea() {
                by_linea.insert(linea.to_string(), position);
            }
            if let Some(prefix) = record.numeric_prefix() {
                // `IndexSet::insert` keeps the first position of a repeated prefix.
                prefixes.insert(prefix.to_string());
            }
        }

        let snapshot = CatalogSnapshot { catalog, by_linea, prefixes, built_at: Local::now().naive_local() };
        let stats = snapshot.stats();
        tracing::info!(records = stats.records, lineas = stats.lineas, prefixes = stats.prefixes, "catalog snapshot built");
        snapshot
    }

    /// Record whose serie is exactly `serie`.
    pub fn get(&self, serie: &str) -> Option<&Record> {
        self.catalog.get(serie)
    }

    /// Record whose línea is exactly `linea`.
    pub fn by_linea(&self, linea: &str) -> Option<&Record> {
        let position = *self.by_linea.get(linea)?;
        self.catalog.get_index(position).map(|(_, record)| record)
    }

    /// Known prefixes in first-seen order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// All records in source order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.catalog.values()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats { records: self.catalog.len(), lineas: self.by_linea.len(), prefixes: self.prefixes.len() }
    }

    /// Local time the snapshot was built.
    pub fn built_at(&self) -> NaiveDateTime {
        self.built_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogSnapshot {
        CatalogSnapshot::build(vec![
            Record::new("8954318224056426839").with_linea("1127067248").with_estado("ASIGNADA"),
            Record::new("8954318224056426847"),
            Record::new("8954310000111111110").with_linea("1150000000"),
            Record::new("ABC4318224056426839"),
            Record::new("12345"),
        ])
    }

    #[test]
    fn build_populates_all_three_structures() {
        let snap = sample();
        assert_eq!(snap.stats(), CatalogStats { records: 5, lineas: 2, prefixes: 2 });
        assert_eq!(snap.len(), 5);
        assert!(!snap.is_empty());
    }

    #[test]
    fn prefixes_keep_first_seen_order_and_skip_non_numeric() {
        let snap = sample();
        let prefixes: Vec<&str> = snap.prefixes().collect();
        assert_eq!(prefixes, vec!["8954318224", "8954310000"]);
    }

    #[test]
    fn records_without_linea_are_not_indexed() {
        let snap = sample();
        assert_eq!(snap.by_linea("1127067248").map(|r| r.serie.as_str()), Some("8954318224056426839"));
        assert_eq!(snap.by_linea("1150000000").map(|r| r.serie.as_str()), Some("8954310000111111110"));
        assert!(snap.by_linea("").is_none());
    }

    #[test]
    fn records_iterate_in_source_order() {
        let snap = sample();
        let series: Vec<&str> = snap.records().map(|r| r.serie.as_str()).collect();
        assert_eq!(
            series,
            vec!["8954318224056426839", "8954318224056426847", "8954310000111111110", "ABC4318224056426839", "12345"]
        );
    }

    #[test]
    fn repeated_linea_is_last_write_wins() {
        let snap = CatalogSnapshot::build(vec![
            Record::new("1111111111000000001").with_linea("1100000000"),
            Record::new("1111111111000000002").with_linea("1100000000"),
        ]);
        assert_eq!(snap.by_linea("1100000000").map(|r| r.serie.as_str()), Some("1111111111000000002"));
        assert_eq!(snap.stats().lineas, 1);
    }

    #[test]
    fn repeated_serie_keeps_last_record_and_drops_stale_linea() {
        let snap = CatalogSnapshot::build(vec![
            Record::new("1111111111000000001").with_linea("1100000001"),
            Record::new("1111111111000000002"),
            Record::new("1111111111000000001").with_linea("1100000009").with_estado("BLOQUEADA"),
        ]);
        assert_eq!(snap.len(), 2);
        assert!(snap.by_linea("1100000001").is_none());
        let record = snap.by_linea("1100000009").unwrap();
        assert_eq!(record.estado.as_deref(), Some("BLOQUEADA"));
        assert_eq!(snap.records().next().map(|r| r.serie.as_str()), Some("1111111111000000001"));
    }

    #[test]
    fn empty_catalog_builds() {
        let snap = CatalogSnapshot::build(Vec::new());
        assert!(snap.is_empty());
        assert_eq!(snap.stats(), CatalogStats { records: 0, lineas: 0, prefixes: 0 });
        assert!(snap.get("").is_none());
    }
}
