//! Static catalog source.
//!
//! The dataset is a pre-built JSON document in one of two shapes:
//!
//! ```text
//! keyed:  { "8954318224056426839": { "linea": "1127067248", "estado": "ASIGNADA" }, ... }
//! listed: [ { "serie": "8954318224056426839", "linea": "1127067248", ... }, ... ]
//! ```
//!
//! Both keep source order, which is the order strategies 3 and 4 enumerate.
//! Numeric JSON values are accepted for `serie` and `linea` and read as their
//! decimal text.

use crate::Record;
use crate::error::{CatalogError, CatalogResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Keyed(IndexMap<String, Record>),
    Listed(Vec<Record>),
}

/// Parse a catalog document into records, in source order.
pub fn load_records(json: &str) -> CatalogResult<Vec<Record>> {
    let records = match serde_json::from_str::<CatalogDocument>(json)? {
        CatalogDocument::Keyed(map) => keyed_records(map)?,
        CatalogDocument::Listed(list) => listed_records(list)?,
    };
    Ok(records)
}

/// Read and parse the catalog document at `path`.
pub fn load_records_from_path(path: impl AsRef<Path>) -> CatalogResult<Vec<Record>> {
    let path = path.as_ref();
    let json =
        std::fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    let records = load_records(&json)?;
    tracing::info!(path = %path.display(), records = records.len(), "catalog loaded");
    Ok(records)
}

fn keyed_records(map: IndexMap<String, Record>) -> CatalogResult<Vec<Record>> {
    map.into_iter()
        .enumerate()
        .map(|(index, (serie, mut record))| {
            if serie.trim().is_empty() {
                return Err(CatalogError::EmptySerie { index });
            }
            // The key is authoritative; an inner `serie` field is ignored.
            record.serie = serie;
            Ok(record)
        })
        .collect()
}

fn listed_records(list: Vec<Record>) -> CatalogResult<Vec<Record>> {
    {
        let mut seen = HashSet::with_capacity(list.len());
        for (index, record) in list.iter().enumerate() {
            if record.serie.trim().is_empty() {
                return Err(CatalogError::EmptySerie { index });
            }
            if !seen.insert(record.serie.as_str()) {
                return Err(CatalogError::DuplicateSerie(record.serie.clone()));
            }
        }
    }
    Ok(list)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Unsigned(n) => n.to_string(),
            StringOrNumber::Signed(n) => n.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

pub(crate) fn opt_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn keyed_document_keeps_source_order() {
        let json = r#"{
            "8954319999000000001": { "linea": "1100000001", "estado": "DISPONIBLE" },
            "8954318224056426839": { "linea": "1127067248", "estado": "ASIGNADA", "cuenta": "C-1", "ubicacion": "LOCAL 2" },
            "8954310000000000001": {}
        }"#;

        let records = load_records(json).unwrap();
        let series: Vec<&str> = records.iter().map(|r| r.serie.as_str()).collect();
        assert_eq!(series, vec!["8954319999000000001", "8954318224056426839", "8954310000000000001"]);
        assert_eq!(
            records[1],
            Record::new("8954318224056426839")
                .with_linea("1127067248")
                .with_estado("ASIGNADA")
                .with_cuenta("C-1")
                .with_ubicacion("LOCAL 2")
        );
        assert_eq!(records[2], Record::new("8954310000000000001"));
    }

    #[test]
    fn keyed_document_key_overrides_inner_serie() {
        let json = r#"{ "8954318224056426839": { "serie": "something else" } }"#;
        let records = load_records(json).unwrap();
        assert_eq!(records[0].serie, "8954318224056426839");
    }

    #[test]
    fn listed_document_loads() {
        let json = r#"[
            { "serie": "8954318224056426839", "linea": "1127067248" },
            { "serie": "8954318224056426847", "estado": null }
        ]"#;

        let records = load_records(json).unwrap();
        assert_eq!(
            records,
            vec![Record::new("8954318224056426839").with_linea("1127067248"), Record::new("8954318224056426847")]
        );
    }

    #[test]
    fn numeric_values_are_read_as_text() {
        let json = r#"[{ "serie": 8954318224056426839, "linea": 1127067248 }]"#;
        let records = load_records(json).unwrap();
        assert_eq!(records[0], Record::new("8954318224056426839").with_linea("1127067248"));
    }

    #[test]
    fn rejects_blank_and_duplicate_series() {
        let blank = load_records(r#"[{ "serie": "1" }, { "linea": "1127067248" }]"#);
        assert!(matches!(blank, Err(CatalogError::EmptySerie { index: 1 })));

        let blank_key = load_records(r#"{ " ": {} }"#);
        assert!(matches!(blank_key, Err(CatalogError::EmptySerie { index: 0 })));

        let duplicate = load_records(r#"[{ "serie": "1" }, { "serie": "2" }, { "serie": "1" }]"#);
        match duplicate {
            Err(CatalogError::DuplicateSerie(serie)) => assert_eq!(serie, "1"),
            other => panic!("expected DuplicateSerie, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(load_records("{ not json"), Err(CatalogError::Json(_))));
        assert!(matches!(load_records("42"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "8954318224056426839": {{ "linea": "1127067248" }} }}"#).unwrap();

        let records = load_records_from_path(file.path()).unwrap();
        assert_eq!(records, vec![Record::new("8954318224056426839").with_linea("1127067248")]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_records_from_path(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
