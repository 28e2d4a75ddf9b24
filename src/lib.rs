#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod scan;
mod source;

pub use api::{
    Candidate, LookupDetails, LookupVerbose, MatchResult, Options, candidates, lookup, lookup_verbose_with, lookup_with,
};
pub use engine::{
    CatalogSnapshot, CatalogStats, PREFIX_LEN, SnapshotStore, Strategy, StrategyMask, StrategyOutcome, StrategyTrace,
    normalize,
};
pub use error::{CatalogError, CatalogResult};
pub use scan::{CARRIER_CODE, Detection, extract_serials, extract_suffixes, scan_text};
pub use source::{load_records, load_records_from_path};

use serde::{Deserialize, Serialize};

// --- Record -----------------------------------------------------------------

/// One SIM card known to the catalog.
///
/// `serie` is the primary key. Every other field is optional and passed
/// through verbatim; the engine only ever compares `serie` and `linea`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Full serial number printed on the card.
    #[serde(default, deserialize_with = "source::string_or_number")]
    pub serie: String,
    /// Phone line bound to the card, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "source::opt_string_or_number")]
    pub linea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuenta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
}

impl Record {
    /// Create a record with only its serial set.
    pub fn new(serie: impl Into<String>) -> Self {
        Record { serie: serie.into(), ..Record::default() }
    }

    pub fn with_linea(mut self, linea: impl Into<String>) -> Self {
        self.linea = Some(linea.into());
        self
    }

    pub fn with_estado(mut self, estado: impl Into<String>) -> Self {
        self.estado = Some(estado.into());
        self
    }

    pub fn with_cuenta(mut self, cuenta: impl Into<String>) -> Self {
        self.cuenta = Some(cuenta.into());
        self
    }

    pub fn with_ubicacion(mut self, ubicacion: impl Into<String>) -> Self {
        self.ubicacion = Some(ubicacion.into());
        self
    }

    /// The línea, treating an empty string the same as a missing one.
    pub(crate) fn indexed_linea(&self) -> Option<&str> {
        self.linea.as_deref().filter(|l| !l.is_empty())
    }

    /// The leading `PREFIX_LEN` characters of `serie`, if they are all ASCII digits.
    pub(crate) fn numeric_prefix(&self) -> Option<&str> {
        let prefix = self.serie.get(..PREFIX_LEN)?;
        prefix.bytes().all(|b| b.is_ascii_digit()).then_some(prefix)
    }
}
