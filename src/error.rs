use std::path::PathBuf;
use thiserror::Error;

/// Reasons a catalog could not be loaded.
///
/// These are "we could not look" failures. A lookup that ran and matched
/// nothing is a [`MatchResult::NotFound`](crate::MatchResult::NotFound) value,
/// never one of these.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog record #{index} has an empty serie")]
    EmptySerie { index: usize },

    #[error("duplicate serie in catalog: {0}")]
    DuplicateSerie(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
