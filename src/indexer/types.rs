//! Indexer type definitions.

use thiserror::Error;

/// Key a catalog is indexed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    pub page: String,
    pub language: String,
}

impl CatalogKey {
    #[must_use]
    pub fn new(page: impl Into<String>, language: impl Into<String>) -> Self {
        Self { page: page.into(), language: language.into() }
    }
}

#[derive(Error, Debug)]
pub enum IndexerError {
    /// Error when the catalog glob pattern cannot be compiled
    #[error("Invalid catalog pattern: {0}")]
    Pattern(String),
    /// Other generic error
    #[error("An error occurred: {0}")]
    Error(String),
}
