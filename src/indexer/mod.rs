//! Catalog discovery and indexing.

pub mod catalogs;
pub mod types;

pub use catalogs::CatalogIndexer;
pub use types::{
    CatalogKey,
    IndexerError,
};
