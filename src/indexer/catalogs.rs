//! Catalog discovery and preloading.
//!
//! Walks the languages directory once at startup and indexes every
//! `{page}/{language}.json` catalog by `(page, language)`.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use futures::StreamExt;
use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use tokio::sync::RwLock;

use crate::config::RendererSettings;
use crate::db::UiDatabase;
use crate::indexer::types::{
    CatalogKey,
    IndexerError,
};
use crate::input::catalog::{
    Catalog,
    load_catalog_file,
};

/// Indexes loaded catalogs by `(page, language)`.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndexer {
    catalogs: Arc<RwLock<HashMap<CatalogKey, Catalog>>>,
}

impl CatalogIndexer {
    #[must_use]
    pub fn new() -> Self {
        Self { catalogs: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Walks `languages_dir` and loads every matching catalog, with bounded
    /// concurrency taken from the indexing settings.
    ///
    /// Unreadable or malformed files are logged and skipped; they count as
    /// absent catalogs.
    ///
    /// # Errors
    /// Returns an error when the catalog glob pattern cannot be compiled.
    pub async fn index_languages_dir(
        &self,
        db: &dyn UiDatabase,
        languages_dir: &Path,
        settings: &RendererSettings,
    ) -> Result<usize, IndexerError> {
        tracing::debug!(languages_dir = %languages_dir.display(), "Indexing catalogs");

        let files = Self::find_catalog_files(languages_dir, &settings.catalog_pattern)?;
        let concurrency = settings.indexing.effective_threads();

        let loaded: Vec<(CatalogKey, Catalog)> = futures::stream::iter(files)
            .map(|(key, path)| async move {
                match load_catalog_file(db, &key.page, &key.language, &path, &settings.key_separator)
                    .await
                {
                    Ok(catalog) => Some((key, catalog)),
                    Err(e) => {
                        tracing::warn!("Skipping catalog {:?}: {e}", path);
                        None
                    }
                }
            })
            .buffer_unordered(concurrency)
            .filter_map(std::future::ready)
            .collect()
            .await;

        let count = loaded.len();
        let mut catalogs = self.catalogs.write().await;
        catalogs.extend(loaded);
        tracing::info!("Indexed {count} translation catalogs");

        Ok(count)
    }

    /// Finds catalog files and derives their `(page, language)` keys.
    ///
    /// The page is the file's parent directory name and the language its
    /// stem; files sitting directly in the languages root have no page and
    /// are skipped.
    fn find_catalog_files(
        languages_dir: &Path,
        pattern: &str,
    ) -> Result<Vec<(CatalogKey, PathBuf)>, IndexerError> {
        let include_set = Self::build_glob_set(pattern)?;

        let mut found = Vec::new();
        for result in WalkBuilder::new(languages_dir)
            .hidden(false)
            .git_ignore(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(languages_dir) else {
                continue;
            };
            if !include_set.is_match(relative_path) {
                continue;
            }

            let Some(key) = Self::catalog_key(languages_dir, path) else {
                tracing::debug!(path = %path.display(), "Catalog outside a page directory, skipping");
                continue;
            };
            found.push((key, path.to_path_buf()));
        }

        Ok(found)
    }

    fn build_glob_set(pattern: &str) -> Result<GlobSet, IndexerError> {
        let glob = Glob::new(pattern)
            .map_err(|e| IndexerError::Pattern(format!("Invalid pattern '{pattern}': {e}")))?;
        let mut builder = GlobSetBuilder::new();
        builder.add(glob);
        builder
            .build()
            .map_err(|e| IndexerError::Pattern(format!("Failed to build pattern set: {e}")))
    }

    fn catalog_key(languages_dir: &Path, path: &Path) -> Option<CatalogKey> {
        let language = path.file_stem()?.to_string_lossy().to_string();
        let parent = path.parent()?;
        if parent == languages_dir {
            return None;
        }
        let page = parent.file_name()?.to_string_lossy().to_string();
        Some(CatalogKey::new(page, language))
    }

    /// Catalog for an exact `(page, language)` pair.
    pub async fn get(&self, page: &str, language: &str) -> Option<Catalog> {
        let catalogs = self.catalogs.read().await;
        catalogs.get(&CatalogKey::new(page, language)).copied()
    }

    /// Catalog for a page with default-language fallback.
    pub async fn resolve(
        &self,
        page: &str,
        language: &str,
        default_language: &str,
    ) -> Option<Catalog> {
        let catalogs = self.catalogs.read().await;
        catalogs
            .get(&CatalogKey::new(page, language))
            .or_else(|| catalogs.get(&CatalogKey::new(page, default_language)))
            .copied()
    }

    /// Registers or replaces a single catalog, e.g. after a reload.
    pub async fn insert(&self, key: CatalogKey, catalog: Catalog) {
        let mut catalogs = self.catalogs.write().await;
        catalogs.insert(key, catalog);
    }
}
