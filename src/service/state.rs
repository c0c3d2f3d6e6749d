//! Shared service state and the per-request render pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::CapabilitySnapshot;
use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::db::UiDatabaseImpl;
use crate::error::RenderError;
use crate::indexer::{
    CatalogIndexer,
    IndexerError,
};
use crate::input::catalog::merge_and_flatten;
use crate::ir::strings::StringTable;
use crate::render::{
    chrome,
    pages,
    render_fragment,
};
use crate::request::{
    RenderRequest,
    RequestContext,
    RequestKind,
};

/// A successfully rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page: String,
    pub status: u16,
    pub body: String,
}

/// Everything the render loop shares across requests.
///
/// Lock order: `db` before `catalogs`. The config manager is only locked on
/// its own.
#[derive(Clone)]
pub struct RendererState {
    pub config_manager: Arc<Mutex<ConfigManager>>,
    pub db: Arc<Mutex<UiDatabaseImpl>>,
    pub catalogs: CatalogIndexer,
}

impl std::fmt::Debug for RendererState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererState")
            .field("config_manager", &"<ConfigManager>")
            .field("db", &"<UiDatabaseImpl>")
            .field("catalogs", &self.catalogs)
            .finish()
    }
}

impl Default for RendererState {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            db: Arc::new(Mutex::new(UiDatabaseImpl::default())),
            catalogs: CatalogIndexer::new(),
        }
    }

    /// Loads settings for a site root.
    ///
    /// # Errors
    /// Propagates configuration read, parse, and validation errors.
    pub async fn load_settings(&self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        self.config_manager.lock().await.load_settings(site_root)
    }

    /// Preloads every catalog under the configured languages directory.
    ///
    /// # Errors
    /// Fails only when the catalog glob pattern is invalid; unreadable
    /// catalogs are logged and skipped.
    pub async fn index_catalogs(&self) -> Result<usize, IndexerError> {
        let (languages_dir, settings) = {
            let manager = self.config_manager.lock().await;
            (manager.languages_dir(), manager.get_settings().clone())
        };
        let db = self.db.lock().await.clone();
        self.catalogs.index_languages_dir(&db, &languages_dir, &settings).await
    }

    /// Renders one request into a page body.
    ///
    /// # Errors
    /// - [`RenderError::UnknownPage`] when the page id is not registered
    /// - [`RenderError::Forbidden`] when the page requires the view
    ///   capability and the user lacks it
    pub async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, RenderError> {
        let settings = self.config_manager.lock().await.get_settings().clone();

        let spec = pages::find(&request.page)
            .ok_or_else(|| RenderError::UnknownPage(request.page.clone()))?;

        let context = RequestContext::build(request, &settings);
        let capabilities = CapabilitySnapshot::derive(&context.user, &spec.gate);

        if spec.gate.view_required && !capabilities.can_view {
            tracing::info!(
                page = spec.id,
                user = context.user.username,
                "Rejecting request without view capability"
            );
            return Err(RenderError::Forbidden { page: request.page.clone() });
        }

        let strings = self.load_strings(spec.translation_dir, &context.lang, request, &settings).await;

        tracing::debug!(
            page = spec.id,
            lang = context.lang,
            kind = ?context.kind,
            can_manage = capabilities.can_manage,
            "Rendering fragment"
        );

        let fragment = render_fragment(spec, &context, capabilities, &strings, &settings);
        let body = if context.kind == RequestKind::Standalone {
            let title = strings.lookup(&spec.key("title"), spec.title_default);
            chrome::render_document(spec, &context, &settings, &title, &fragment)
        } else {
            fragment
        };

        Ok(RenderedPage { page: request.page.clone(), status: 200, body })
    }

    /// Assembles the string table: the preloaded catalog for the page's
    /// translation directory (default-language fallback), with any
    /// request-supplied base strings merged underneath.
    async fn load_strings(
        &self,
        translation_dir: &str,
        lang: &str,
        request: &RenderRequest,
        settings: &crate::config::RendererSettings,
    ) -> StringTable {
        let separator = settings.key_separator.as_str();
        let catalog =
            self.catalogs.resolve(translation_dir, lang, &settings.default_language).await;

        let has_base = request.strings.as_object().is_some_and(|map| !map.is_empty());

        let map = match catalog {
            Some(catalog) => {
                let db = self.db.lock().await;
                if has_base {
                    merge_and_flatten(&request.strings, catalog.json_text(&*db), separator)
                } else {
                    catalog.keys(&*db).clone()
                }
            }
            None => {
                tracing::debug!(translation_dir, lang, "No catalog found for request");
                if has_base {
                    crate::input::catalog::flatten_tree(&request.strings, separator)
                } else {
                    std::collections::HashMap::new()
                }
            }
        };

        StringTable::new(map, separator)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::request::SessionSnapshot;
    use crate::request::UserInfo;

    fn site_with_catalog(page_dir: &str, lang: &str, body: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("languages").join(page_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{lang}.json")), body).unwrap();
        temp_dir
    }

    async fn ready_state(site: &TempDir) -> RendererState {
        let state = RendererState::new();
        state.load_settings(Some(site.path().to_path_buf())).await.unwrap();
        state.index_catalogs().await.unwrap();
        state
    }

    fn admin_request(page: &str) -> RenderRequest {
        RenderRequest {
            page: page.to_string(),
            session: SessionSnapshot {
                user: Some(UserInfo {
                    id: 1,
                    roles: vec!["admin".to_string()],
                    is_active: true,
                    ..UserInfo::default()
                }),
                csrf_token: "tok".to_string(),
                ..SessionSnapshot::default()
            },
            ..RenderRequest::default()
        }
    }

    #[rstest]
    fn render_uses_the_page_catalog() {
        let site = site_with_catalog(
            "role_permissions",
            "en",
            r#"{"strings": {"roles": {"title": "Role Admin"}}}"#,
        );

        let page = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&admin_request("roles")).await
        })
        .unwrap();

        assert_that!(page.status, eq(200));
        assert_that!(page.body, contains_substring("<h2>Role Admin</h2>"));
        assert_that!(page.body, contains_substring("<!DOCTYPE html>"));
    }

    #[rstest]
    fn unknown_page_is_a_404() {
        let site = TempDir::new().unwrap();

        let result = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&admin_request("definitely_not_a_page")).await
        });

        let err = result.unwrap_err();
        assert_that!(err.status(), eq(404));
    }

    #[rstest]
    fn view_required_page_rejects_guests() {
        let site = TempDir::new().unwrap();
        let request = RenderRequest { page: "tenants".to_string(), ..RenderRequest::default() };

        let result = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&request).await
        });

        let err = result.unwrap_err();
        assert_that!(err.status(), eq(403));
    }

    #[rstest]
    fn guest_still_sees_notice_pages() {
        let site = TempDir::new().unwrap();
        let request = RenderRequest { page: "roles".to_string(), ..RenderRequest::default() };

        let page = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&request).await
        })
        .unwrap();

        assert_that!(page.status, eq(200));
        assert_that!(page.body, contains_substring("class=\"alert\""));
    }

    #[rstest]
    fn request_strings_merge_under_the_catalog() {
        let site = site_with_catalog(
            "role_permissions",
            "en",
            r#"{"roles": {"title": "From Catalog"}}"#,
        );
        let mut request = admin_request("roles");
        request.strings = serde_json::json!({
            "roles": { "title": "From Shell", "btn_new": "Add Role" }
        });

        let page = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&request).await
        })
        .unwrap();

        // Catalog wins on collisions; shell-only keys survive.
        assert_that!(page.body, contains_substring("<h2>From Catalog</h2>"));
        assert_that!(page.body, contains_substring("Add Role"));
    }

    #[rstest]
    fn missing_catalog_falls_back_to_baked_defaults() {
        let site = TempDir::new().unwrap();

        let page = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&admin_request("queues")).await
        })
        .unwrap();

        assert_that!(page.body, contains_substring("<h2>Queues</h2>"));
    }

    #[rstest]
    fn embedded_request_skips_document_chrome() {
        let site = TempDir::new().unwrap();
        let mut request = admin_request("roles");
        request.embedded = true;

        let page = tokio_test::block_on(async {
            let state = ready_state(&site).await;
            state.render(&request).await
        })
        .unwrap();

        assert_that!(page.body, not(contains_substring("<!DOCTYPE html>")));
        assert_that!(page.body, contains_substring("<link rel=\"stylesheet\""));
    }
}
