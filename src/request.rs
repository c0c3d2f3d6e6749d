//! Request envelope and the request-scoped context built from it.
//!
//! The front server forwards each HTTP request as one `RenderRequest` JSON
//! object. Everything a handler needs (user, language, direction, theme,
//! CSRF token) travels in an explicit [`RequestContext`] instead of ambient
//! globals.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::auth::ResourceGrants;
use crate::config::RendererSettings;
use crate::theme::{
    Theme,
    ThemePayload,
};
use crate::types::Direction;

/// How the fragment is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Direct page load; the response carries full document chrome.
    Standalone,
    /// `X-Requested-With: XMLHttpRequest` fetch.
    Ajax,
    /// `embedded` flag set by the dashboard shell.
    Embedded,
}

impl RequestKind {
    /// Fragment requests skip document chrome and bootstrap the page module
    /// themselves.
    #[must_use]
    pub const fn is_fragment(self) -> bool {
        !matches!(self, Self::Standalone)
    }
}

/// Current user as resolved by the external session/auth service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub resource_permissions: std::collections::HashMap<String, ResourceGrants>,
    pub role_id: Option<u64>,
    pub preferred_language: Option<String>,
    pub timezone: String,
    pub is_active: bool,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            id: 0,
            username: "guest".to_string(),
            email: String::new(),
            roles: Vec::new(),
            permissions: Vec::new(),
            resource_permissions: std::collections::HashMap::new(),
            role_id: None,
            preferred_language: None,
            timezone: "UTC".to_string(),
            is_active: false,
        }
    }
}

/// Session data accompanying a request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub user: Option<UserInfo>,
    pub preferred_language: Option<String>,
    pub tenant_id: Option<u64>,
    pub csrf_token: String,
    pub theme: ThemePayload,
}

/// One render request, one JSON object per line on stdin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderRequest {
    /// Page id, e.g. "roles".
    pub page: String,

    /// `embedded` query or form flag.
    pub embedded: bool,

    /// Value of the `X-Requested-With` header, when present.
    pub requested_with: Option<String>,

    pub session: SessionSnapshot,

    /// Base string tree already assembled by the shell, merged under the
    /// page catalog.
    pub strings: Value,
}

impl RenderRequest {
    /// Classifies the request the way the original fragments did: AJAX
    /// header first, then the embedded flag.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        let is_ajax = self
            .requested_with
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"));
        if is_ajax {
            RequestKind::Ajax
        } else if self.embedded {
            RequestKind::Embedded
        } else {
            RequestKind::Standalone
        }
    }
}

/// Request-scoped context passed into every render step.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub kind: RequestKind,
    pub user: UserInfo,
    pub lang: String,
    pub direction: Direction,
    pub tenant_id: u64,
    pub csrf_token: String,
    pub theme: Theme,
}

impl RequestContext {
    /// Builds the context for one request.
    ///
    /// Language preference order: session, then user profile, then the
    /// configured default. Direction derives from the RTL language set.
    #[must_use]
    pub fn build(request: &RenderRequest, settings: &RendererSettings) -> Self {
        let kind = request.kind();
        let user = request.session.user.clone().unwrap_or_default();

        let lang = request
            .session
            .preferred_language
            .clone()
            .or_else(|| user.preferred_language.clone())
            .unwrap_or_else(|| settings.default_language.clone());

        let direction = if settings.rtl_languages.iter().any(|code| code == &lang) {
            Direction::Rtl
        } else {
            Direction::Ltr
        };

        if request.session.csrf_token.is_empty() {
            tracing::warn!("Session provided no CSRF token; forms will carry an empty value");
        }

        Self {
            kind,
            user,
            lang,
            direction,
            tenant_id: request.session.tenant_id.unwrap_or(1),
            csrf_token: request.session.csrf_token.clone(),
            theme: Theme::from_payload(&request.session.theme),
        }
    }
}
