//! Shared helpers for unit tests.

use crate::auth::CapabilitySnapshot;
use crate::config::RendererSettings;
use crate::request::{
    RequestContext,
    RequestKind,
    UserInfo,
};
use crate::theme::{
    Theme,
    ThemePayload,
};
use crate::types::Direction;

/// A standalone request context for the given language, with a fixed CSRF
/// token and the default theme.
pub fn test_context(lang: &str) -> RequestContext {
    test_context_with_kind(lang, RequestKind::Standalone)
}

pub fn test_context_with_kind(lang: &str, kind: RequestKind) -> RequestContext {
    let settings = RendererSettings::default();
    let direction = if settings.rtl_languages.iter().any(|code| code == lang) {
        Direction::Rtl
    } else {
        Direction::Ltr
    };

    RequestContext {
        kind,
        user: UserInfo { id: 7, username: "tester".to_string(), ..UserInfo::default() },
        lang: lang.to_string(),
        direction,
        tenant_id: 1,
        csrf_token: "tok-123".to_string(),
        theme: Theme::from_payload(&ThemePayload::default()),
    }
}

pub fn manager_capabilities() -> CapabilitySnapshot {
    CapabilitySnapshot {
        can_view: true,
        can_create: true,
        can_edit: true,
        can_delete: true,
        can_manage: true,
    }
}
