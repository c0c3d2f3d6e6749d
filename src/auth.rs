//! Permission gate: per-request capability flags.
//!
//! Derived once per request from the session's role list, permission list,
//! and optional resource-permission matrix; discarded with the response.

use serde::{
    Deserialize,
    Serialize,
};

use crate::request::UserInfo;
use crate::types::Capability;

/// Roles that grant full management regardless of permission lists.
const MANAGER_ROLES: [&str; 2] = ["super_admin", "admin"];

/// Legacy owner role id that always grants management.
const OWNER_ROLE_ID: u64 = 1;

/// Resource-level grants for one resource type, as stored by the
/// permissions framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceGrants {
    pub can_view_all: bool,
    pub can_view_own: bool,
    pub can_view_tenant: bool,
    pub can_create: bool,
    pub can_edit_all: bool,
    pub can_edit_own: bool,
    pub can_delete_all: bool,
    pub can_delete_own: bool,
}

impl ResourceGrants {
    #[must_use]
    pub const fn grants_view(self) -> bool {
        self.can_view_all || self.can_view_tenant || self.can_view_own
    }

    #[must_use]
    pub const fn grants_edit(self) -> bool {
        self.can_edit_all || self.can_edit_own
    }

    #[must_use]
    pub const fn grants_delete(self) -> bool {
        self.can_delete_all || self.can_delete_own
    }
}

/// What a page requires from the permission gate.
#[derive(Debug, Clone, Copy)]
pub struct PageGate {
    /// Permissions any one of which grants management
    /// (e.g. `manage_stock` or `manage_products` for stock movements).
    pub manage_permissions: &'static [&'static str],

    /// Permissions that grant read-only access on top of management.
    pub view_permissions: &'static [&'static str],

    /// Resource type consulted in the resource-permission matrix.
    pub resource_type: Option<&'static str>,

    /// When set, users without the view capability get a 403 instead of a
    /// read-only rendering with a notice.
    pub view_required: bool,
}

/// Boolean capability flags for one request. No lifecycle beyond it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySnapshot {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage: bool,
}

impl CapabilitySnapshot {
    /// Derives the flags for a page. Management rules, in order:
    /// owner role id, manager role names, then the page's manage
    /// permissions. Management implies every other capability.
    #[must_use]
    pub fn derive(user: &UserInfo, gate: &PageGate) -> Self {
        let has_permission =
            |name: &str| user.permissions.iter().any(|p| p == name);

        let mut can_manage = user.role_id == Some(OWNER_ROLE_ID);
        if !can_manage {
            can_manage = user.roles.iter().any(|r| MANAGER_ROLES.contains(&r.as_str()));
        }
        if !can_manage {
            can_manage = gate.manage_permissions.iter().any(|p| has_permission(p));
        }

        let grants = gate
            .resource_type
            .and_then(|resource| user.resource_permissions.get(resource))
            .copied()
            .unwrap_or_default();

        let can_view = can_manage
            || gate.view_permissions.iter().any(|p| has_permission(p))
            || grants.grants_view();

        Self {
            can_view,
            can_create: can_manage || grants.can_create,
            can_edit: can_manage || grants.grants_edit(),
            can_delete: can_manage || grants.grants_delete(),
            can_manage,
        }
    }

    #[must_use]
    pub const fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.can_view,
            Capability::Create => self.can_create,
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
            Capability::Manage => self.can_manage,
        }
    }
}
