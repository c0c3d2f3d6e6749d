//! The page registry.
//!
//! Every admin page the renderer knows is a static [`FragmentSpec`] here.
//! Adding a page means adding a descriptor, not a new renderer.

use crate::auth::PageGate;
use crate::render::fragment::{
    ColumnSpec,
    FieldSpec,
    FragmentSpec,
};

/// Looks up a page descriptor by its request id.
#[must_use]
pub fn find(page_id: &str) -> Option<&'static FragmentSpec> {
    PAGES.iter().find(|spec| spec.id == page_id)
}

/// Ids of every registered page, in registry order.
#[must_use]
pub fn page_ids() -> impl Iterator<Item = &'static str> {
    PAGES.iter().map(|spec| spec.id)
}

const fn text_field(
    name: &'static str,
    label_key: &'static str,
    label_default: &'static str,
    placeholder_key: &'static str,
    placeholder_default: &'static str,
    required: bool,
) -> FieldSpec {
    FieldSpec { name, label_key, label_default, placeholder_key, placeholder_default, required }
}

static PAGES: &[FragmentSpec] = &[
    FragmentSpec {
        id: "roles",
        container_id: "adminRoles",
        dom_prefix: "roles",
        js_module: "Roles",
        api_global: "API_ROLES",
        api_path: "/api/roles",
        translation_dir: "role_permissions",
        title_default: "Roles Management",
        new_label_default: "New Role",
        no_permission_default: "You don't have permission to manage roles.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_key_name", default: "Key Name" },
            ColumnSpec { key: "table_display_name", default: "Display Name" },
        ],
        fields: &[
            text_field(
                "key_name",
                "form_key_name",
                "Key Name",
                "form_key_name_placeholder",
                "e.g. editor",
                true,
            ),
            text_field(
                "display_name",
                "form_display_name",
                "Display Name",
                "form_display_name_placeholder",
                "e.g. Editor",
                true,
            ),
        ],
        gate: PageGate {
            manage_permissions: &["manage_roles"],
            view_permissions: &[],
            resource_type: None,
            view_required: false,
        },
    },
    FragmentSpec {
        id: "role_permissions",
        container_id: "adminRolePermissions",
        dom_prefix: "rolePermissions",
        js_module: "RolePermissions",
        api_global: "API_ROLE_PERMISSIONS",
        api_path: "/api/Role_permissions",
        translation_dir: "role_permissions",
        title_default: "Role Permissions",
        new_label_default: "New Assignment",
        no_permission_default: "You don't have permission to manage role permissions.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_role", default: "Role" },
            ColumnSpec { key: "table_permission", default: "Permission" },
        ],
        fields: &[
            text_field("role_id", "form_role", "Role", "form_role_placeholder", "Role id", true),
            text_field(
                "permission_id",
                "form_permission",
                "Permission",
                "form_permission_placeholder",
                "Permission id",
                true,
            ),
        ],
        gate: PageGate {
            manage_permissions: &["manage_role_permissions", "manage_roles"],
            view_permissions: &[],
            resource_type: None,
            view_required: true,
        },
    },
    FragmentSpec {
        id: "queues",
        container_id: "adminQueues",
        dom_prefix: "queues",
        js_module: "Queues",
        api_global: "API_QUEUES",
        api_path: "/api/queues",
        translation_dir: "Queues",
        title_default: "Queues",
        new_label_default: "New Queue",
        no_permission_default: "You don't have permission to manage queues.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_name", default: "Name" },
            ColumnSpec { key: "table_status", default: "Status" },
        ],
        fields: &[
            text_field("name", "form_name", "Name", "form_name_placeholder", "Queue name", true),
            text_field(
                "description",
                "form_description",
                "Description",
                "form_description_placeholder",
                "Optional description",
                false,
            ),
        ],
        gate: PageGate {
            manage_permissions: &["manage_settings"],
            view_permissions: &[],
            resource_type: None,
            view_required: false,
        },
    },
    FragmentSpec {
        id: "stock_movements",
        container_id: "adminStockMovements",
        dom_prefix: "stockMovements",
        js_module: "StockMovements",
        api_global: "API_STOCK_MOVEMENTS",
        api_path: "/api/stock_movements",
        translation_dir: "StockMovements",
        title_default: "Stock Movements",
        new_label_default: "New Movement",
        no_permission_default: "You don't have permission to manage stock movements.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_product", default: "Product" },
            ColumnSpec { key: "table_quantity", default: "Quantity" },
            ColumnSpec { key: "table_type", default: "Type" },
        ],
        fields: &[
            text_field(
                "product_id",
                "form_product",
                "Product",
                "form_product_placeholder",
                "Product id",
                true,
            ),
            text_field(
                "quantity",
                "form_quantity",
                "Quantity",
                "form_quantity_placeholder",
                "e.g. 10",
                true,
            ),
        ],
        gate: PageGate {
            manage_permissions: &["manage_stock", "manage_products"],
            view_permissions: &["view_stock"],
            resource_type: Some("stock_movements"),
            view_required: false,
        },
    },
    FragmentSpec {
        id: "plans",
        container_id: "adminPlans",
        dom_prefix: "plans",
        js_module: "Plans",
        api_global: "API_PLANS",
        api_path: "/api/plans",
        translation_dir: "PlanSelection",
        title_default: "Plans",
        new_label_default: "New Plan",
        no_permission_default: "You don't have permission to manage plans.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_name", default: "Name" },
            ColumnSpec { key: "table_price", default: "Price" },
        ],
        fields: &[
            text_field("name", "form_name", "Name", "form_name_placeholder", "Plan name", true),
            text_field("price", "form_price", "Price", "form_price_placeholder", "e.g. 9.99", true),
        ],
        gate: PageGate {
            manage_permissions: &["manage_plans"],
            view_permissions: &["view_plans"],
            resource_type: None,
            view_required: false,
        },
    },
    FragmentSpec {
        id: "tenants",
        container_id: "adminTenants",
        dom_prefix: "tenants",
        js_module: "Tenants",
        api_global: "API_TENANTS",
        api_path: "/api/tenants",
        translation_dir: "tenant",
        title_default: "Tenants",
        new_label_default: "New Tenant",
        no_permission_default: "You don't have permission to manage tenants.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_name", default: "Name" },
            ColumnSpec { key: "table_domain", default: "Domain" },
            ColumnSpec { key: "table_status", default: "Status" },
        ],
        fields: &[
            text_field("name", "form_name", "Name", "form_name_placeholder", "Tenant name", true),
            text_field(
                "domain",
                "form_domain",
                "Domain",
                "form_domain_placeholder",
                "example.com",
                true,
            ),
        ],
        gate: PageGate {
            manage_permissions: &["manage_tenants"],
            view_permissions: &["view_tenants"],
            resource_type: Some("tenants"),
            view_required: true,
        },
    },
    FragmentSpec {
        id: "vendor_attributes",
        container_id: "adminVendorAttributes",
        dom_prefix: "vendorAttributes",
        js_module: "VendorAttributes",
        api_global: "API_VENDOR_ATTRIBUTES",
        api_path: "/api/vendor_attributes_values",
        translation_dir: "vendors",
        title_default: "Vendor Attributes",
        new_label_default: "New Attribute Value",
        no_permission_default: "You don't have permission to manage vendor attributes.",
        columns: &[
            ColumnSpec { key: "table_id", default: "ID" },
            ColumnSpec { key: "table_attribute", default: "Attribute" },
            ColumnSpec { key: "table_value", default: "Value" },
        ],
        fields: &[
            text_field(
                "attribute_id",
                "form_attribute",
                "Attribute",
                "form_attribute_placeholder",
                "Attribute id",
                true,
            ),
            text_field("value", "form_value", "Value", "form_value_placeholder", "Value", true),
        ],
        gate: PageGate {
            manage_permissions: &["manage_vendors"],
            view_permissions: &["view_vendors"],
            resource_type: Some("vendors"),
            view_required: false,
        },
    },
];
