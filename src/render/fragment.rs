//! Descriptor-driven fragment rendering.
//!
//! The original admin panel repeated one page skeleton across dozens of
//! near-identical files. Here each page is a [`FragmentSpec`] and a single
//! renderer produces the markup.

use crate::auth::{
    CapabilitySnapshot,
    PageGate,
};
use crate::config::RendererSettings;
use crate::ir::strings::StringTable;
use crate::render::bootstrap::{
    render_bootstrap,
    render_module_init,
};
use crate::render::html::escape;
use crate::request::RequestContext;

/// One table column: i18n key suffix plus the baked-in default label.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub default: &'static str,
}

/// One form field of the edit form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label_key: &'static str,
    pub label_default: &'static str,
    pub placeholder_key: &'static str,
    pub placeholder_default: &'static str,
    pub required: bool,
}

/// Static description of one admin page.
#[derive(Debug, Clone, Copy)]
pub struct FragmentSpec {
    /// Page id used in requests, asset paths, and i18n key prefixes.
    pub id: &'static str,

    /// DOM id of the container element (e.g. "adminRoles").
    pub container_id: &'static str,

    /// Prefix for element ids (e.g. "roles" gives "rolesSearch").
    pub dom_prefix: &'static str,

    /// Global the page's JavaScript module registers under.
    pub js_module: &'static str,

    /// Name of the global carrying the API path (e.g. "API_ROLES").
    pub api_global: &'static str,

    pub api_path: &'static str,

    /// Catalog directory under the languages dir (e.g. "role_permissions").
    pub translation_dir: &'static str,

    pub title_default: &'static str,

    pub new_label_default: &'static str,

    pub no_permission_default: &'static str,

    pub columns: &'static [ColumnSpec],

    pub fields: &'static [FieldSpec],

    pub gate: PageGate,
}

impl FragmentSpec {
    /// Full i18n key for a page-local suffix.
    #[must_use]
    pub fn key(&self, suffix: &str) -> String {
        format!("{}.{suffix}", self.id)
    }

    #[must_use]
    pub fn css_path(&self, settings: &RendererSettings) -> String {
        settings.assets.css_template.replace("{page}", self.id)
    }

    #[must_use]
    pub fn js_path(&self, settings: &RendererSettings) -> String {
        settings.assets.js_template.replace("{page}", self.id)
    }
}

/// Renders the fragment body: meta, theme variables, toolbar, table, form,
/// and client bootstrap.
#[must_use]
pub fn render_fragment(
    spec: &FragmentSpec,
    context: &RequestContext,
    capabilities: CapabilitySnapshot,
    strings: &StringTable,
    settings: &RendererSettings,
) -> String {
    let mut out = String::new();
    let css_path = spec.css_path(settings);
    let js_path = spec.js_path(settings);
    let is_fragment = context.kind.is_fragment();

    if is_fragment {
        // Standalone loads pull the stylesheet in through document chrome.
        out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape(&css_path)));
    }

    out.push_str(&format!(
        "<meta data-page=\"{id}\" \
         data-i18n-files=\"{i18n}\" \
         data-assets-css=\"{css}\" \
         data-assets-js=\"{js}\">\n",
        id = escape(spec.id),
        i18n = escape(&format!(
            "{}/{}/{}.json",
            settings.translation_url_prefix, spec.translation_dir, context.lang
        )),
        css = escape(&css_path),
        js = escape(&js_path),
    ));

    if is_fragment {
        out.push_str(&render_theme_vars(context));
    }

    out.push_str(&render_container(spec, context, capabilities, strings));
    out.push_str(&render_bootstrap(spec, context, capabilities, strings));

    if is_fragment {
        out.push_str(&render_module_init(spec, &js_path));
    }

    out
}

/// `:root` CSS variable block for the current theme.
#[must_use]
pub fn render_theme_vars(context: &RequestContext) -> String {
    let mut out = String::from("<style id=\"theme-vars\">:root {\n");
    for (name, value) in context.theme.css_variables() {
        out.push_str(&format!("  {}: {};\n", escape(name), escape(value)));
    }
    out.push_str("}</style>\n");
    out
}

fn render_container(
    spec: &FragmentSpec,
    context: &RequestContext,
    capabilities: CapabilitySnapshot,
    strings: &StringTable,
) -> String {
    let mut out = String::new();
    let p = spec.dom_prefix;

    out.push_str(&format!(
        "<div id=\"{}\" style=\"max-width:1200px;margin:16px auto;padding:12px\">\n",
        escape(spec.container_id)
    ));
    out.push_str(&format!(
        "<h2>{}</h2>\n",
        escape(&strings.lookup(&spec.key("title"), spec.title_default))
    ));

    if !capabilities.can_manage {
        out.push_str(&format!(
            "<div class=\"alert\">{}</div>\n",
            escape(&strings.lookup(&spec.key("no_permission_notice"), spec.no_permission_default))
        ));
    }

    // Toolbar
    out.push_str("<div class=\"tools\" style=\"display:flex;gap:8px;align-items:center;margin-bottom:10px\">\n");
    out.push_str(&format!(
        "<input id=\"{p}Search\" type=\"search\" placeholder=\"{}\" \
         style=\"flex:1;padding:8px;border:1px solid var(--border-color,#ddd);border-radius:6px\">\n",
        escape(&strings.lookup(&spec.key("search_placeholder"), "Search..."))
    ));
    out.push_str(&format!(
        "<button id=\"{p}Refresh\" class=\"btn primary\">{}</button>\n",
        escape(&strings.lookup(&spec.key("btn_refresh"), "Refresh"))
    ));
    if capabilities.can_manage {
        out.push_str(&format!(
            "<button id=\"{p}New\" class=\"btn primary\">{}</button>\n",
            escape(&strings.lookup(&spec.key("btn_new"), spec.new_label_default))
        ));
    }
    out.push_str("</div>\n");

    let loading = escape(&strings.lookup(&spec.key("loading"), "Loading..."));
    out.push_str(&format!(
        "<div id=\"{p}Status\" class=\"status\" style=\"min-height:22px;margin-bottom:8px\">{loading}</div>\n"
    ));

    // Table
    out.push_str("<div class=\"table-wrap\">\n");
    out.push_str(&format!(
        "<table id=\"{p}Table\" style=\"width:100%;border-collapse:collapse\" dir=\"{}\">\n<thead>\n<tr>\n",
        context.direction.as_str()
    ));
    for column in spec.columns {
        out.push_str(&format!(
            "<th style=\"padding:10px;border-bottom:1px solid var(--border-color,#e5e7eb)\">{}</th>\n",
            escape(&strings.lookup(&spec.key(column.key), column.default))
        ));
    }
    out.push_str(&format!(
        "<th style=\"padding:10px;border-bottom:1px solid var(--border-color,#e5e7eb);text-align:{}\">{}</th>\n",
        context.direction.actions_align(),
        escape(&strings.lookup(&spec.key("table_actions"), "Actions"))
    ));
    out.push_str("</tr>\n</thead>\n");
    out.push_str(&format!(
        "<tbody id=\"{p}Tbody\">\n<tr><td colspan=\"{}\" \
         style=\"padding:12px;text-align:center;color:#666\">{loading}</td></tr>\n</tbody>\n",
        spec.columns.len() + 1
    ));
    out.push_str("</table>\n</div>\n");

    out.push_str(&format!("<div id=\"{p}Pager\" style=\"margin-top:12px\"></div>\n"));

    if capabilities.can_manage {
        out.push_str(&render_form(spec, context, strings));
    }

    out.push_str("</div>\n");
    out
}

fn render_form(spec: &FragmentSpec, context: &RequestContext, strings: &StringTable) -> String {
    let mut out = String::new();
    let p = spec.dom_prefix;

    out.push_str(&format!(
        "<div id=\"{p}FormWrap\" class=\"form-wrap\" style=\"display:none;margin-top:14px;padding:12px;\
         border-radius:8px;border:1px solid var(--border-color,#e5e7eb);background:var(--card-bg,#fff)\">\n"
    ));
    out.push_str(&format!(
        "<h3 id=\"{p}FormTitle\">{}</h3>\n",
        escape(&strings.lookup(&spec.key("form_title"), spec.new_label_default))
    ));
    out.push_str(&format!("<form id=\"{p}Form\" autocomplete=\"off\">\n"));
    out.push_str(&format!("<input type=\"hidden\" id=\"{p}Id\" name=\"id\" value=\"\">\n"));
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\n",
        escape(&context.csrf_token)
    ));
    out.push_str("<div style=\"display:grid;grid-template-columns:1fr 1fr;gap:10px\">\n");

    for field in spec.fields {
        let field_id = format!("{p}{}", camel_case(field.name));
        let required = if field.required { " required" } else { "" };
        let marker = if field.required { " *" } else { "" };
        out.push_str("<div>\n");
        out.push_str(&format!(
            "<label for=\"{field_id}\">{}{marker}</label>\n",
            escape(&strings.lookup(&spec.key(field.label_key), field.label_default))
        ));
        out.push_str(&format!(
            "<input type=\"text\" id=\"{field_id}\" name=\"{}\"{required} placeholder=\"{}\" \
             style=\"width:100%;padding:8px;border:1px solid var(--border-color,#e5e7eb);border-radius:6px\">\n",
            escape(field.name),
            escape(&strings.lookup(&spec.key(field.placeholder_key), field.placeholder_default))
        ));
        out.push_str("</div>\n");
    }

    out.push_str("<div style=\"grid-column:1 / span 2;text-align:right;margin-top:8px\">\n");
    out.push_str(&format!(
        "<button type=\"button\" id=\"{p}Cancel\" class=\"btn\">{}</button>\n",
        escape(&strings.lookup(&spec.key("btn_cancel"), "Cancel"))
    ));
    out.push_str(&format!(
        "<button type=\"submit\" id=\"{p}Save\" class=\"btn primary\">{}</button>\n",
        escape(&strings.lookup(&spec.key("btn_save"), "Save"))
    ));
    out.push_str("</div>\n</div>\n</form>\n</div>\n");

    out
}

/// `key_name` -> `KeyName`, for element ids.
fn camel_case(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect()
}
