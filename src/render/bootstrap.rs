//! Client bootstrap: the global configuration blob and the module-init
//! script that the page's JavaScript consumes.

use serde_json::json;

use crate::auth::CapabilitySnapshot;
use crate::ir::strings::StringTable;
use crate::render::fragment::FragmentSpec;
use crate::render::html::json_for_script;
use crate::request::RequestContext;

/// Renders the `<script>` block assigning the global configuration object.
#[must_use]
pub fn render_bootstrap(
    spec: &FragmentSpec,
    context: &RequestContext,
    capabilities: CapabilitySnapshot,
    strings: &StringTable,
) -> String {
    let admin_ui = json!({
        "user": context.user,
        "lang": context.lang,
        "direction": context.direction,
        "tenant_id": context.tenant_id,
        "capabilities": {
            "can_view": capabilities.can_view,
            "can_create": capabilities.can_create,
            "can_edit": capabilities.can_edit,
            "can_delete": capabilities.can_delete,
            "can_manage": capabilities.can_manage,
        },
        "theme": {
            "slug": context.theme.slug(),
            "css_vars": context.theme.css_variables(),
        },
    });

    format!(
        "<script>\n\
         window.ADMIN_UI = {admin_ui} || {{}};\n\
         window.I18N_FLAT = {flat} || {{}};\n\
         window.USER_INFO = window.ADMIN_UI.user || {{}};\n\
         window.THEME = window.ADMIN_UI.theme || {{}};\n\
         window.CSRF_TOKEN = {csrf};\n\
         window.{api_global} = {api_path};\n\
         window.DIRECTION = {direction};\n\
         </script>\n",
        admin_ui = json_for_script(&admin_ui),
        flat = json_for_script(strings.flat()),
        csrf = json_for_script(&context.csrf_token),
        api_global = spec.api_global,
        api_path = json_for_script(&spec.api_path),
        direction = json_for_script(&context.direction.as_str()),
    )
}

/// Renders the fragment-mode script include and the polling loop that waits
/// for the page module before calling its `init()`.
#[must_use]
pub fn render_module_init(spec: &FragmentSpec, js_path: &str) -> String {
    format!(
        "<script src=\"{js_path}\"></script>\n\
         <script>\n\
         (function() {{\n\
             let attempts = 0;\n\
             const check = setInterval(function() {{\n\
                 attempts++;\n\
                 if (window.{module} && typeof window.{module}.init === 'function') {{\n\
                     clearInterval(check);\n\
                     Promise.resolve(window.{module}.init()).catch(function(err) {{\n\
                         console.error('[{page}] init failed', err);\n\
                     }});\n\
                 }} else if (attempts > 30) {{\n\
                     clearInterval(check);\n\
                     console.error('[{page}] module did not load');\n\
                 }}\n\
             }}, 200);\n\
         }})();\n\
         </script>\n",
        module = spec.js_module,
        page = spec.id,
    )
}
