//! Full document chrome for standalone page loads.

use crate::config::RendererSettings;
use crate::render::fragment::{
    FragmentSpec,
    render_theme_vars,
};
use crate::render::html::escape;
use crate::request::RequestContext;

/// Wraps a fragment body in a complete HTML document: language and
/// direction attributes, theme class, CSRF meta, font links, page assets,
/// and the theme variable block.
#[must_use]
pub fn render_document(
    spec: &FragmentSpec,
    context: &RequestContext,
    settings: &RendererSettings,
    title: &str,
    body: &str,
) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n");
    let theme_class = context
        .theme
        .slug()
        .map(|slug| format!(" class=\"theme-{}\"", escape(slug)))
        .unwrap_or_default();
    out.push_str(&format!(
        "<html lang=\"{}\" dir=\"{}\"{theme_class}>\n<head>\n",
        escape(&context.lang),
        context.direction.as_str(),
    ));
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!(
        "<meta name=\"csrf-token\" content=\"{}\">\n",
        escape(&context.csrf_token)
    ));
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    for link in context.theme.font_links() {
        out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape(link)));
    }
    out.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape(&spec.css_path(settings))
    ));
    out.push_str(&render_theme_vars(context));
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str(&format!(
        "<script src=\"{}\" defer></script>\n",
        escape(&spec.js_path(settings))
    ));
    out.push_str("</body>\n</html>\n");
    out
}
