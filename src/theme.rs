//! Theme normalization and CSS variable derivation.
//!
//! Theme payloads arrive in two shapes, depending on which service produced
//! them: associative maps, or row lists straight from the settings tables.
//! Both normalize into one [`Theme`] with a deterministic CSS variable set.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Known color keys and their fixed CSS variable names.
const COLOR_VARS: [(&str, &str); 17] = [
    ("primary_color", "--primary-color"),
    ("primary_hover", "--primary-hover"),
    ("secondary_color", "--secondary-color"),
    ("accent_color", "--accent-color"),
    ("background_main", "--background-main"),
    ("background_secondary", "--background-secondary"),
    ("text_primary", "--text-primary"),
    ("text_secondary", "--text-secondary"),
    ("border_color", "--border-color"),
    ("success_color", "--success-color"),
    ("danger_color", "--danger-color"),
    // alias: some themes use error_color
    ("error_color", "--danger-color"),
    ("warning_color", "--warning-color"),
    ("info_color", "--info-color"),
    ("card_bg", "--card-bg"),
    ("input_bg", "--input-bg"),
    ("thead_bg", "--thead-bg"),
];

/// Fallback palette for variables the theme did not provide.
const DEFAULT_VARS: [(&str, &str); 18] = [
    ("--primary-color", "#3B82F6"),
    ("--primary-hover", "#2563EB"),
    ("--secondary-color", "#64748b"),
    ("--accent-color", "#F59E0B"),
    ("--background-main", "#0a0f1e"),
    ("--background-secondary", "#0f1724"),
    ("--text-primary", "#ffffff"),
    ("--text-secondary", "#94a3b8"),
    ("--border-color", "#263044"),
    ("--danger-color", "#ef4444"),
    ("--success-color", "#22c55e"),
    ("--warning-color", "#f59e0b"),
    ("--info-color", "#3b82f6"),
    ("--card-bg", "#081127"),
    ("--input-bg", "#0b1220"),
    ("--thead-bg", "#061021"),
    ("--font-size", "14px"),
    ("--header-height", "64px"),
];

const DEFAULT_FONT_STACK: &str =
    "\"Inter\", system-ui, -apple-system, \"Segoe UI\", Roboto, Arial";

/// One color row from the settings table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorRow {
    #[serde(alias = "key")]
    pub setting_key: String,
    #[serde(alias = "value")]
    pub color_value: String,
}

/// Color settings in either payload shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ColorSettings {
    Rows(Vec<ColorRow>),
    Map(BTreeMap<String, String>),
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self::Map(BTreeMap::new())
    }
}

impl ColorSettings {
    fn entries(&self) -> Vec<(String, String)> {
        match self {
            Self::Rows(rows) => rows
                .iter()
                .map(|row| (row.setting_key.clone(), row.color_value.clone()))
                .collect(),
            Self::Map(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }
}

/// One font entry: a settings row or a bare family name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FontEntry {
    Row(FontRow),
    Family(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FontRow {
    #[serde(alias = "value")]
    pub font_family: String,
    #[serde(default, alias = "url")]
    pub font_url: Option<String>,
    #[serde(default = "default_font_category", alias = "type")]
    pub category: String,
}

fn default_font_category() -> String {
    "body".to_string()
}

/// Button style row, keyed by variant name ("primary", ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonStyle {
    pub background_color: String,
    pub text_color: String,
    pub hover_background_color: String,
}

/// Raw theme payload as provided by the session service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemePayload {
    pub colors: ColorSettings,
    pub designs: BTreeMap<String, Value>,
    pub fonts: Vec<FontEntry>,
    pub buttons: BTreeMap<String, ButtonStyle>,
    pub slug: Option<String>,
}

/// Normalized theme ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    css_vars: BTreeMap<String, String>,
    font_links: Vec<String>,
    slug: Option<String>,
}

impl Theme {
    /// Normalizes a payload: maps known color keys to fixed variables,
    /// exports designs as `--theme-*`, picks body and heading font families
    /// (first match per category wins), and fills the default palette.
    #[must_use]
    pub fn from_payload(payload: &ThemePayload) -> Self {
        let mut css_vars = BTreeMap::new();

        for (key, value) in payload.colors.entries() {
            let key = key.to_lowercase();
            match COLOR_VARS.iter().find(|(color_key, _)| *color_key == key) {
                Some((_, var)) => {
                    css_vars.insert((*var).to_string(), value);
                }
                None => {
                    css_vars.insert(format!("--theme-{}", sanitize(&key)), value);
                }
            }
        }

        for (key, value) in &payload.designs {
            let safe = sanitize(key);
            let rendered = design_value(value);
            if let Some(alias) = match safe.as_str() {
                "header_height" => Some("--header-height"),
                "container_width" => Some("--container-width"),
                "logo_url" => Some("--logo-url"),
                _ => None,
            } {
                css_vars.insert(alias.to_string(), rendered.clone());
            }
            css_vars.insert(format!("--theme-{safe}"), rendered);
        }

        for entry in &payload.fonts {
            let (family, category) = match entry {
                FontEntry::Row(row) => (row.font_family.as_str(), row.category.as_str()),
                FontEntry::Family(family) => (family.as_str(), "body"),
            };
            let var = match category.to_lowercase().as_str() {
                "body" | "main" | "primary" | "default" => "--body-font-family",
                "heading" | "title" | "header" => "--heading-font-family",
                _ => continue,
            };
            css_vars.entry(var.to_string()).or_insert_with(|| family.to_string());
        }

        if let Some(primary) = payload.buttons.get("primary") {
            css_vars.insert("--btn-primary-bg".to_string(), primary.background_color.clone());
            css_vars.insert("--btn-primary-text".to_string(), primary.text_color.clone());
            css_vars
                .insert("--btn-primary-hover".to_string(), primary.hover_background_color.clone());
        }

        for (var, default) in DEFAULT_VARS {
            css_vars.entry(var.to_string()).or_insert_with(|| default.to_string());
        }
        let body_font = css_vars
            .get("--body-font-family")
            .cloned()
            .unwrap_or_else(|| DEFAULT_FONT_STACK.to_string());
        css_vars.entry("--body-font-family".to_string()).or_insert_with(|| body_font.clone());
        css_vars.entry("--heading-font-family".to_string()).or_insert(body_font);

        let font_links = collect_font_links(&payload.fonts);
        let slug = payload.slug.as_deref().map(sanitize);

        Self { css_vars, font_links, slug }
    }

    #[must_use]
    pub const fn css_variables(&self) -> &BTreeMap<String, String> {
        &self.css_vars
    }

    #[must_use]
    pub fn font_links(&self) -> &[String] {
        &self.font_links
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

/// Replaces everything outside `[A-Za-z0-9_-]` with a dash.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
        .collect()
}

/// Bare integers are pixel sizes; everything else passes through.
fn design_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => format!("{n}px"),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Explicit URLs first; families without one synthesize a Google Fonts
/// link when the first family token is plain enough. Duplicates collapse.
fn collect_font_links(fonts: &[FontEntry]) -> Vec<String> {
    let mut links = Vec::new();
    for entry in fonts {
        let link = match entry {
            FontEntry::Row(row) => match &row.font_url {
                Some(url) if !url.is_empty() => Some(url.clone()),
                _ => google_font_link(&row.font_family),
            },
            FontEntry::Family(family) => google_font_link(family),
        };
        if let Some(link) = link
            && !links.contains(&link)
        {
            links.push(link);
        }
    }
    links
}

fn google_font_link(family: &str) -> Option<String> {
    let first = family.split(',').next()?.trim().trim_matches(['"', '\'']);
    if first.is_empty()
        || !first.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return None;
    }
    Some(format!(
        "https://fonts.googleapis.com/css2?family={}&display=swap",
        first.replace(' ', "+")
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn payload_from(value: serde_json::Value) -> ThemePayload {
        serde_json::from_value(value).unwrap()
    }

    #[googletest::test]
    fn colors_accept_associative_map() {
        let payload = payload_from(json!({
            "colors": { "primary_color": "#123456", "mystery_key": "#abcdef" }
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(
            theme.css_variables().get("--primary-color"),
            some(eq(&"#123456".to_string()))
        );
        expect_that!(
            theme.css_variables().get("--theme-mystery_key"),
            some(eq(&"#abcdef".to_string()))
        );
    }

    #[googletest::test]
    fn colors_accept_row_list() {
        let payload = payload_from(json!({
            "colors": [
                { "setting_key": "primary_color", "color_value": "#ff0000" },
                { "key": "border_color", "value": "#00ff00" }
            ]
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(
            theme.css_variables().get("--primary-color"),
            some(eq(&"#ff0000".to_string()))
        );
        expect_that!(
            theme.css_variables().get("--border-color"),
            some(eq(&"#00ff00".to_string()))
        );
    }

    #[googletest::test]
    fn error_color_aliases_to_danger() {
        let payload = payload_from(json!({
            "colors": { "error_color": "#990000" }
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(
            theme.css_variables().get("--danger-color"),
            some(eq(&"#990000".to_string()))
        );
    }

    #[googletest::test]
    fn integer_design_values_get_px_suffix() {
        let payload = payload_from(json!({
            "designs": { "header_height": 72, "logo_url": "/img/logo.svg" }
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(theme.css_variables().get("--header-height"), some(eq(&"72px".to_string())));
        expect_that!(
            theme.css_variables().get("--theme-header_height"),
            some(eq(&"72px".to_string()))
        );
        expect_that!(
            theme.css_variables().get("--logo-url"),
            some(eq(&"/img/logo.svg".to_string()))
        );
    }

    #[googletest::test]
    fn first_font_per_category_wins() {
        let payload = payload_from(json!({
            "fonts": [
                { "font_family": "Inter", "category": "body" },
                { "font_family": "Roboto", "category": "body" },
                { "font_family": "Merriweather", "category": "heading" }
            ]
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(
            theme.css_variables().get("--body-font-family"),
            some(eq(&"Inter".to_string()))
        );
        expect_that!(
            theme.css_variables().get("--heading-font-family"),
            some(eq(&"Merriweather".to_string()))
        );
    }

    #[googletest::test]
    fn font_links_synthesize_and_dedupe() {
        let payload = payload_from(json!({
            "fonts": [
                { "font_family": "Open Sans", "category": "body" },
                { "font_family": "Open Sans", "category": "heading" },
                { "font_family": "Custom", "font_url": "https://fonts.example/custom.css" }
            ]
        }));

        let theme = Theme::from_payload(&payload);

        assert_that!(
            theme.font_links(),
            elements_are![
                eq("https://fonts.googleapis.com/css2?family=Open+Sans&display=swap"),
                eq("https://fonts.example/custom.css")
            ]
        );
    }

    #[googletest::test]
    fn empty_payload_still_emits_default_palette() {
        let theme = Theme::from_payload(&ThemePayload::default());

        expect_that!(
            theme.css_variables().get("--primary-color"),
            some(eq(&"#3B82F6".to_string()))
        );
        expect_that!(theme.css_variables().get("--header-height"), some(eq(&"64px".to_string())));
        expect_that!(theme.css_variables().contains_key("--body-font-family"), eq(true));
        expect_that!(theme.font_links(), is_empty());
    }

    #[googletest::test]
    fn button_styles_map_to_variables() {
        let payload = payload_from(json!({
            "buttons": {
                "primary": {
                    "background_color": "#111111",
                    "text_color": "#ffffff",
                    "hover_background_color": "#222222"
                }
            }
        }));

        let theme = Theme::from_payload(&payload);

        expect_that!(
            theme.css_variables().get("--btn-primary-bg"),
            some(eq(&"#111111".to_string()))
        );
        expect_that!(
            theme.css_variables().get("--btn-primary-hover"),
            some(eq(&"#222222".to_string()))
        );
    }

    #[rstest]
    #[case("dark mode!", "dark-mode-")]
    #[case("ok_slug-1", "ok_slug-1")]
    fn slug_is_sanitized(#[case] raw: &str, #[case] expected: &str) {
        let payload = ThemePayload { slug: Some(raw.to_string()), ..ThemePayload::default() };

        let theme = Theme::from_payload(&payload);

        assert_that!(theme.slug(), some(eq(expected)));
    }
}
