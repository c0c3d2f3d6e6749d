use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "assets.cssTemplate")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for the fragment render service, loaded from `.admin-ui.json`
/// at the site root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererSettings {
    /// Directory holding `{page}/{language}.json` catalogs, relative to the
    /// site root unless absolute.
    pub languages_dir: String,

    /// Glob selecting catalog files inside `languages_dir`.
    pub catalog_pattern: String,

    pub key_separator: String,

    /// Language used when a catalog is missing for the requested language.
    pub default_language: String,

    /// Languages rendered right-to-left.
    pub rtl_languages: Vec<String>,

    /// URL prefix under which the front server exposes catalogs to the
    /// client (emitted in the page meta element).
    pub translation_url_prefix: String,

    pub assets: AssetsConfig,

    pub indexing: IndexingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetsConfig {
    /// Per-page stylesheet path; `{page}` is replaced with the page id.
    pub css_template: String,

    /// Per-page script path; `{page}` is replaced with the page id.
    pub js_template: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel load count for catalog preloading.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl IndexingConfig {
    /// Effective concurrency for catalog preloading.
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl RendererSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Asset template without a `{page}` placeholder
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.languages_dir.is_empty() {
            errors.push(ValidationError::new(
                "languagesDir",
                "The languages directory cannot be empty. Example: \"languages\"",
            ));
        }

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The default language cannot be empty. Example: \"en\"",
            ));
        }

        if self.catalog_pattern.is_empty() {
            errors.push(ValidationError::new(
                "catalogPattern",
                "The pattern cannot be empty. Example: \"**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.catalog_pattern) {
            errors.push(ValidationError::new(
                "catalogPattern",
                format!("Invalid glob pattern '{}': {e}", self.catalog_pattern),
            ));
        }

        for (field, template) in [
            ("assets.cssTemplate", &self.assets.css_template),
            ("assets.jsTemplate", &self.assets.js_template),
        ] {
            if !template.contains("{page}") {
                errors.push(ValidationError::new(
                    field,
                    format!("Template '{template}' must contain the \"{{page}}\" placeholder"),
                ));
            }
        }

        for (index, code) in self.rtl_languages.iter().enumerate() {
            if code.is_empty() {
                errors.push(ValidationError::new(
                    format!("rtlLanguages[{index}]"),
                    "Language codes cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            languages_dir: "languages".to_string(),
            catalog_pattern: "**/*.json".to_string(),
            key_separator: ".".to_string(),
            default_language: "en".to_string(),
            rtl_languages: ["ar", "fa", "he", "ur"].map(str::to_string).to_vec(),
            translation_url_prefix: "/languages".to_string(),
            assets: AssetsConfig::default(),
            indexing: IndexingConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            css_template: "/admin/assets/css/pages/{page}.css".to_string(),
            js_template: "/admin/assets/js/pages/{page}.js".to_string(),
        }
    }
}
