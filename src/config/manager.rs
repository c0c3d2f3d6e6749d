//! Configuration management.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    RendererSettings,
    loader,
};

/// Owns the current renderer settings and the site root they were loaded
/// from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: RendererSettings,

    site_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: RendererSettings::default(), site_root: None }
    }

    /// Loads settings for a site root, falling back to defaults when no
    /// configuration file exists.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for site root: {:?}", site_root);

        let settings = if let Some(root) = &site_root {
            loader::load_from_root(root)?.map_or_else(RendererSettings::default, |loaded| {
                tracing::debug!("Loaded site settings: {:?}", loaded);
                loaded
            })
        } else {
            RendererSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.site_root = site_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings wholesale, e.g. when the front server pushes a
    /// new configuration.
    pub fn update_settings(&mut self, new_settings: RendererSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &RendererSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn site_root(&self) -> Option<&PathBuf> {
        self.site_root.as_ref()
    }

    /// Absolute path of the languages directory for the current settings.
    #[must_use]
    pub fn languages_dir(&self) -> PathBuf {
        let configured = Path::new(&self.current_settings.languages_dir);
        if configured.is_absolute() {
            return configured.to_path_buf();
        }
        self.site_root
            .as_deref()
            .map_or_else(|| configured.to_path_buf(), |root| root.join(configured))
    }
}
