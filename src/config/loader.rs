//! Configuration file loading.

use std::path::Path;

use super::{
    ConfigError,
    RendererSettings,
};

/// Looks for `.admin-ui.json` under the site root and loads it.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no configuration file present
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_root(site_root: &Path) -> Result<Option<RendererSettings>, ConfigError> {
    let config_path = site_root.join(".admin-ui.json");

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: RendererSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
