//! Renderer configuration: settings types, file loading, and management.

mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    AssetsConfig,
    ConfigError,
    IndexingConfig,
    RendererSettings,
    ValidationError,
};
