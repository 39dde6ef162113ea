pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Load the optional YAML config file; a missing file yields empty input
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    let path = Path::new(config_file);
    if !path.exists() {
        return Ok(ConfigInput::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

impl Config {
    /// Log the settings that identify the target, never the password
    pub fn log_summary(&self) {
        info!("Configuración de base de datos inicializada");
        info!("Host: {}:{}", self.database.host, self.database.port);
        info!("Base de datos: {}", self.database.database);
    }
}
