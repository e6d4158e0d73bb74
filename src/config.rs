use crate::error::FormError;
use crate::render::RenderOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration, read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub render: RenderOptions,
    /// Handlebars template used for standalone documents
    pub page_template: Option<PathBuf>,
}

/// Where form schemas are fetched from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub path_prefix: String,
    pub extension: String,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            path_prefix: "/forms/".to_string(),
            extension: "jsonc".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// `~/.config/form-render/config.toml` (platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("form-render").join("config.toml"))
    }

    /// Load configuration from an explicit path, or from the default location.
    ///
    /// An explicit path must exist; a missing default file just yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, FormError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::info!("Loading config from: {:?}", path);
        let content = fs::read_to_string(&path)
            .map_err(|e| FormError::Config(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, FormError> {
        toml::from_str(content)
            .map_err(|e| FormError::Config(format!("failed to parse config.toml: {}", e)))
    }
}
