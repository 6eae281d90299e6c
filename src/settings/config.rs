//! Settings file loading

use crate::catalog::AppDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] crate::catalog::CatalogError),
}

/// Contents of settings.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Apps used when asking for "my apps"
    #[serde(default)]
    pub my_apps: Vec<String>,
    #[serde(default)]
    pub github_api_key: Option<String>,
    #[serde(default)]
    pub apps_directory: Option<PathBuf>,
    /// Inline catalog, same layout as a TOML catalog file
    #[serde(default)]
    pub apps: BTreeMap<String, AppDefinition>,
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        tracing::debug!("No settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<Settings, SettingsError> {
    Ok(toml::from_str(content)?)
}
