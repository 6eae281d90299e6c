//! Catalog parsing functions

use super::schema::{AppDefinition, AppsList, AppsTable};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid definition '{name}': {}", .problems.join(", "))]
    ValidationError { name: String, problems: Vec<String> },
}

/// Parse a catalog file, picking the format from its extension
pub fn parse_catalog_file(path: &Path) -> Result<Vec<AppDefinition>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_catalog_toml(&content),
        Some("json") => parse_catalog_json(&content),
        _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Parse `[apps.<name>]` tables
pub fn parse_catalog_toml(content: &str) -> Result<Vec<AppDefinition>, CatalogError> {
    let table: AppsTable = toml::from_str(content)?;
    Ok(named_entries(table.apps))
}

/// Parse the embedded `{"apps": [...]}` layout
pub fn parse_catalog_json(content: &str) -> Result<Vec<AppDefinition>, CatalogError> {
    let list: AppsList = serde_json::from_str(content)?;
    Ok(list.apps)
}

/// Map keys double as application names when the entry does not set one
pub fn named_entries(
    apps: impl IntoIterator<Item = (String, AppDefinition)>,
) -> Vec<AppDefinition> {
    apps.into_iter()
        .map(|(key, mut definition)| {
            if definition.application_name.is_empty() {
                definition.application_name = key;
            } else if definition.application_name != key {
                tracing::warn!(
                    "Catalog key '{}' differs from application name '{}', using the latter",
                    key,
                    definition.application_name
                );
            }
            definition
        })
        .collect()
}
