//! Merging command-line overrides, settings and catalog files

use super::{Settings, SettingsError};
use crate::catalog::{Catalog, CatalogError, named_entries, parse_catalog_file};
use crate::storage::paths;
use std::path::{Path, PathBuf};

impl Settings {
    /// Command line > settings > `./apps`
    pub fn apps_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.apps_directory.clone())
            .unwrap_or_else(paths::default_apps_dir)
    }

    /// Command line (or environment) > settings
    pub fn api_key<'a>(&'a self, cli_override: Option<&'a str>) -> Option<&'a str> {
        cli_override
            .or(self.github_api_key.as_deref())
            .filter(|key| !key.is_empty())
    }
}

/// Validate the inline catalog plus any extra catalog files, in order.
/// Unreadable files are fatal; invalid definitions are only reported.
pub fn build_catalog(
    settings: &Settings,
    catalog_files: &[PathBuf],
) -> Result<(Catalog, Vec<CatalogError>), SettingsError> {
    let mut definitions = named_entries(settings.apps.clone());

    for file in catalog_files {
        tracing::debug!("Loading catalog {}", file.display());
        definitions.extend(parse_catalog_file(file)?);
    }

    let (catalog, rejected) = Catalog::from_definitions(definitions);
    tracing::debug!(
        "Catalog ready: {} valid, {} rejected",
        catalog.len(),
        rejected.len()
    );
    Ok((catalog, rejected))
}
