//! Everything a command needs: settings, catalog and apps directory

use crate::catalog::{Catalog, CatalogError};
use crate::settings::{Settings, SettingsError, build_catalog, load_settings};
use crate::storage::paths;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Context {
    pub settings: Settings,
    pub catalog: Catalog,
    /// Definitions left out of the catalog because they failed validation
    pub rejected: Vec<CatalogError>,
    pub apps_dir: PathBuf,
}

impl Context {
    pub fn load(
        config: Option<&Path>,
        catalog_files: &[PathBuf],
        apps_dir: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let settings_path = config.map_or_else(paths::settings_path, Path::to_path_buf);
        let settings = load_settings(&settings_path)?;
        let (catalog, rejected) = build_catalog(&settings, catalog_files)?;
        let apps_dir = settings.apps_dir(apps_dir);

        Ok(Self {
            settings,
            catalog,
            rejected,
            apps_dir,
        })
    }
}
