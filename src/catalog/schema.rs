//! Catalog schema definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between application name and version in install directory names
/// (`firefox-128.0`). Application names must never contain it.
pub const NAME_VERSION_SEPARATOR: char = '-';

/// Download extension used when none can be inferred from the URL
pub const DEFAULT_DOWNLOAD_EXTENSION: &str = ".zip";

/// URLs starting with this prefix are resolved by hand later on
pub const MANUAL_URL_PREFIX: &str = "manual";

/// Extraction pattern used when a definition lists none
pub const MATCH_ALL_PATTERN: &str = "(.*)";

/// One portable application the catalog knows how to manage.
/// JSON catalogs may spell fields in PascalCase (`ApplicationName`, `DownloadUrl`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDefinition {
    #[serde(default, alias = "ApplicationName")]
    pub application_name: String,
    /// Fixed version to install
    #[serde(default, alias = "Version")]
    pub version: Option<String>,
    #[serde(default, alias = "VersionCheck")]
    pub version_check: Option<VersionCheck>,
    /// Name of the symlink pointing at the active version (defaults to the app name)
    #[serde(default, alias = "Symlink")]
    pub symlink: Option<String>,
    #[serde(default, alias = "Shortcut")]
    pub shortcut: Option<String>,
    #[serde(default, alias = "ShortcutIcon")]
    pub shortcut_icon: Option<String>,
    #[serde(default, alias = "DownloadUrl")]
    pub download_url: String,
    #[serde(default, alias = "DownloadExtension")]
    pub download_extension: Option<String>,
    /// Archive entries to extract; joined into a single alternation
    #[serde(default, alias = "ExtractRegExList")]
    pub extract_regex_list: Vec<String>,
    #[serde(default, alias = "CreateFolders")]
    pub create_folders: Vec<String>,
    /// Relative path -> file content
    #[serde(default, alias = "CreateFiles")]
    pub create_files: BTreeMap<String, String>,
    /// Source -> destination, relative to the version directory
    #[serde(default, alias = "MoveObjects")]
    pub move_objects: BTreeMap<String, String>,
    /// Files copied over from the previously symlinked version after an upgrade
    #[serde(default, alias = "RestoreFiles")]
    pub restore_files: Vec<String>,
}

/// Remote lookup of the latest available version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionCheck {
    #[serde(default, alias = "Url")]
    pub url: String,
    /// First capture group holds the version
    #[serde(default, alias = "RegEx")]
    pub regex: String,
    #[serde(default, alias = "UseLatestVersion")]
    pub use_latest_version: bool,
}

impl AppDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            application_name: name.into(),
            ..Default::default()
        }
    }

    /// Fixed version, if one is configured
    pub fn fixed_version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    pub fn symlink_name(&self) -> &str {
        non_empty(self.symlink.as_deref()).unwrap_or(&self.application_name)
    }

    pub fn version_check_url(&self) -> Option<&str> {
        self.version_check
            .as_ref()
            .and_then(|check| non_empty(Some(check.url.as_str())))
    }

    /// URL and regex, only when both are usable
    pub fn remote_version_lookup(&self) -> Option<(&str, &str)> {
        let check = self.version_check.as_ref()?;
        if check.url.is_empty() || check.regex.is_empty() {
            return None;
        }
        Some((&check.url, &check.regex))
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// TOML catalog layout: `[apps.<name>]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsTable {
    #[serde(default)]
    pub apps: BTreeMap<String, AppDefinition>,
}

/// JSON catalog layout, as embedded in release builds: `{"apps": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsList {
    #[serde(default)]
    pub apps: Vec<AppDefinition>,
}
