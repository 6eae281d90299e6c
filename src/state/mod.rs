//! Installed/desired state reconciliation

mod decide;
mod loader;
mod scan;
mod status;

pub use decide::*;
pub use loader::*;
pub use scan::*;
pub use status::*;

use crate::catalog::ValidDefinition;
use crate::version::{Version, VersionError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Cannot scan {path}: {source}")]
    ScanError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Apps path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Bad forced version format '{input}': {source}")]
    ForcedVersion {
        input: String,
        #[source]
        source: VersionError,
    },
}

/// Application name -> reconciled state
pub type AppStates = BTreeMap<String, AppState>;

/// What is installed for one application, and what should be
#[derive(Debug, Clone)]
pub struct AppState {
    pub definition: Arc<ValidDefinition>,
    /// The current version was found through the app's symlink
    pub symlink_found: bool,
    current_version: Option<Version>,
    /// Directory of the active version
    pub current_version_folder: Option<PathBuf>,
    target_version: Option<Version>,
    status: Status,
}

impl AppState {
    /// Placeholder for an app that is not installed yet
    pub fn not_installed(definition: Arc<ValidDefinition>) -> Self {
        Self {
            definition,
            symlink_found: false,
            current_version: None,
            current_version_folder: None,
            target_version: None,
            status: Status::NotSet,
        }
    }

    pub fn installed(
        definition: Arc<ValidDefinition>,
        version: Version,
        folder: PathBuf,
        symlink_found: bool,
    ) -> Self {
        Self {
            symlink_found,
            current_version: Some(version),
            current_version_folder: Some(folder),
            ..Self::not_installed(definition)
        }
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn is_installed(&self) -> bool {
        self.current_version.is_some()
    }

    pub fn current_version(&self) -> Option<&Version> {
        self.current_version.as_ref()
    }

    /// Replace the installed version; the status is derived again on next use
    pub fn set_current_version(&mut self, version: Option<Version>) {
        self.current_version = version;
        self.status = Status::NotSet;
    }

    pub fn target_version(&self) -> Option<&Version> {
        self.target_version.as_ref()
    }

    /// Set the decided version and derive the status from it
    pub fn set_target_version(&mut self, target: Option<Version>) {
        self.target_version = target;
        self.compute_status();
    }
}
