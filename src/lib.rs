//! nomad - portable application version manager
//!
//! Works out which version of each portable app is installed, from the
//! `<app>-<version>` directories and symlinks of an apps directory, and what
//! should be installed instead.

pub mod catalog;
pub mod cli;
pub mod settings;
pub mod state;
pub mod storage;
pub mod version;

pub use catalog::{AppDefinition, Catalog};
pub use state::{AppState, AppStates, Status};
pub use storage::paths;
pub use version::Version;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "nomad";

/// User agent sent with version checks
pub const USER_AGENT: &str = concat!("nomad/", env!("CARGO_PKG_VERSION"));

/// Apps directory used when neither settings nor command line name one
pub const DEFAULT_APPS_DIR: &str = "apps";

/// App name selecting every installed app
pub const ALL_APPS: &str = "all";

/// Environment variable holding the GitHub API key
pub const API_KEY_ENV: &str = "NOMAD_GITHUB_API_KEY";
