//! Directory path management for nomad

use std::path::PathBuf;

/// Get the configuration directory (~/.config/nomad)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::APP_NAME)
}

/// Get the default settings file path
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Default directory holding installed apps, relative to the working directory
pub fn default_apps_dir() -> PathBuf {
    PathBuf::from(crate::DEFAULT_APPS_DIR)
}

/// Directory name of one installed version (`<app>-<version>`)
pub fn version_dir_name(app_name: &str, version: &str) -> String {
    format!(
        "{}{}{}",
        app_name,
        crate::catalog::NAME_VERSION_SEPARATOR,
        version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_dir_name_uses_separator() {
        assert_eq!(version_dir_name("vlc", "3.0.21"), "vlc-3.0.21");
    }

    #[test]
    fn settings_live_in_config_dir() {
        assert!(settings_path().starts_with(config_dir()));
        assert!(settings_path().ends_with("settings.toml"));
    }
}
