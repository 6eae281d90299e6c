//! Target version selection

use super::{AppStates, StateError};
use crate::catalog::ValidDefinition;
use crate::storage::{VersionSource, fetch_latest_version};
use crate::version::Version;
use tracing::{debug, error};

/// Decide the target version and status of every app.
///
/// A malformed forced version rejects the whole batch before anything is
/// touched. Everything else (bad catalog version, failed remote lookup) only
/// degrades the app concerned.
pub fn determine_possible_actions(
    states: &mut AppStates,
    forced_version: Option<&str>,
    use_latest_version: bool,
    api_key: Option<&str>,
    source: &dyn VersionSource,
) -> Result<(), StateError> {
    let forced = validate_forced_version(forced_version)?;

    for (app_name, state) in states.iter_mut() {
        let span = tracing::info_span!("app", name = %app_name);
        let _enter = span.enter();

        let definition = &state.definition;
        let config_version = catalog_version(definition);
        debug!("Version from config: {:?}", config_version.as_ref().map(ToString::to_string));
        debug!(
            "Version installed: {:?}",
            state.current_version().map(ToString::to_string)
        );

        let remote = if use_latest_version && forced.is_none() {
            remote_version(definition, api_key, source)
        } else {
            None
        };

        let target = select_target_version(
            forced.as_ref(),
            state.current_version(),
            config_version.as_ref(),
            remote.as_ref(),
        );
        state.set_target_version(target);
        debug!("Status: {}", state.status());
    }

    Ok(())
}

/// Forced > remote (if newer than catalog and current) > catalog (if newer
/// than current) > current. Absent versions rank below any real one.
pub fn select_target_version(
    forced: Option<&Version>,
    current: Option<&Version>,
    config: Option<&Version>,
    remote: Option<&Version>,
) -> Option<Version> {
    if let Some(forced) = forced {
        return Some(forced.clone());
    }

    let chosen = match current {
        None => {
            if newer(remote, config) {
                remote
            } else {
                config
            }
        }
        Some(current) => {
            if newer(remote, config) && newer(remote, Some(current)) {
                remote
            } else if newer(config, Some(current)) {
                config
            } else {
                Some(current)
            }
        }
    };
    chosen.cloned()
}

fn newer(candidate: Option<&Version>, than: Option<&Version>) -> bool {
    match (candidate, than) {
        (Some(candidate), Some(than)) => candidate.is_newer_than(than),
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn validate_forced_version(input: Option<&str>) -> Result<Option<Version>, StateError> {
    let Some(text) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match Version::parse(text) {
        Ok(version) => {
            debug!("Version from command line: {}", version);
            Ok(Some(version))
        }
        Err(source) => {
            error!("Bad forced version format: {} | {}", text, source);
            Err(StateError::ForcedVersion {
                input: text.to_string(),
                source,
            })
        }
    }
}

fn catalog_version(definition: &ValidDefinition) -> Option<Version> {
    let text = definition.definition().fixed_version()?;
    match Version::parse(text) {
        Ok(version) => Some(version),
        Err(e) => {
            error!("Bad version format in config: {} | {}", text, e);
            None
        }
    }
}

fn remote_version(
    definition: &ValidDefinition,
    api_key: Option<&str>,
    source: &dyn VersionSource,
) -> Option<Version> {
    let (url, pattern) = definition.definition().remote_version_lookup()?;

    let text = match fetch_latest_version(source, url, pattern, api_key) {
        Ok(text) => text,
        Err(e) => {
            error!("Error retrieving last version from remote: {}", e);
            return None;
        }
    };

    match Version::parse(&text) {
        Ok(version) => {
            debug!("Version from remote: {}", version);
            Some(version)
        }
        Err(e) => {
            error!("Bad version format from remote: {} | {}", text, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AppDefinition, VersionCheck, validate_and_set_defaults};
    use crate::state::{AppState, Status};
    use crate::storage::DownloadError;
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Serves one page and counts how often it was asked for
    struct CountingSource {
        page: &'static str,
        fetches: Cell<usize>,
    }

    impl CountingSource {
        fn new(page: &'static str) -> Self {
            Self {
                page,
                fetches: Cell::new(0),
            }
        }
    }

    impl VersionSource for CountingSource {
        fn fetch(&self, _url: &str, _api_key: Option<&str>) -> Result<String, DownloadError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.page.to_string())
        }
    }

    fn vlc_installed(current: &str) -> AppStates {
        let def = validate_and_set_defaults(AppDefinition {
            version: Some("1.0".into()),
            version_check: Some(VersionCheck {
                url: "https://get.videolan.org/vlc/".into(),
                regex: r"v=([\d.]+);".into(),
                use_latest_version: true,
            }),
            ..AppDefinition::new("vlc")
        })
        .unwrap();
        let mut states = AppStates::new();
        states.insert(
            "vlc".into(),
            AppState::installed(
                Arc::new(def),
                v(current),
                PathBuf::from(format!("apps/vlc-{}", current)),
                false,
            ),
        );
        states
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn pick(
        forced: Option<&str>,
        current: Option<&str>,
        config: Option<&str>,
        remote: Option<&str>,
    ) -> Option<String> {
        let (forced, current, config, remote) =
            (forced.map(v), current.map(v), config.map(v), remote.map(v));
        select_target_version(
            forced.as_ref(),
            current.as_ref(),
            config.as_ref(),
            remote.as_ref(),
        )
        .map(|version| version.to_string())
    }

    #[test]
    fn forced_version_always_wins() {
        assert_eq!(pick(Some("1.2"), Some("1.5"), Some("1.0"), Some("2.0")).as_deref(), Some("1.2"));
        assert_eq!(pick(Some("0.1"), None, Some("1.0"), None).as_deref(), Some("0.1"));
    }

    #[test]
    fn not_installed_prefers_newer_remote() {
        assert_eq!(pick(None, None, Some("1.0"), Some("2.0")).as_deref(), Some("2.0"));
        assert_eq!(pick(None, None, Some("3.0"), Some("2.0")).as_deref(), Some("3.0"));
        assert_eq!(pick(None, None, Some("1.0"), None).as_deref(), Some("1.0"));
        assert_eq!(pick(None, None, None, Some("2.0")).as_deref(), Some("2.0"));
        assert_eq!(pick(None, None, None, None), None);
    }

    #[test]
    fn installed_only_moves_forward_on_its_own() {
        // remote newer than both
        assert_eq!(pick(None, Some("1.5"), Some("1.0"), Some("2.0")).as_deref(), Some("2.0"));
        // remote newer than catalog but not than current
        assert_eq!(pick(None, Some("2.5"), Some("1.0"), Some("2.0")).as_deref(), Some("2.5"));
        // catalog newer than current
        assert_eq!(pick(None, Some("1.0"), Some("1.1"), None).as_deref(), Some("1.1"));
        // catalog older than current: keep
        assert_eq!(pick(None, Some("1.5"), Some("1.0"), None).as_deref(), Some("1.5"));
        // remote older than catalog: catalog decides
        assert_eq!(pick(None, Some("1.0"), Some("3.0"), Some("2.0")).as_deref(), Some("3.0"));
        // unparseable catalog version ranks lowest
        assert_eq!(pick(None, Some("1.0"), None, None).as_deref(), Some("1.0"));
    }

    #[test]
    fn forced_version_gate() {
        assert!(validate_forced_version(None).unwrap().is_none());
        assert!(validate_forced_version(Some("  ")).unwrap().is_none());
        assert_eq!(validate_forced_version(Some("1.2")).unwrap(), Some(v("1.2")));
        assert!(matches!(
            validate_forced_version(Some("one.two")),
            Err(StateError::ForcedVersion { .. })
        ));
    }

    #[test]
    fn remote_is_left_alone_without_latest_flag() {
        let source = CountingSource::new("v=2.0;");
        let mut states = vlc_installed("1.0");

        determine_possible_actions(&mut states, None, false, None, &source).unwrap();

        let vlc = states.get_mut("vlc").unwrap();
        assert_eq!(source.fetches.get(), 0);
        assert_eq!(vlc.target_version(), Some(&v("1.0")));
        assert_eq!(vlc.status(), Status::Keep);
    }

    #[test]
    fn latest_flag_queries_remote() {
        let source = CountingSource::new("v=2.0;");
        let mut states = vlc_installed("1.0");

        determine_possible_actions(&mut states, None, true, None, &source).unwrap();

        let vlc = states.get_mut("vlc").unwrap();
        assert_eq!(source.fetches.get(), 1);
        assert_eq!(vlc.target_version(), Some(&v("2.0")));
        assert_eq!(vlc.status(), Status::Upgrade);
    }

    #[test]
    fn forced_version_skips_remote() {
        let source = CountingSource::new("v=2.0;");
        let mut states = vlc_installed("1.0");

        determine_possible_actions(&mut states, Some("0.9"), true, None, &source).unwrap();

        let vlc = states.get_mut("vlc").unwrap();
        assert_eq!(source.fetches.get(), 0);
        assert_eq!(vlc.status(), Status::Downgrade);
    }
}
