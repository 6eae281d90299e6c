//! Initial states of the apps a run asks for

use super::{AppState, AppStates, StateError, scan_current_apps};
use crate::catalog::Catalog;
use std::path::Path;
use tracing::{debug, warn};

/// Merge installed and not-yet-installed states for the asked apps.
/// No names, or `all` as first name, adds every installed app to the ones
/// named after it.
pub fn load_asked_apps_initial_states<S: AsRef<str>>(
    catalog: &Catalog,
    root: &Path,
    asked_apps: &[S],
) -> Result<AppStates, StateError> {
    let mut installed = scan_current_apps(catalog, root)?;
    debug!("Found {} installed apps", installed.len());

    let wants_all = asked_apps
        .first()
        .is_none_or(|first| first.as_ref() == crate::ALL_APPS);
    let mut names: Vec<String> = asked_apps
        .iter()
        .skip(usize::from(wants_all))
        .map(|name| name.as_ref().to_string())
        .collect();
    if wants_all {
        debug!("Working on all installed apps");
        names.extend(installed.keys().cloned());
    }
    debug!("Selected apps: {:?}", names);

    let mut states = AppStates::new();
    for name in names {
        if states.contains_key(&name) {
            continue;
        }
        if let Some(state) = installed.remove(&name) {
            states.insert(name, state);
        } else if let Some(definition) = catalog.get(&name) {
            states.insert(name, AppState::not_installed(definition.clone()));
        } else {
            warn!("Unknown app {}", name);
        }
    }

    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AppDefinition;
    use std::fs;

    fn catalog() -> Catalog {
        let (catalog, _) = Catalog::from_definitions(["foo", "bar", "baz"].map(|name| {
            AppDefinition {
                version: Some("1.0".into()),
                ..AppDefinition::new(name)
            }
        }));
        catalog
    }

    fn apps_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("foo-1.0")).unwrap();
        fs::create_dir(dir.path().join("baz-0.5")).unwrap();
        dir
    }

    #[test]
    fn no_names_means_all_installed() {
        let dir = apps_dir();
        let none: [&str; 0] = [];
        let states = load_asked_apps_initial_states(&catalog(), dir.path(), &none).unwrap();
        assert_eq!(states.keys().collect::<Vec<_>>(), ["baz", "foo"]);

        let all = load_asked_apps_initial_states(&catalog(), dir.path(), &["all"]).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn asked_apps_mix_installed_and_placeholders() {
        let dir = apps_dir();
        let states = load_asked_apps_initial_states(
            &catalog(),
            dir.path(),
            &["foo", "bar", "unknown", "foo"],
        )
        .unwrap();

        assert_eq!(states.len(), 2);
        assert!(states["foo"].is_installed());
        assert!(!states["bar"].is_installed());
        assert!(states["bar"].target_version().is_none());
    }

    #[test]
    fn all_keeps_the_names_after_it() {
        let dir = apps_dir();
        let states =
            load_asked_apps_initial_states(&catalog(), dir.path(), &["all", "bar"]).unwrap();

        assert_eq!(states.keys().collect::<Vec<_>>(), ["bar", "baz", "foo"]);
        assert!(!states["bar"].is_installed());
        assert!(states["foo"].is_installed());
    }
}
