//! Discovery of installed app versions
//!
//! Every installed version lives in its own `<app>-<version>` directory under
//! the apps root. The symlink named after the app points at the active one and
//! always wins; without a symlink the highest version directory is current.

use super::{AppState, AppStates, StateError};
use crate::catalog::{Catalog, NAME_VERSION_SEPARATOR};
use crate::version::Version;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};
use walkdir::WalkDir;

/// A directory that may hold an installed version
#[derive(Debug)]
struct Candidate {
    dir_name: String,
    folder: PathBuf,
    from_symlink: bool,
}

/// Look for installed apps matching the catalog's definitions.
/// A missing root simply means nothing is installed yet.
pub fn scan_current_apps(catalog: &Catalog, root: &Path) -> Result<AppStates, StateError> {
    trace!("Searching for currently installed apps in {}", root.display());
    let mut installed = AppStates::new();

    if !root.exists() {
        debug!(
            "Directory {} does not exist (no apps yet installed)",
            root.display()
        );
        return Ok(installed);
    }
    if !root.is_dir() {
        return Err(StateError::NotADirectory(root.to_path_buf()));
    }

    let scan_error = |source: std::io::Error| StateError::ScanError {
        path: root.to_path_buf(),
        source,
    };
    let canonical_root = root.canonicalize().map_err(scan_error)?;

    let mut resolved_through_symlinks: HashSet<PathBuf> = HashSet::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(scan_error(e.into())),
            Err(e) => {
                error!("Cannot read entry in {}: {}", root.display(), e);
                continue;
            }
        };

        let full_path = entry.path();
        let candidate = if entry.path_is_symlink() {
            trace!("Found link {}", full_path.display());
            match resolve_link(&canonical_root, root, full_path) {
                Ok(Some((candidate, relative))) => {
                    if let Some(relative) = relative {
                        resolved_through_symlinks.insert(relative);
                    }
                    Some(candidate)
                }
                Ok(None) => None,
                Err(e) => {
                    error!("Cannot resolve link {}: {}", full_path.display(), e);
                    None
                }
            }
        } else if entry.file_type().is_dir() {
            let name = PathBuf::from(entry.file_name());
            if resolved_through_symlinks.contains(&name) {
                trace!(
                    "Discarding {} folder as already scanned through symlink",
                    full_path.display()
                );
                None
            } else {
                entry.file_name().to_str().map(|dir_name| Candidate {
                    dir_name: dir_name.to_string(),
                    folder: full_path.to_path_buf(),
                    from_symlink: false,
                })
            }
        } else {
            None
        };

        if let Some(candidate) = candidate {
            analyze_entry(catalog, &mut installed, candidate);
        }
    }

    Ok(installed)
}

/// Follow a link to the version directory it designates. Returns the
/// candidate and, when the target lies inside the root, its path relative to
/// the root (junctions and absolute links are normalized through it).
fn resolve_link(
    canonical_root: &Path,
    root: &Path,
    link: &Path,
) -> std::io::Result<Option<(Candidate, Option<PathBuf>)>> {
    let target = fs::read_link(link)?;
    let target = if target.is_relative() {
        link.parent().unwrap_or(Path::new(".")).join(target)
    } else {
        target
    };

    if !fs::metadata(&target)?.is_dir() {
        trace!("Link {} does not point to a directory", link.display());
        return Ok(None);
    }

    let canonical_target = target.canonicalize()?;
    let Some(dir_name) = canonical_target
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
    else {
        return Ok(None);
    };

    let (folder, relative) = match canonical_target.strip_prefix(canonical_root) {
        Ok(relative) => (root.join(relative), Some(relative.to_path_buf())),
        Err(_) => {
            debug!(
                "Link {} points outside the apps directory ({})",
                link.display(),
                canonical_target.display()
            );
            (canonical_target.clone(), None)
        }
    };

    trace!(
        "Link {} is pointing to valid directory {}",
        link.display(),
        folder.display()
    );
    Ok(Some((
        Candidate {
            dir_name,
            folder,
            from_symlink: true,
        },
        relative,
    )))
}

fn analyze_entry(catalog: &Catalog, states: &mut AppStates, candidate: Candidate) {
    trace!(
        "Analyzing {} (from symlink: {})",
        candidate.folder.display(),
        candidate.from_symlink
    );

    let Some((app_name, version_text)) = candidate.dir_name.split_once(NAME_VERSION_SEPARATOR)
    else {
        trace!(
            "No {} found in {}, discarding entry",
            NAME_VERSION_SEPARATOR,
            candidate.folder.display()
        );
        return;
    };

    let version = match Version::parse(version_text) {
        Ok(version) => version,
        Err(e) => {
            error!("Cannot get version of {}: {} -> skipping", app_name, e);
            return;
        }
    };

    // Symlink is master; otherwise keep the highest version seen
    if !candidate.from_symlink {
        if let Some(existing) = states.get(app_name) {
            let existing_is_newer = existing
                .current_version()
                .is_some_and(|current| current.is_newer_than(&version));
            if existing.symlink_found || existing_is_newer {
                debug!(
                    "Discarding {} {} as current version candidate (symlinked or newer {} already found)",
                    app_name,
                    version,
                    existing
                        .current_version()
                        .map(ToString::to_string)
                        .unwrap_or_default()
                );
                return;
            }
        }
    } else {
        trace!("Setting current {} to {} (symlink found)", app_name, version);
    }

    match catalog.get(app_name) {
        Some(definition) => {
            states.insert(
                app_name.to_string(),
                AppState::installed(
                    definition.clone(),
                    version,
                    candidate.folder,
                    candidate.from_symlink,
                ),
            );
        }
        None => warn!("Unknown app {}", app_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AppDefinition;
    use std::fs;

    fn catalog(names: &[&str]) -> Catalog {
        let (catalog, rejected) = Catalog::from_definitions(names.iter().map(|name| {
            AppDefinition {
                version: Some("1.0".into()),
                ..AppDefinition::new(*name)
            }
        }));
        assert!(rejected.is_empty());
        catalog
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let states = scan_current_apps(&catalog(&["app"]), &dir.path().join("apps")).unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("apps");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            scan_current_apps(&catalog(&["app"]), &file),
            Err(StateError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_is_a_scan_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("apps");
        fs::create_dir_all(root.join("app-1.0")).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user
        let listable = fs::read_dir(&root).is_ok();
        let result = scan_current_apps(&catalog(&["app"]), &root);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if listable {
            return;
        }

        match result {
            Err(StateError::ScanError { path, source }) => {
                assert_eq!(path, root);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected scan error, got {:?}", other),
        }
    }

    #[test]
    fn highest_bare_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["app-1.2", "app-1.10", "app-1.9"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        let app = &states["app"];
        assert_eq!(app.current_version().unwrap().to_string(), "1.10");
        assert!(!app.symlink_found);
        assert_eq!(app.current_version_folder, Some(dir.path().join("app-1.10")));
    }

    #[test]
    fn undecipherable_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nodash")).unwrap();
        fs::create_dir(dir.path().join("app-notaversion")).unwrap();
        fs::create_dir(dir.path().join("stranger-1.0")).unwrap();
        fs::write(dir.path().join("app-9.9"), "a file, not a directory").unwrap();
        fs::create_dir(dir.path().join("app-2.0")).unwrap();

        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states["app"].current_version().unwrap().to_string(), "2.0");
    }

    #[test]
    fn split_happens_on_first_dash() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("app-1.0-beta.1")).unwrap();
        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        let version = states["app"].current_version().unwrap();
        assert!(version.is_prerelease());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_beats_newer_bare_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("app-2.0")).unwrap();
        fs::create_dir(dir.path().join("app-3.0")).unwrap();
        std::os::unix::fs::symlink("app-2.0", dir.path().join("app")).unwrap();

        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        let app = &states["app"];
        assert_eq!(app.current_version().unwrap().to_string(), "2.0");
        assert!(app.symlink_found);
        assert_eq!(app.current_version_folder, Some(dir.path().join("app-2.0")));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_symlinks_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app-1.5");
        fs::create_dir(&target).unwrap();
        fs::create_dir(dir.path().join("app-1.7")).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("app")).unwrap();

        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        assert_eq!(states["app"].current_version().unwrap().to_string(), "1.5");
        assert!(states["app"].symlink_found);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("app-1.0")).unwrap();
        std::os::unix::fs::symlink("app-4.0", dir.path().join("app")).unwrap();

        let states = scan_current_apps(&catalog(&["app"]), dir.path()).unwrap();
        assert_eq!(states["app"].current_version().unwrap().to_string(), "1.0");
        assert!(!states["app"].symlink_found);
    }
}
