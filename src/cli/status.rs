//! Status command implementation

use super::Context;
use crate::state::{
    AppStates, StateError, Status, determine_possible_actions, load_asked_apps_initial_states,
};
use crate::storage::{VersionSource, paths};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("State error: {0}")]
    StateError(#[from] StateError),
}

/// What the user asked for on the command line
#[derive(Debug, Default, Clone)]
pub struct StatusRequest {
    pub apps: Vec<String>,
    pub force_version: Option<String>,
    pub use_latest: bool,
    pub api_key: Option<String>,
    /// Fall back to the settings' own app list when no app is named
    pub mine: bool,
}

/// Load and decide the states of the requested apps
pub fn plan_apps(
    ctx: &Context,
    request: &StatusRequest,
    source: &dyn VersionSource,
) -> Result<AppStates, StatusError> {
    let asked = if request.apps.is_empty() && request.mine {
        ctx.settings.my_apps.as_slice()
    } else {
        request.apps.as_slice()
    };

    let mut states = load_asked_apps_initial_states(&ctx.catalog, &ctx.apps_dir, asked)?;
    determine_possible_actions(
        &mut states,
        request.force_version.as_deref(),
        request.use_latest,
        ctx.settings.api_key(request.api_key.as_deref()),
        source,
    )?;
    Ok(states)
}

/// Print one status line per requested app
pub fn show_status(
    ctx: &Context,
    request: &StatusRequest,
    source: &dyn VersionSource,
) -> Result<(), StatusError> {
    let mut states = plan_apps(ctx, request, source)?;

    if states.is_empty() {
        println!("[nomad] No apps selected.");
        println!();
        println!("Name apps explicitly: nomad status <app>...");
        return Ok(());
    }

    for (name, state) in states.iter_mut() {
        println!("[{}] {}", name, state.status_message());

        let changes = matches!(
            state.status(),
            Status::Install | Status::Upgrade | Status::Downgrade
        );
        if let (true, Some(target)) = (changes, state.target_version()) {
            let folder = ctx
                .apps_dir
                .join(paths::version_dir_name(name, &target.to_string()));
            println!("    into {}", folder.display());
        }
    }

    Ok(())
}
