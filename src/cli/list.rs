//! List command implementation

use super::Context;
use crate::state::{StateError, scan_current_apps};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("State error: {0}")]
    StateError(#[from] StateError),
}

/// List all installed apps found in the apps directory
pub fn list_apps(ctx: &Context) -> Result<(), ListError> {
    let installed = scan_current_apps(&ctx.catalog, &ctx.apps_dir)?;

    if installed.is_empty() {
        println!("No apps installed in {}.", ctx.apps_dir.display());
        println!();
        println!("See what would be installed with: nomad status <app>...");
        return Ok(());
    }

    println!("Installed apps ({}):", ctx.apps_dir.display());
    println!();

    for (name, state) in &installed {
        let version = state
            .current_version()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".into());

        println!("  {}", name);
        println!("    Version:  {}", version);
        if let Some(folder) = &state.current_version_folder {
            println!("    Folder:   {}", folder.display());
        }
        println!(
            "    Symlink:  {}",
            if state.symlink_found {
                state.definition.definition().symlink_name()
            } else {
                "none"
            }
        );
        println!();
    }

    Ok(())
}
