//! Status classification and report messages

use super::AppState;
use crate::version::Version;
use std::fmt;

/// Action needed to bring an app to its target version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Not computed yet
    #[default]
    NotSet,
    Keep,
    Install,
    Upgrade,
    Downgrade,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::NotSet => "not set",
            Status::Keep => "keep",
            Status::Install => "install",
            Status::Upgrade => "upgrade",
            Status::Downgrade => "downgrade",
        };
        f.write_str(label)
    }
}

/// Status from the installed and the target version alone.
/// A missing target on an installed app means nothing to change.
pub fn derive_status(current: Option<&Version>, target: Option<&Version>) -> Status {
    match (current, target) {
        (None, _) => Status::Install,
        (Some(_), None) => Status::Keep,
        (Some(current), Some(target)) if target.is_newer_than(current) => Status::Upgrade,
        (Some(current), Some(target)) if current.is_newer_than(target) => Status::Downgrade,
        (Some(_), Some(_)) => Status::Keep,
    }
}

fn display(version: Option<&Version>) -> String {
    version.map_or_else(|| "unknown".to_string(), Version::to_string)
}

impl AppState {
    /// Current status, computed on first use
    pub fn status(&mut self) -> Status {
        if self.status == Status::NotSet {
            self.compute_status();
        }
        self.status
    }

    pub(crate) fn compute_status(&mut self) {
        self.status = derive_status(self.current_version(), self.target_version.as_ref());
    }

    /// What is about to happen
    pub fn status_message(&mut self) -> String {
        let current = display(self.current_version());
        let target = display(self.target_version.as_ref());
        match self.status() {
            Status::Keep => format!("installed version {} is already up to date", current),
            Status::Install if self.target_version.is_none() => {
                "not installed >> no installable version known".to_string()
            }
            Status::Install => format!("not installed >> will install version {}", target),
            Status::Upgrade => format!("upgrading version from {} >> {}", current, target),
            Status::Downgrade => format!("downgrading version from {} >> {}", current, target),
            Status::NotSet => String::new(),
        }
    }

    /// What happened, once the action went through
    pub fn success_message(&mut self) -> String {
        let current = display(self.current_version());
        let target = display(self.target_version.as_ref());
        match self.status() {
            Status::Keep => format!("successfully kept at version {}", current),
            Status::Install => format!("version {} successfully installed", target),
            Status::Upgrade => format!("successfully upgraded from {} to {}", current, target),
            Status::Downgrade => {
                format!("successfully downgraded from {} to {}", current, target)
            }
            Status::NotSet => String::new(),
        }
    }
}
