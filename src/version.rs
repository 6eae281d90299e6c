//! Application version parsing and ordering
//!
//! Portable apps rarely follow strict semver (`7.2`, `23.01`, `1.2.3.4`), so a
//! version is any number of dot-separated numeric components with an optional
//! pre-release label. Labels are ordered with semver precedence rules.

use semver::Prerelease;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },

    #[error("Invalid pre-release label in '{input}': {reason}")]
    InvalidLabel { input: String, reason: String },
}

/// A parsed, immutable application version
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    release: Vec<u64>,
    pre: Option<Prerelease>,
}

impl Version {
    /// Parse a version such as `1.2`, `v2.0.1`, `1.0-beta.2` or `3.1+build7`
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);
        if body.is_empty() {
            return Err(VersionError::Empty);
        }

        // Build metadata never takes part in ordering
        let body = body.split_once('+').map_or(body, |(head, _)| head);

        let (release_part, label) = match body.split_once('-') {
            Some((release, label)) => (release, Some(label)),
            None => (body, None),
        };

        let release = release_part
            .split('.')
            .map(|component| {
                component
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidComponent {
                        input: input.to_string(),
                        component: component.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match label {
            Some("") => {
                return Err(VersionError::InvalidLabel {
                    input: input.to_string(),
                    reason: "label is empty".into(),
                });
            }
            Some(label) => Some(Prerelease::new(label).map_err(|e| {
                VersionError::InvalidLabel {
                    input: input.to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            text: trimmed.to_string(),
            release,
            pre,
        })
    }

    /// Strictly newer than `other`; equal versions are never newer
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    fn cmp_release(&self, other: &Version) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| {
                let a = self.release.get(i).copied().unwrap_or(0);
                let b = other.release.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_release(other)
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
