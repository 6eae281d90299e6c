//! Definition normalization and validation

use super::CatalogError;
use super::schema::{
    AppDefinition, DEFAULT_DOWNLOAD_EXTENSION, MANUAL_URL_PREFIX, MATCH_ALL_PATTERN,
    NAME_VERSION_SEPARATOR, non_empty,
};
use regex::Regex;

/// A definition that passed validation, with its extraction regex compiled
#[derive(Debug, Clone)]
pub struct ValidDefinition {
    definition: AppDefinition,
    extract_regex: Regex,
}

impl ValidDefinition {
    pub fn name(&self) -> &str {
        &self.definition.application_name
    }

    pub fn definition(&self) -> &AppDefinition {
        &self.definition
    }

    /// Combined extraction pattern, for the installer
    pub fn extract_regex(&self) -> &Regex {
        &self.extract_regex
    }
}

/// Fill in every default a definition is allowed to omit
pub fn normalize(mut definition: AppDefinition) -> AppDefinition {
    if non_empty(definition.symlink.as_deref()).is_none() {
        definition.symlink = Some(definition.application_name.clone());
    }

    if non_empty(definition.download_extension.as_deref()).is_none() {
        definition.download_extension = infer_download_extension(&definition.download_url);
    }

    if definition.extract_regex_list.is_empty() {
        definition.extract_regex_list = vec![MATCH_ALL_PATTERN.to_string()];
    }

    definition
}

/// Extension from the last `.` of the URL, without any query string.
/// `manual` URLs are left undecided.
pub fn infer_download_extension(url: &str) -> Option<String> {
    if url.is_empty() {
        return Some(DEFAULT_DOWNLOAD_EXTENSION.to_string());
    }
    if url.starts_with(MANUAL_URL_PREFIX) {
        return None;
    }

    match url.rfind('.') {
        Some(dot) => {
            let suffix = &url[dot..];
            let ext = suffix.split_once('?').map_or(suffix, |(ext, _)| ext);
            Some(ext.to_string())
        }
        None => Some(DEFAULT_DOWNLOAD_EXTENSION.to_string()),
    }
}

/// Normalize then validate a definition, collecting every problem found
pub fn validate_and_set_defaults(
    definition: AppDefinition,
) -> Result<ValidDefinition, CatalogError> {
    let definition = normalize(definition);
    let mut problems = Vec::new();

    if definition.application_name.is_empty() {
        problems.push("missing application name".to_string());
    }
    if definition.application_name.contains(NAME_VERSION_SEPARATOR) {
        problems.push(format!(
            "app name cannot contain '{}', please replace it with something else (ex. _)",
            NAME_VERSION_SEPARATOR
        ));
    }

    if definition.fixed_version().is_none() && definition.version_check_url().is_none() {
        problems.push("missing version info (either fixed or by url)".to_string());
    }

    let combined = definition.extract_regex_list.join("|");
    let extract_regex = match Regex::new(&combined) {
        Ok(regex) => Some(regex),
        Err(e) => {
            problems.push(format!(
                "invalid extraction regex {:?}: {}",
                definition.extract_regex_list, e
            ));
            None
        }
    };

    match extract_regex {
        Some(extract_regex) if problems.is_empty() => Ok(ValidDefinition {
            definition,
            extract_regex,
        }),
        _ => Err(CatalogError::ValidationError {
            name: definition.application_name,
            problems,
        }),
    }
}
