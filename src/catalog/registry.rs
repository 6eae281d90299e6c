//! The validated set of definitions a run works with

use super::schema::AppDefinition;
use super::validate::{ValidDefinition, validate_and_set_defaults};
use super::CatalogError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Validated definitions keyed by application name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    apps: BTreeMap<String, Arc<ValidDefinition>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every definition. Invalid ones are left out and returned
    /// alongside the catalog so the caller can report them.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AppDefinition>,
    ) -> (Self, Vec<CatalogError>) {
        let mut catalog = Self::new();
        let mut rejected = Vec::new();

        for definition in definitions {
            match validate_and_set_defaults(definition) {
                Ok(valid) => {
                    if let Some(previous) = catalog.insert(valid) {
                        tracing::debug!("Definition for {} overridden", previous.name());
                    }
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    rejected.push(e);
                }
            }
        }

        (catalog, rejected)
    }

    pub fn insert(&mut self, definition: ValidDefinition) -> Option<Arc<ValidDefinition>> {
        self.apps
            .insert(definition.name().to_string(), Arc::new(definition))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ValidDefinition>> {
        self.apps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.apps.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ValidDefinition>)> {
        self.apps.iter().map(|(name, def)| (name.as_str(), def))
    }
}
