use std::collections::BTreeMap;

use crate::config::TrackerConfig;
use crate::error::CoachResult;
use crate::models::exercise::{ExerciseCategory, ExerciseDefinition, ExerciseKind};

/// Registry of exercise definitions with configured threshold overrides applied
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    definitions: BTreeMap<ExerciseKind, ExerciseDefinition>,
}

impl ExerciseCatalog {
    /// Catalogue with built-in thresholds
    pub fn new() -> Self {
        let definitions = ExerciseKind::all()
            .into_iter()
            .map(|kind| (kind, ExerciseDefinition::new(kind)))
            .collect();
        Self { definitions }
    }

    /// Catalogue with the configuration's threshold overrides applied
    pub fn from_config(config: &TrackerConfig) -> CoachResult<Self> {
        config.validate()?;

        let mut catalog = Self::new();
        for (kind, definition) in catalog.definitions.iter_mut() {
            if let Some(thresholds) = config.thresholds_for(*kind)? {
                definition.rule = definition.rule.with_thresholds(thresholds);
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, kind: ExerciseKind) -> &ExerciseDefinition {
        // every kind is inserted at construction
        &self.definitions[&kind]
    }

    /// Look up by identifier; unknown ids are a configuration error
    pub fn lookup(&self, id: &str) -> CoachResult<&ExerciseDefinition> {
        let kind: ExerciseKind = id.parse()?;
        Ok(self.get(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.definitions.values()
    }

    /// Definitions grouped by category for selection menus
    pub fn by_category(&self) -> BTreeMap<ExerciseCategory, Vec<&ExerciseDefinition>> {
        let mut groups: BTreeMap<ExerciseCategory, Vec<&ExerciseDefinition>> = BTreeMap::new();
        for definition in self.definitions.values() {
            groups.entry(definition.category).or_default().push(definition);
        }
        groups
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::new()
    }
}
