//! Offline data source backed by a local JSON file
//!
//! Used while working on the terminal layout without a network connection.
//! The file holds `{ "models": [...], "tests": [...], "results": [...] }` and
//! is queried with the same filter and lookup semantics as the REST API.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use vfb_core::prelude::*;
use vfb_core::{
    Collection, Entity, EntityKind, FilterConfiguration, FragmentToken, Model, Record, Test,
    ValidationResult,
};

use crate::api::ValidationApi;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfflineStore {
    #[serde(default)]
    models: Vec<Model>,
    #[serde(default)]
    tests: Vec<Test>,
    #[serde(default)]
    results: Vec<ValidationResult>,
}

impl OfflineStore {
    pub fn new(models: Vec<Model>, tests: Vec<Test>, results: Vec<ValidationResult>) -> Self {
        Self {
            models,
            tests,
            results,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read offline data {}", path.display()))?;
        let store: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse offline data {}", path.display()))?;
        info!(
            "Loaded offline data: {} models, {} tests, {} results",
            store.models.len(),
            store.tests.len(),
            store.results.len()
        );
        Ok(store)
    }
}

fn matches_filters<R: Record>(record: &R, filters: &FilterConfiguration) -> bool {
    filters
        .active()
        .all(|(key, values)| record.matches_any(key, values))
}

fn matches_token<R: Record>(record: &R, token: &FragmentToken) -> bool {
    if token.key.is_id() {
        record.id() == token.value
    } else {
        record.alias() == Some(token.value.as_str())
    }
}

/// A result belongs to an owner when it names the owner's id directly
/// (`model_id` / `test_id`) or embeds the owner record.
fn belongs_to(result: &ValidationResult, owner: Collection, id: &str) -> bool {
    let (field, embedded) = match owner {
        Collection::Models => ("model_id", EntityKind::Model.as_str()),
        Collection::Tests => ("test_id", EntityKind::Test.as_str()),
    };
    let direct = result.extra.get(field).and_then(Value::as_str) == Some(id);
    let nested = result
        .extra
        .get(embedded)
        .and_then(|v| v.get("id"))
        .and_then(Value::as_str)
        == Some(id);
    direct || nested
}

impl ValidationApi for OfflineStore {
    async fn list_models(&self, filters: &FilterConfiguration) -> Result<Vec<Model>> {
        Ok(self
            .models
            .iter()
            .filter(|m| matches_filters(*m, filters))
            .cloned()
            .collect())
    }

    async fn list_tests(&self, filters: &FilterConfiguration) -> Result<Vec<Test>> {
        Ok(self
            .tests
            .iter()
            .filter(|t| matches_filters(*t, filters))
            .cloned()
            .collect())
    }

    async fn find(&self, token: &FragmentToken) -> Result<Vec<Entity>> {
        let found = match token.entity_kind() {
            EntityKind::Model => self
                .models
                .iter()
                .filter(|m| matches_token(*m, token))
                .cloned()
                .map(Entity::Model)
                .collect(),
            EntityKind::Test => self
                .tests
                .iter()
                .filter(|t| matches_token(*t, token))
                .cloned()
                .map(Entity::Test)
                .collect(),
            EntityKind::Result => self
                .results
                .iter()
                .filter(|r| r.id == token.value)
                .cloned()
                .map(Entity::Result)
                .collect(),
        };
        Ok(found)
    }

    async fn results_for(&self, owner: Collection, id: &str) -> Result<Vec<ValidationResult>> {
        Ok(self
            .results
            .iter()
            .filter(|r| belongs_to(r, owner, id))
            .cloned()
            .collect())
    }
}
