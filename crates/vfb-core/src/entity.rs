//! Remote records: models, tests and validation results
//!
//! Records are kept verbatim. The fields the browser renders are typed; every
//! other field is preserved in `extra` so exports and detail views show the
//! record exactly as the server returned it.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::filters::FilterKey;

/// The three kinds of entity a detail view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Model,
    Test,
    Result,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Model, EntityKind::Test, EntityKind::Result];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Model => "model",
            EntityKind::Test => "test",
            EntityKind::Result => "result",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Model => "Model",
            EntityKind::Test => "Test",
            EntityKind::Result => "Result",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
}

/// Format an author list as `Given Family, Given Family`.
pub fn format_authors(authors: &[Person]) -> String {
    authors
        .iter()
        .map(|p| format!("{} {}", p.given_name, p.family_name).trim().to_string())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an ISO-8601 timestamp as a date, or return the input unchanged.
pub fn format_date(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.to_string();
    }
    value.to_string()
}

/// Stringify a JSON value for display: arrays are joined with `, `.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Common accessors shared by every record type.
pub trait Record: Serialize {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn alias(&self) -> Option<&str>;

    fn extra(&self) -> &Map<String, Value>;

    /// Alias when set, otherwise id.
    fn label(&self) -> &str {
        match self.alias() {
            Some(alias) if !alias.is_empty() => alias,
            _ => self.id(),
        }
    }

    /// Display text of a filterable attribute.
    fn attribute(&self, key: FilterKey) -> String {
        self.extra()
            .get(key.as_str())
            .map(value_to_text)
            .unwrap_or_default()
    }

    /// True when the attribute equals any of `values` (or one of its list
    /// entries does).
    fn matches_any(&self, key: FilterKey, values: &[String]) -> bool {
        match self.extra().get(key.as_str()) {
            Some(Value::String(s)) => values.iter().any(|v| v == s),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .any(|s| values.iter().any(|v| v == s)),
            _ => false,
        }
    }

    /// Versions of a model (`instances`) or code versions of a test
    /// (`codes`). Entries that are not objects are skipped.
    fn versions(&self) -> Vec<Version> {
        let field = match Self::KIND {
            EntityKind::Model => "instances",
            EntityKind::Test => "codes",
            EntityKind::Result => return Vec::new(),
        };
        match self.extra().get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| Version::deserialize(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "creation_date", skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "creation_date", skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file produced by a validation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collab_storage: Option<CollabStorage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollabStorage {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ResultFile {
    /// Link to open: download url when present, else the original url.
    pub fn link(&self) -> &str {
        self.download_url
            .as_deref()
            .or(self.original_url.as_deref())
            .unwrap_or_default()
    }

    /// Display name: last segment of the storage path, download url or
    /// original url, with `#...` and `?...` removed.
    pub fn file_name(&self) -> String {
        let source = match (&self.download_url, &self.collab_storage) {
            (Some(_), Some(storage)) => storage.path.as_str(),
            (Some(url), None) => url.as_str(),
            (None, _) => self.original_url.as_deref().unwrap_or_default(),
        };
        last_segment(source)
    }
}

fn last_segment(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let segment = segment.split('#').next().unwrap_or(segment);
    let segment = segment.split('?').next().unwrap_or(segment);
    segment.to_string()
}

/// One model instance or test code version.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Model source
    #[serde(default)]
    pub source: Option<String>,
    /// Test code repository
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parameters: Option<Value>,
}

impl Version {
    /// Where the code lives: model source, else test repository.
    pub fn location(&self) -> Option<&str> {
        self.source
            .as_deref()
            .or(self.repository.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub id: String,
    #[serde(default, alias = "model_instance_id", skip_serializing_if = "Option::is_none")]
    pub model_version_id: Option<String>,
    #[serde(default, alias = "test_instance_id", skip_serializing_if = "Option::is_none")]
    pub test_code_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub results_storage: Vec<ResultFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationResult {
    /// Name of an embedded model or test record, when the server includes it.
    pub fn embedded_name(&self, kind: EntityKind) -> Option<&str> {
        self.extra
            .get(kind.as_str())?
            .get("name")?
            .as_str()
    }

    /// Id of the model version or test code this result was produced with.
    pub fn version_id(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Model => self.model_version_id.as_deref(),
            EntityKind::Test => self.test_code_id.as_deref(),
            EntityKind::Result => None,
        }
    }

    /// Score rendered with four decimals.
    pub fn score_text(&self) -> String {
        self.score.map(|s| format!("{s:.4}")).unwrap_or_default()
    }
}

impl Record for Model {
    const KIND: EntityKind = EntityKind::Model;

    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl Record for Test {
    const KIND: EntityKind = EntityKind::Test;

    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl Record for ValidationResult {
    const KIND: EntityKind = EntityKind::Result;

    fn id(&self) -> &str {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        None
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// A resolved single entity of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Model(Model),
    Test(Test),
    Result(ValidationResult),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Model(_) => EntityKind::Model,
            Entity::Test(_) => EntityKind::Test,
            Entity::Result(_) => EntityKind::Result,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Model(m) => &m.id,
            Entity::Test(t) => &t.id,
            Entity::Result(r) => &r.id,
        }
    }
}
