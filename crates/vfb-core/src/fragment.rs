//! Location fragment tokens (`<key>.<value>`) naming a single entity

use std::fmt;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::entity::EntityKind;
use crate::error::{Error, Result};

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid UUID regex")
});

/// Syntactic UUID check (8-4-4-4-12 hex digits).
pub fn is_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

/// Keys accepted in a location fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ModelId,
    ModelAlias,
    TestId,
    TestAlias,
    ResultId,
}

impl QueryKey {
    pub const ALL: [QueryKey; 5] = [
        QueryKey::ModelId,
        QueryKey::ModelAlias,
        QueryKey::TestId,
        QueryKey::TestAlias,
        QueryKey::ResultId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::ModelId => "model_id",
            QueryKey::ModelAlias => "model_alias",
            QueryKey::TestId => "test_id",
            QueryKey::TestAlias => "test_alias",
            QueryKey::ResultId => "result_id",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            QueryKey::ModelId | QueryKey::ModelAlias => EntityKind::Model,
            QueryKey::TestId | QueryKey::TestAlias => EntityKind::Test,
            QueryKey::ResultId => EntityKind::Result,
        }
    }

    /// Keys ending in `_id` must carry a UUID.
    pub fn is_id(&self) -> bool {
        self.as_str().ends_with("_id")
    }

    /// Name of the remote query parameter this key maps to.
    pub fn remote_param(&self) -> &'static str {
        if self.is_id() {
            "id"
        } else {
            "alias"
        }
    }

    /// Comma-separated list of every accepted key, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(QueryKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The id key for an entity kind.
    pub fn id_key(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Model => QueryKey::ModelId,
            EntityKind::Test => QueryKey::TestId,
            EntityKind::Result => QueryKey::ResultId,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated fragment naming one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentToken {
    pub key: QueryKey,
    pub value: String,
}

impl FragmentToken {
    pub fn new(key: QueryKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Parse `#key.value`.
    ///
    /// The leading `#` is optional and percent-escapes are decoded before the
    /// split at the first `.`. Unknown keys and non-UUID values for `_id` keys
    /// are rejected without touching the network.
    pub fn parse(fragment: &str) -> Result<Self> {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        let decoded = percent_decode_str(raw).decode_utf8_lossy();

        let (key, value) = decoded.split_once('.').unwrap_or((decoded.as_ref(), ""));

        let Some(query_key) = QueryKey::parse(key) else {
            return Err(Error::UnknownQueryKey {
                key: key.to_string(),
                allowed: QueryKey::allowed_list(),
            });
        };

        if query_key.is_id() && !is_uuid(value) {
            return Err(Error::InvalidUuid {
                key: query_key.as_str().to_string(),
                value: value.to_string(),
            });
        }

        Ok(Self::new(query_key, value))
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.key.entity_kind()
    }
}

impl fmt::Display for FragmentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.key, self.value)
    }
}
