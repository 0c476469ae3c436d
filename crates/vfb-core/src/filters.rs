//! Filter keys and the filter configuration
//!
//! [`FilterKey`] is the single authoritative list of filterable attributes.
//! The codec, the configuration dialog and the table columns all iterate
//! [`FilterKey::ALL`], so adding a key here is the only change needed.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::display::Collection;

/// Delimiter joining multiple values of one filter key in launch parameters
/// and host messages.
pub const SETTINGS_DELIMITER: char = ',';

/// A filterable attribute of models and tests, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Species,
    BrainRegion,
    CellType,
    ModelScope,
    AbstractionLevel,
    TestType,
    ScoreType,
    DataModality,
}

impl FilterKey {
    /// Every filter key in declared order.
    pub const ALL: [FilterKey; 8] = [
        FilterKey::Species,
        FilterKey::BrainRegion,
        FilterKey::CellType,
        FilterKey::ModelScope,
        FilterKey::AbstractionLevel,
        FilterKey::TestType,
        FilterKey::ScoreType,
        FilterKey::DataModality,
    ];

    /// Number of declared keys.
    pub const COUNT: usize = Self::ALL.len();

    /// Wire name used in query strings and host messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Species => "species",
            FilterKey::BrainRegion => "brain_region",
            FilterKey::CellType => "cell_type",
            FilterKey::ModelScope => "model_scope",
            FilterKey::AbstractionLevel => "abstraction_level",
            FilterKey::TestType => "test_type",
            FilterKey::ScoreType => "score_type",
            FilterKey::DataModality => "data_modality",
        }
    }

    /// Human-readable label for dialogs and headers.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Species => "Species",
            FilterKey::BrainRegion => "Brain region",
            FilterKey::CellType => "Cell type",
            FilterKey::ModelScope => "Model scope",
            FilterKey::AbstractionLevel => "Abstraction level",
            FilterKey::TestType => "Test type",
            FilterKey::ScoreType => "Score type",
            FilterKey::DataModality => "Data modality",
        }
    }

    /// Whether records of `collection` carry this attribute.
    pub fn applies_to(&self, collection: Collection) -> bool {
        match self {
            FilterKey::Species | FilterKey::BrainRegion | FilterKey::CellType => true,
            FilterKey::ModelScope | FilterKey::AbstractionLevel => collection == Collection::Models,
            FilterKey::TestType | FilterKey::ScoreType | FilterKey::DataModality => {
                collection == Collection::Tests
            }
        }
    }

    /// Keys shown as columns for a collection, in declared order.
    pub fn columns_for(collection: Collection) -> Vec<FilterKey> {
        Self::ALL
            .into_iter()
            .filter(|key| key.applies_to(collection))
            .collect()
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

/// Selected values for every declared filter key.
///
/// Backed by a fixed array indexed by [`FilterKey`], so the key set can never
/// drift from the declared one. An empty sequence means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfiguration {
    values: [Vec<String>; FilterKey::COUNT],
}

impl FilterConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful in tests and CLI parsing.
    pub fn with(mut self, key: FilterKey, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.set(key, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, key: FilterKey) -> &[String] {
        &self.values[key.index()]
    }

    /// Replace the values of one key.
    pub fn set(&mut self, key: FilterKey, values: Vec<String>) {
        self.values[key.index()] = values;
    }

    /// Append a value unless it is already selected.
    pub fn push(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        let slot = &mut self.values[key.index()];
        if !slot.contains(&value) {
            slot.push(value);
        }
    }

    /// True when no key carries any value.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Vec::is_empty)
    }

    /// Iterate keys in declared order with their values (including empty ones).
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &[String])> + '_ {
        FilterKey::ALL
            .into_iter()
            .map(move |key| (key, self.get(key)))
    }

    /// Iterate only the keys that constrain the result set.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &[String])> + '_ {
        self.iter().filter(|(_, values)| !values.is_empty())
    }
}

impl Serialize for FilterConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FilterKey::COUNT))?;
        for (key, values) in self.iter() {
            map.serialize_entry(key.as_str(), values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order_matches_discriminants() {
        for (i, key) in FilterKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_filter_key_round_trips_through_wire_name() {
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>(), Ok(key));
        }
        assert!("organization".parse::<FilterKey>().is_err());
    }

    #[test]
    fn test_columns_per_collection() {
        assert_eq!(FilterKey::columns_for(Collection::Models).len(), 5);
        assert_eq!(
            FilterKey::columns_for(Collection::Tests),
            vec![
                FilterKey::Species,
                FilterKey::BrainRegion,
                FilterKey::CellType,
                FilterKey::TestType,
                FilterKey::ScoreType,
                FilterKey::DataModality,
            ]
        );
    }

    #[test]
    fn test_new_configuration_is_empty() {
        let config = FilterConfiguration::new();
        assert!(config.is_empty());
        assert_eq!(config.iter().count(), FilterKey::COUNT);
        assert_eq!(config.active().count(), 0);
    }

    #[test]
    fn test_push_ignores_duplicates() {
        let mut config = FilterConfiguration::new();
        config.push(FilterKey::Species, "Mus musculus");
        config.push(FilterKey::Species, "Mus musculus");
        config.push(FilterKey::Species, "Rattus norvegicus");
        assert_eq!(
            config.get(FilterKey::Species),
            &["Mus musculus".to_string(), "Rattus norvegicus".to_string()]
        );
        assert!(!config.is_empty());
    }

    #[test]
    fn test_serializes_as_map_in_declared_order() {
        let config = FilterConfiguration::new().with(FilterKey::CellType, ["granule cell"]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.starts_with(r#"{"species":[]"#));
        assert!(json.contains(r#""cell_type":["granule cell"]"#));
    }
}
