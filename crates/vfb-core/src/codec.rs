//! Conversions between [`FilterConfiguration`] / [`DisplayMode`] and their
//! textual encodings: query strings for the REST API and launch locations,
//! and delimiter-joined values for host messages.

use serde::ser::{Serialize, SerializeMap, Serializer};
use url::form_urlencoded;

use crate::display::DisplayMode;
use crate::filters::{FilterConfiguration, FilterKey, SETTINGS_DELIMITER};

/// Name of the display-mode launch parameter.
pub const DISPLAY_PARAM: &str = "display";

/// Encode filters as `key=value` pairs for a REST query.
///
/// One pair per value, keys in declared order, empty keys omitted. Values are
/// form-urlencoded. Returns an empty string when no key carries a value.
pub fn encode_filters(config: &FilterConfiguration) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in config.active() {
        for value in values {
            serializer.append_pair(key.as_str(), value);
        }
    }
    serializer.finish()
}

/// Decode filters from a query string (without the leading `?`).
///
/// Every occurrence of a declared key is split on [`SETTINGS_DELIMITER`] and
/// appended in order. Unknown parameters and empty segments are ignored.
pub fn decode_filters(query: &str) -> FilterConfiguration {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut config = FilterConfiguration::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let Ok(key) = name.parse::<FilterKey>() else {
            continue;
        };
        for part in value.split(SETTINGS_DELIMITER) {
            if !part.is_empty() {
                config.push(key, part);
            }
        }
    }
    config
}

/// Resolve the display mode, falling back to [`DisplayMode::ModelsAndTests`]
/// for missing or unrecognised input.
pub fn decode_display_mode(value: Option<&str>) -> DisplayMode {
    value
        .and_then(DisplayMode::from_str_exact)
        .unwrap_or_default()
}

/// Read the `display` parameter from a query string.
pub fn decode_display_param(query: &str) -> DisplayMode {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == DISPLAY_PARAM)
        .map(|(_, value)| value.into_owned());
    decode_display_mode(value.as_deref())
}

/// Encode filters and display mode as launch-location query parameters, one
/// parameter per non-empty key with delimiter-joined values.
pub fn encode_location_query(config: &FilterConfiguration, display: DisplayMode) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in config.active() {
        serializer.append_pair(key.as_str(), &join_values(values));
    }
    if display != DisplayMode::default() {
        serializer.append_pair(DISPLAY_PARAM, display.as_str());
    }
    serializer.finish()
}

fn join_values(values: &[String]) -> String {
    values.join(&SETTINGS_DELIMITER.to_string())
}

/// The `data` object of a settings-update host message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPayload {
    /// Every declared key with its delimiter-joined values, when the message
    /// carries filters.
    pub filters: Option<Vec<(FilterKey, String)>>,
    pub display: Option<DisplayMode>,
    /// Always false: the host must not reload the embedded app.
    pub reload: bool,
}

impl HostPayload {
    pub fn display(mode: DisplayMode) -> Self {
        Self {
            filters: None,
            display: Some(mode),
            reload: false,
        }
    }

    pub fn value(&self, key: FilterKey) -> Option<&str> {
        self.filters
            .as_ref()?
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the host payload for a filter change.
pub fn encode_for_host(config: &FilterConfiguration) -> HostPayload {
    HostPayload {
        filters: Some(
            config
                .iter()
                .map(|(key, values)| (key, join_values(values)))
                .collect(),
        ),
        display: None,
        reload: false,
    }
}

impl Serialize for HostPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(filters) = &self.filters {
            for (key, value) in filters {
                map.serialize_entry(key.as_str(), value)?;
            }
        }
        if let Some(display) = &self.display {
            map.serialize_entry(DISPLAY_PARAM, display)?;
        }
        map.serialize_entry("reload", &self.reload)?;
        map.end()
    }
}
