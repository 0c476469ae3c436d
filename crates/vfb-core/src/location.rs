//! Launch locations and shareable links
//!
//! A launch location is either a full URL or a bare `?query#fragment`. The
//! query carries one parameter per filter key plus `display`; the fragment
//! names a single entity to open.

use url::Url;

use crate::codec::{decode_display_param, decode_filters, encode_location_query};
use crate::display::DisplayMode;
use crate::error::{Error, Result};
use crate::filters::FilterConfiguration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchLocation {
    pub filters: FilterConfiguration,
    pub display: DisplayMode,
    /// Raw fragment without the leading `#`; parsed later by the resolver.
    pub fragment: Option<String>,
}

impl LaunchLocation {
    /// Parse a URL (`https://host/path?query#fragment`) or a bare
    /// `?query#fragment` / `#fragment` / `query` string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::default());
        }

        let (query, fragment) = if input.contains("://") {
            let url = Url::parse(input).map_err(|e| Error::location(format!("{input}: {e}")))?;
            (
                url.query().unwrap_or_default().to_string(),
                url.fragment().map(str::to_string),
            )
        } else {
            let (before, fragment) = match input.split_once('#') {
                Some((before, fragment)) => (before, Some(fragment.to_string())),
                None => (input, None),
            };
            (before.trim_start_matches('?').to_string(), fragment)
        };

        Ok(Self {
            filters: decode_filters(&query),
            display: decode_display_param(&query),
            fragment: fragment.filter(|f| !f.is_empty()),
        })
    }
}

/// Build the link that reproduces the given state when opened.
pub fn share_url(
    app_url: &str,
    filters: &FilterConfiguration,
    display: DisplayMode,
    fragment: Option<&str>,
) -> String {
    let base = app_url.split(['?', '#']).next().unwrap_or(app_url);
    let mut link = base.to_string();
    let query = encode_location_query(filters, display);
    if !query.is_empty() {
        link.push('?');
        link.push_str(&query);
    }
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        link.push('#');
        link.push_str(fragment);
    }
    link
}
