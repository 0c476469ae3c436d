//! Display mode and the two remote collections

use std::fmt;

use serde::{Serialize, Serializer};

/// A remote collection listed in the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Models,
    Tests,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Models, Collection::Tests];

    /// Path segment of the collection endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Models => "models",
            Collection::Tests => "tests",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Collection::Models => "Models",
            Collection::Tests => "Tests",
        }
    }

    pub fn other(&self) -> Collection {
        match self {
            Collection::Models => Collection::Tests,
            Collection::Tests => Collection::Models,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Which collections the main view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    OnlyModels,
    #[default]
    ModelsAndTests,
    OnlyTests,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::OnlyModels,
        DisplayMode::ModelsAndTests,
        DisplayMode::OnlyTests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::OnlyModels => "Only Models",
            DisplayMode::ModelsAndTests => "Models & Tests",
            DisplayMode::OnlyTests => "Only Tests",
        }
    }

    /// Exact match against the textual forms; no fallback.
    pub fn from_str_exact(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }

    pub fn shows(&self, collection: Collection) -> bool {
        match (self, collection) {
            (DisplayMode::ModelsAndTests, _) => true,
            (DisplayMode::OnlyModels, Collection::Models) => true,
            (DisplayMode::OnlyTests, Collection::Tests) => true,
            _ => false,
        }
    }

    /// Collections this mode shows, models first.
    pub fn collections(&self) -> Vec<Collection> {
        Collection::ALL
            .into_iter()
            .filter(|c| self.shows(*c))
            .collect()
    }

    /// Cycle forward, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            DisplayMode::OnlyModels => DisplayMode::ModelsAndTests,
            DisplayMode::ModelsAndTests => DisplayMode::OnlyTests,
            DisplayMode::OnlyTests => DisplayMode::OnlyModels,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            DisplayMode::OnlyModels => DisplayMode::OnlyTests,
            DisplayMode::ModelsAndTests => DisplayMode::OnlyModels,
            DisplayMode::OnlyTests => DisplayMode::ModelsAndTests,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DisplayMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
