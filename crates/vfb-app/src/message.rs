//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use vfb_core::{
    Collection, DisplayMode, Entity, FilterConfiguration, FragmentToken, Model, Test,
    ValidationResult,
};

use crate::input_key::InputKey;

/// Records returned by a list refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionItems {
    Models(Vec<Model>),
    Tests(Vec<Test>),
}

impl CollectionItems {
    pub fn collection(&self) -> Collection {
        match self {
            CollectionItems::Models(_) => Collection::Models,
            CollectionItems::Tests(_) => Collection::Tests,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CollectionItems::Models(items) => items.len(),
            CollectionItems::Tests(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Leave the application
    Quit,

    /// Resolve the launch fragment, then load the shown collections
    Start,

    // ─────────────────────────────────────────────────────────
    // Remote Lists
    // ─────────────────────────────────────────────────────────
    /// Refresh one collection with the current filters
    Refresh(Collection),

    /// Refresh several collections, one after another
    RefreshCollections(Vec<Collection>),

    /// A list request completed
    ListLoaded {
        generation: u64,
        items: CollectionItems,
    },

    /// A list request failed
    ListFailed {
        collection: Collection,
        generation: u64,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Detail Views
    // ─────────────────────────────────────────────────────────
    /// Parse a location fragment and fetch the entity it names
    ResolveFragment(String),

    /// Single-entity lookup completed with every matching record
    EntitiesResolved {
        token: FragmentToken,
        generation: u64,
        entities: Vec<Entity>,
    },

    /// Single-entity lookup failed
    EntityLookupFailed {
        token: FragmentToken,
        generation: u64,
        error: String,
    },

    /// Open a detail view for a selected row
    OpenDetail(Entity),

    /// Close the topmost detail view
    CloseDetail,

    /// Stop the results request of a detail that was replaced
    CancelResults(Collection),

    /// Results of an open model or test detail arrived
    ResultsLoaded {
        owner: Collection,
        generation: u64,
        results: Vec<ValidationResult>,
    },

    ResultsFailed {
        owner: Collection,
        generation: u64,
        error: String,
    },

    /// Dismiss the error dialog on top
    DismissError,

    // ─────────────────────────────────────────────────────────
    // Configuration Dialog
    // ─────────────────────────────────────────────────────────
    OpenConfig,
    CancelConfig,

    /// Replace filters and display mode
    ApplyConfig {
        filters: FilterConfiguration,
        display: DisplayMode,
    },

    // ─────────────────────────────────────────────────────────
    // Table Toolbar
    // ─────────────────────────────────────────────────────────
    /// Switch focus between the model and test tables
    FocusNext,

    /// Toggle full width of the focused table
    ToggleWide,

    /// Hide the selected row of the focused table
    HideSelected,

    /// Show all hidden rows of the focused table
    RestoreHidden,

    /// Write the selected (or open) record to a JSON file
    ExportSelected,

    Exported { path: PathBuf },
    ExportFailed { path: PathBuf, error: String },
}
