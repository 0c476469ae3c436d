//! Application state (Model in TEA pattern)

use vfb_core::{
    share_url, Collection, DisplayMode, EntityKind, FilterConfiguration, LaunchLocation, Model,
    Record, Test,
};

use crate::config::Settings;
use crate::config_dialog::ConfigDialogState;
use crate::detail_state::SelectedEntityState;
use crate::list_state::{EntityListState, RequestStatus};

/// Which layer receives key input, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// An error dialog is showing
    Error,
    /// The configuration dialog is open
    Config,
    /// A detail view is open
    Detail(EntityKind),
    /// Model/test tables
    Browse,
}

/// How the model and test tables share the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    Single(Collection),
    Split,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    pub filters: FilterConfiguration,
    pub display: DisplayMode,

    /// Location fragment naming the open detail (without `#`)
    pub fragment: Option<String>,

    pub models: EntityListState<Model>,
    pub tests: EntityListState<Test>,

    pub detail: SelectedEntityState,

    /// Failure of a single-entity fetch or a malformed fragment
    pub error_get: Option<String>,
    /// Failure of a list refresh
    pub error_update: Option<String>,

    pub config_dialog: Option<ConfigDialogState>,

    /// Table receiving navigation keys
    pub focus: Collection,

    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,

    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default(), LaunchLocation::default())
    }

    pub fn with_settings(settings: Settings, location: LaunchLocation) -> Self {
        let focus = if location.display == DisplayMode::OnlyTests {
            Collection::Tests
        } else {
            Collection::Models
        };
        Self {
            settings,
            filters: location.filters,
            display: location.display,
            fragment: location.fragment,
            models: EntityListState::new(),
            tests: EntityListState::new(),
            detail: SelectedEntityState::default(),
            error_get: None,
            error_update: None,
            config_dialog: None,
            focus,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.settings.host.embedded
    }

    /// Embedded without filters: nothing is fetched and the tables are
    /// replaced by an introduction.
    pub fn show_introduction(&self) -> bool {
        self.is_embedded() && self.filters.is_empty()
    }

    pub fn ui_mode(&self) -> UiMode {
        if self.error_get.is_some() || self.error_update.is_some() {
            UiMode::Error
        } else if self.config_dialog.is_some() {
            UiMode::Config
        } else if let Some(kind) = self.detail.top() {
            UiMode::Detail(kind)
        } else {
            UiMode::Browse
        }
    }

    /// The error shown first: lookup failures before refresh failures.
    pub fn current_error(&self) -> Option<(&'static str, &str)> {
        if let Some(e) = &self.error_get {
            Some(("Error retrieving data", e.as_str()))
        } else {
            self.error_update
                .as_deref()
                .map(|e| ("Error updating data", e))
        }
    }

    pub fn status(&self, collection: Collection) -> &RequestStatus {
        match collection {
            Collection::Models => &self.models.status,
            Collection::Tests => &self.tests.status,
        }
    }

    pub fn status_mut(&mut self, collection: Collection) -> &mut RequestStatus {
        match collection {
            Collection::Models => &mut self.models.status,
            Collection::Tests => &mut self.tests.status,
        }
    }

    pub fn set_wide(&mut self, collection: Collection, wide: bool) {
        match collection {
            Collection::Models => self.models.wide = wide,
            Collection::Tests => self.tests.wide = wide,
        }
    }

    pub fn is_wide(&self, collection: Collection) -> bool {
        match collection {
            Collection::Models => self.models.wide,
            Collection::Tests => self.tests.wide,
        }
    }

    pub fn table_layout(&self) -> TableLayout {
        match self.display {
            DisplayMode::OnlyModels => TableLayout::Single(Collection::Models),
            DisplayMode::OnlyTests => TableLayout::Single(Collection::Tests),
            DisplayMode::ModelsAndTests => match (self.models.wide, self.tests.wide) {
                (true, false) => TableLayout::Single(Collection::Models),
                (false, true) => TableLayout::Single(Collection::Tests),
                _ => TableLayout::Split,
            },
        }
    }

    /// Focused table, constrained to what the layout shows.
    pub fn effective_focus(&self) -> Collection {
        match self.table_layout() {
            TableLayout::Single(collection) => collection,
            TableLayout::Split => self.focus,
        }
    }

    /// Id of the selected row in a table.
    pub fn selected_id(&self, collection: Collection) -> Option<String> {
        match collection {
            Collection::Models => self.models.selected_record().map(|m| m.id().to_string()),
            Collection::Tests => self.tests.selected_record().map(|t| t.id().to_string()),
        }
    }

    /// Link reproducing the current filters, display and open detail.
    pub fn share_link(&self) -> String {
        share_url(
            &self.settings.ui.app_url,
            &self.filters,
            self.display,
            self.fragment.as_deref(),
        )
    }
}
