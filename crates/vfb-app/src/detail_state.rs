//! Detail views: at most one record per entity kind
//!
//! A detail view is open exactly when it holds a record. Model and test
//! details also own the results recorded against them.

use vfb_core::{Collection, Entity, EntityKind, Model, Test, ValidationResult};

use crate::list_state::{EntityListState, RequestStatus};

/// Tabs of a model or test detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Info,
    Results,
}

/// Tabs of a result detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Info,
    Files,
}

impl DetailTab {
    pub const ALL: [DetailTab; 2] = [DetailTab::Info, DetailTab::Results];

    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Info => "Info",
            DetailTab::Results => "Results",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            DetailTab::Info => DetailTab::Results,
            DetailTab::Results => DetailTab::Info,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl ResultTab {
    pub const ALL: [ResultTab; 2] = [ResultTab::Info, ResultTab::Files];

    pub fn title(&self) -> &'static str {
        match self {
            ResultTab::Info => "Info",
            ResultTab::Files => "Files",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ResultTab::Info => ResultTab::Files,
            ResultTab::Files => ResultTab::Info,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Detail of a model or test.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDetail<T> {
    pub record: Option<T>,
    pub tab: DetailTab,
    pub results: EntityListState<ValidationResult>,
}

impl<T> Default for OwnerDetail<T> {
    fn default() -> Self {
        Self {
            record: None,
            tab: DetailTab::default(),
            results: EntityListState::default(),
        }
    }
}

impl<T> OwnerDetail<T> {
    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    /// Show `record` and start tracking a fresh results request.
    pub fn open(&mut self, record: T) -> u64 {
        self.record = Some(record);
        self.tab = DetailTab::Info;
        self.results = EntityListState {
            status: std::mem::take(&mut self.results.status),
            ..EntityListState::default()
        };
        self.results.status.begin()
    }

    /// Clear the record and invalidate its results request.
    pub fn close(&mut self) {
        self.record = None;
        self.tab = DetailTab::Info;
        self.results.items.clear();
        self.results.selected = 0;
        self.results.status.supersede();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultDetail {
    pub record: Option<ValidationResult>,
    pub tab: ResultTab,
    pub selected_file: usize,
}

impl ResultDetail {
    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }
}

/// Currently selected record per entity kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectedEntityState {
    pub model: OwnerDetail<Model>,
    pub test: OwnerDetail<Test>,
    pub result: ResultDetail,
    /// Single-entity lookup triggered by a location fragment
    pub lookup: RequestStatus,
}

impl SelectedEntityState {
    pub fn is_open(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Model => self.model.is_open(),
            EntityKind::Test => self.test.is_open(),
            EntityKind::Result => self.result.is_open(),
        }
    }

    /// The detail drawn on top: a result over its owner, a test over a model.
    pub fn top(&self) -> Option<EntityKind> {
        [EntityKind::Result, EntityKind::Test, EntityKind::Model]
            .into_iter()
            .find(|kind| self.is_open(*kind))
    }

    /// Results list of the open model or test detail.
    pub fn results(&self, owner: Collection) -> &EntityListState<ValidationResult> {
        match owner {
            Collection::Models => &self.model.results,
            Collection::Tests => &self.test.results,
        }
    }

    pub fn results_mut(&mut self, owner: Collection) -> &mut EntityListState<ValidationResult> {
        match owner {
            Collection::Models => &mut self.model.results,
            Collection::Tests => &mut self.test.results,
        }
    }

    /// Entity shown in the top detail view, cloned for export.
    pub fn top_entity(&self) -> Option<Entity> {
        match self.top()? {
            EntityKind::Result => self.result.record.clone().map(Entity::Result),
            EntityKind::Test => self.test.record.clone().map(Entity::Test),
            EntityKind::Model => self.model.record.clone().map(Entity::Model),
        }
    }
}

/// Collection whose records own results for a detail kind.
pub fn owner_collection(kind: EntityKind) -> Option<Collection> {
    match kind {
        EntityKind::Model => Some(Collection::Models),
        EntityKind::Test => Some(Collection::Tests),
        EntityKind::Result => None,
    }
}
