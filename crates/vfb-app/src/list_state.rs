//! Per-collection list state with request supersession
//!
//! Every request is tagged with a generation drawn from [`RequestStatus`].
//! Only a completion carrying the latest generation may change the list;
//! anything older was superseded and is dropped.

use std::collections::HashSet;

use vfb_core::Record;

/// Loading/error bookkeeping for one request slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl RequestStatus {
    /// Start a request: sets loading, clears the error and returns the new
    /// generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Invalidate any in-flight request without starting a new one.
    pub fn supersede(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Mark a successful completion. Returns false for stale generations.
    pub fn succeed(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loading = false;
        self.error = None;
        true
    }

    /// Mark a failed completion. Returns false for stale generations.
    pub fn fail(&mut self, generation: u64, error: impl Into<String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loading = false;
        self.error = Some(error.into());
        true
    }
}

/// Records of one collection plus table view state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityListState<T> {
    pub items: Vec<T>,
    pub status: RequestStatus,
    /// Cursor into the visible (non-hidden) rows
    pub selected: usize,
    /// Ids hidden from the table by the user
    pub hidden: HashSet<String>,
    /// Table takes the full width
    pub wide: bool,
}

impl<T> Default for EntityListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: RequestStatus::default(),
            selected: 0,
            hidden: HashSet::new(),
            wide: false,
        }
    }
}

impl<T: Record> EntityListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status.loading
    }

    /// Store the records of a current completion verbatim.
    pub fn commit(&mut self, generation: u64, items: Vec<T>) -> bool {
        if !self.status.succeed(generation) {
            return false;
        }
        self.items = items;
        self.clamp_selection();
        true
    }

    /// Resolve to an empty list with no request outstanding.
    pub fn clear_to_empty(&mut self) {
        self.status.supersede();
        self.status.error = None;
        self.items.clear();
        self.selected = 0;
    }

    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| !self.hidden.contains(item.id()))
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    pub fn selected_record(&self) -> Option<&T> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_len().saturating_sub(1);
    }

    /// Hide the selected row. Returns the hidden id.
    pub fn hide_selected(&mut self) -> Option<String> {
        let id = self.selected_record()?.id().to_string();
        self.hidden.insert(id.clone());
        self.clamp_selection();
        Some(id)
    }

    /// Show every hidden row again. Returns how many were restored.
    pub fn restore_hidden(&mut self) -> usize {
        let count = self.hidden.len();
        self.hidden.clear();
        count
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfb_core::Model;

    fn model(id: &str) -> Model {
        Model {
            id: id.to_string(),
            name: format!("Model {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut status = RequestStatus::default();
        let g1 = status.begin();
        assert!(status.fail(g1, "boom"));
        assert_eq!(status.error.as_deref(), Some("boom"));

        let g2 = status.begin();
        assert!(status.loading);
        assert!(status.error.is_none());
        assert!(g2 > g1);
    }

    #[test]
    fn test_only_latest_generation_commits() {
        let mut list = EntityListState::<Model>::new();
        let first = list.status.begin();
        let second = list.status.begin();

        assert!(list.commit(second, vec![model("b")]));
        assert!(!list.commit(first, vec![model("a")]));
        assert_eq!(list.items[0].id, "b");
        assert!(!list.is_loading());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut list = EntityListState::<Model>::new();
        let first = list.status.begin();
        let _second = list.status.begin();
        assert!(!list.status.fail(first, "late error"));
        assert!(list.status.error.is_none());
        assert!(list.is_loading());
    }

    #[test]
    fn test_clear_to_empty_supersedes_in_flight() {
        let mut list = EntityListState::<Model>::new();
        list.items = vec![model("a")];
        let g = list.status.begin();
        list.clear_to_empty();

        assert!(list.items.is_empty());
        assert!(!list.is_loading());
        assert!(!list.commit(g, vec![model("late")]));
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_hide_and_restore() {
        let mut list = EntityListState::<Model>::new();
        let g = list.status.begin();
        list.commit(g, vec![model("a"), model("b"), model("c")]);

        list.select_last();
        assert_eq!(list.hide_selected().as_deref(), Some("c"));
        assert_eq!(list.visible_len(), 2);
        assert_eq!(list.selected_record().map(|m| m.id.as_str()), Some("b"));

        assert_eq!(list.restore_hidden(), 1);
        assert_eq!(list.visible_len(), 3);
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut list = EntityListState::<Model>::new();
        list.select_next();
        assert_eq!(list.selected, 0);

        let g = list.status.begin();
        list.commit(g, vec![model("a"), model("b")]);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, 1);
        list.select_prev();
        list.select_prev();
        assert_eq!(list.selected, 0);
    }
}
