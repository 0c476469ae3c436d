//! Configuration dialog state
//!
//! Edits a draft of the display mode and filters. Nothing is applied until
//! the user confirms, so cancelling leaves the live configuration untouched.

use vfb_core::{DisplayMode, FilterConfiguration, FilterKey, SETTINGS_DELIMITER};

/// Row 0 is the display mode; rows 1.. are the filter keys in declared order.
pub const ROW_COUNT: usize = FilterKey::COUNT + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDialogState {
    pub display: DisplayMode,
    pub filters: FilterConfiguration,
    pub row: usize,
    /// Text typed for the selected filter key, not yet added
    pub input: String,
}

impl ConfigDialogState {
    pub fn new(display: DisplayMode, filters: FilterConfiguration) -> Self {
        Self {
            display,
            filters,
            row: 0,
            input: String::new(),
        }
    }

    /// Filter key of the selected row, `None` on the display row.
    pub fn selected_key(&self) -> Option<FilterKey> {
        self.row
            .checked_sub(1)
            .and_then(|i| FilterKey::ALL.get(i).copied())
    }

    pub fn next_row(&mut self) {
        self.row = (self.row + 1) % ROW_COUNT;
        self.input.clear();
    }

    pub fn prev_row(&mut self) {
        self.row = (self.row + ROW_COUNT - 1) % ROW_COUNT;
        self.input.clear();
    }

    pub fn cycle_display(&mut self, forward: bool) {
        self.display = if forward {
            self.display.next()
        } else {
            self.display.prev()
        };
    }

    pub fn type_char(&mut self, c: char) {
        if self.selected_key().is_some() {
            self.input.push(c);
        }
    }

    /// Add the typed value(s) to the selected key. Input is split on the
    /// settings delimiter; blank parts are skipped. Returns true when
    /// anything was pending.
    pub fn commit_input(&mut self) -> bool {
        let Some(key) = self.selected_key() else {
            return false;
        };
        if self.input.trim().is_empty() {
            self.input.clear();
            return false;
        }
        for part in self.input.split(SETTINGS_DELIMITER) {
            let part = part.trim();
            if !part.is_empty() {
                self.filters.push(key, part);
            }
        }
        self.input.clear();
        true
    }

    /// Delete a typed character, or the last value when nothing is typed.
    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            return;
        }
        if let Some(key) = self.selected_key() {
            let mut values = self.filters.get(key).to_vec();
            values.pop();
            self.filters.set(key, values);
        }
    }

    /// Remove every value of the selected key.
    pub fn clear_row(&mut self) {
        self.input.clear();
        if let Some(key) = self.selected_key() {
            self.filters.set(key, Vec::new());
        }
    }
}
