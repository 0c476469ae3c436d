//! Table toolbar: focus, full width, hiding rows and JSON export

use std::path::PathBuf;

use tracing::{debug, warn};
use vfb_core::{Collection, Entity, Record};

use crate::state::{AppState, TableLayout};

use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_focus_next(state: &mut AppState) -> UpdateResult {
    if state.table_layout() == TableLayout::Split {
        state.focus = state.focus.other();
    }
    UpdateResult::none()
}

pub(crate) fn handle_toggle_wide(state: &mut AppState) -> UpdateResult {
    let focus = state.effective_focus();
    let wide = !state.is_wide(focus);
    state.set_wide(focus, wide);
    state.focus = focus;
    UpdateResult::none()
}

pub(crate) fn handle_hide_selected(state: &mut AppState) -> UpdateResult {
    let hidden = match state.effective_focus() {
        Collection::Models => state.models.hide_selected(),
        Collection::Tests => state.tests.hide_selected(),
    };
    if let Some(id) = hidden {
        debug!("Hid {}", id);
        state.status_message = Some("Entry hidden (u to restore)".to_string());
    }
    UpdateResult::none()
}

pub(crate) fn handle_restore_hidden(state: &mut AppState) -> UpdateResult {
    let restored = match state.effective_focus() {
        Collection::Models => state.models.restore_hidden(),
        Collection::Tests => state.tests.restore_hidden(),
    };
    if restored > 0 {
        state.status_message = Some(format!("Restored {} hidden entries", restored));
    }
    UpdateResult::none()
}

/// Export the open detail record, or the selected row when browsing.
pub(crate) fn handle_export_selected(state: &mut AppState) -> UpdateResult {
    let entity = state.detail.top_entity().or_else(|| match state.effective_focus() {
        Collection::Models => state.models.selected_record().cloned().map(Entity::Model),
        Collection::Tests => state.tests.selected_record().cloned().map(Entity::Test),
    });
    let Some(entity) = entity else {
        return UpdateResult::none();
    };

    let (label, json) = match &entity {
        Entity::Model(m) => (m.label().to_string(), m.to_pretty_json()),
        Entity::Test(t) => (t.label().to_string(), t.to_pretty_json()),
        Entity::Result(r) => (r.label().to_string(), r.to_pretty_json()),
    };
    let path = export_path(state, &label);
    match json {
        Ok(json) => UpdateResult::action(UpdateAction::ExportRecord { path, json }),
        Err(e) => {
            warn!("Failed to serialize {}: {}", label, e);
            state.status_message = Some(format!("Could not export {}: {}", label, e));
            UpdateResult::none()
        }
    }
}

fn export_path(state: &AppState, label: &str) -> PathBuf {
    let file_name: String = label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    state.settings.ui.export_dir.join(format!("{file_name}.json"))
}
