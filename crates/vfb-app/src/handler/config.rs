//! Configuration dialog handlers

use tracing::info;
use vfb_core::{Collection, DisplayMode, FilterConfiguration};

use crate::config_dialog::ConfigDialogState;
use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_open(state: &mut AppState) -> UpdateResult {
    state.config_dialog = Some(ConfigDialogState::new(state.display, state.filters.clone()));
    UpdateResult::none()
}

/// Apply a confirmed configuration.
///
/// - filters changed: notify the host and refresh every shown collection
/// - only display changed: notify the host and refresh the collections the
///   previous display hid
/// - display changed: table width flags reset
pub(crate) fn handle_apply(
    state: &mut AppState,
    filters: FilterConfiguration,
    display: DisplayMode,
) -> UpdateResult {
    state.config_dialog = None;

    let filters_changed = filters != state.filters;
    let display_changed = display != state.display;
    if !filters_changed && !display_changed {
        return UpdateResult::none();
    }

    let previous_display = state.display;
    let refresh: Vec<Collection> = if filters_changed {
        display.collections()
    } else {
        display
            .collections()
            .into_iter()
            .filter(|c| !previous_display.shows(*c))
            .collect()
    };

    if filters_changed {
        info!("Filters changed");
        state.filters = filters;
    }
    if display_changed {
        let new_display = display;
        info!("Display changed: {} -> {}", previous_display, new_display);
        state.display = display;
        state.models.wide = false;
        state.tests.wide = false;
        if !display.shows(state.focus) {
            state.focus = state.focus.other();
        }
    }

    let action = UpdateAction::NotifyHost {
        filters: filters_changed.then(|| state.filters.clone()),
        display: display_changed.then_some(display),
    };

    let result = UpdateResult::action(action);
    if refresh.is_empty() {
        result
    } else {
        result.with_message(Message::RefreshCollections(refresh))
    }
}
