//! Key event handlers for different UI modes
//!
//! Cursor, tab and dialog-draft changes are view-local and applied in place.
//! Everything that touches filters, the network or the host becomes a
//! follow-up message.

use vfb_core::{Collection, Entity, EntityKind, Record};

use crate::detail_state::{owner_collection, DetailTab, ResultTab};
use crate::input_key::InputKey;
use crate::list_state::EntityListState;
use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::UpdateResult;

/// Rows moved by PageUp/PageDown
const PAGE: usize = 10;

/// Convert key events to state changes and messages based on current UI mode
pub(crate) fn handle_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    if key == InputKey::CharCtrl('c') {
        return UpdateResult::message(Message::Quit);
    }
    let message = match state.ui_mode() {
        UiMode::Error => handle_key_error(key),
        UiMode::Config => handle_key_config(state, key),
        UiMode::Detail(kind) => handle_key_detail(state, kind, key),
        UiMode::Browse => handle_key_browse(state, key),
    };
    match message {
        Some(msg) => UpdateResult::message(msg),
        None => UpdateResult::none(),
    }
}

fn handle_key_error(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char('q' | ' ') => Some(Message::DismissError),
        _ => None,
    }
}

fn handle_key_browse(state: &mut AppState, key: InputKey) -> Option<Message> {
    let focus = state.effective_focus();
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::Tab | InputKey::BackTab => Some(Message::FocusNext),
        InputKey::Char('c') => Some(Message::OpenConfig),
        InputKey::Char('r') => Some(Message::RefreshCollections(state.display.collections())),
        InputKey::Char('w') => Some(Message::ToggleWide),
        InputKey::Char('x') => Some(Message::HideSelected),
        InputKey::Char('u') => Some(Message::RestoreHidden),
        InputKey::Char('s') => Some(Message::ExportSelected),
        InputKey::Enter => match focus {
            Collection::Models => state
                .models
                .selected_record()
                .cloned()
                .map(|m| Message::OpenDetail(Entity::Model(m))),
            Collection::Tests => state
                .tests
                .selected_record()
                .cloned()
                .map(|t| Message::OpenDetail(Entity::Test(t))),
        },
        key => {
            move_table_cursor(state, focus, key);
            None
        }
    }
}

fn move_table_cursor(state: &mut AppState, focus: Collection, key: InputKey) {
    state.focus = focus;
    match focus {
        Collection::Models => navigate(&mut state.models, key),
        Collection::Tests => navigate(&mut state.tests, key),
    }
}

fn navigate<T: Record>(list: &mut EntityListState<T>, key: InputKey) {
    match key {
        k if k.is_down() => list.select_next(),
        k if k.is_up() => list.select_prev(),
        InputKey::Home | InputKey::Char('g') => list.select_first(),
        InputKey::End | InputKey::Char('G') => list.select_last(),
        InputKey::PageDown => (0..PAGE).for_each(|_| list.select_next()),
        InputKey::PageUp => (0..PAGE).for_each(|_| list.select_prev()),
        _ => {}
    }
}

fn handle_key_detail(state: &mut AppState, kind: EntityKind, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => return Some(Message::CloseDetail),
        InputKey::Char('s') => return Some(Message::ExportSelected),
        _ => {}
    }

    let Some(owner) = owner_collection(kind) else {
        handle_key_result_detail(state, key);
        return None;
    };

    let detail_tab = match owner {
        Collection::Models => &mut state.detail.model.tab,
        Collection::Tests => &mut state.detail.test.tab,
    };
    if matches!(
        key,
        InputKey::Tab | InputKey::BackTab | InputKey::Left | InputKey::Right
    ) {
        *detail_tab = detail_tab.toggle();
        return None;
    }
    if *detail_tab != DetailTab::Results {
        return None;
    }

    let results = state.detail.results_mut(owner);
    if key == InputKey::Enter {
        return results
            .selected_record()
            .cloned()
            .map(|r| Message::OpenDetail(Entity::Result(r)));
    }
    navigate(results, key);
    None
}

fn handle_key_result_detail(state: &mut AppState, key: InputKey) {
    let detail = &mut state.detail.result;
    match key {
        InputKey::Tab | InputKey::BackTab | InputKey::Left | InputKey::Right => {
            detail.tab = detail.tab.toggle();
        }
        k if detail.tab == ResultTab::Files && k.is_down() => {
            let count = detail
                .record
                .as_ref()
                .map(|r| r.results_storage.len())
                .unwrap_or_default();
            if detail.selected_file + 1 < count {
                detail.selected_file += 1;
            }
        }
        k if detail.tab == ResultTab::Files && k.is_up() => {
            detail.selected_file = detail.selected_file.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_key_config(state: &mut AppState, key: InputKey) -> Option<Message> {
    let dialog = state.config_dialog.as_mut()?;
    match key {
        InputKey::Esc => Some(Message::CancelConfig),
        InputKey::Enter => {
            if dialog.commit_input() {
                None
            } else {
                Some(Message::ApplyConfig {
                    filters: dialog.filters.clone(),
                    display: dialog.display,
                })
            }
        }
        InputKey::Up | InputKey::BackTab => {
            dialog.prev_row();
            None
        }
        InputKey::Down | InputKey::Tab => {
            dialog.next_row();
            None
        }
        InputKey::Left if dialog.selected_key().is_none() => {
            dialog.cycle_display(false);
            None
        }
        InputKey::Right if dialog.selected_key().is_none() => {
            dialog.cycle_display(true);
            None
        }
        InputKey::Backspace => {
            dialog.backspace();
            None
        }
        InputKey::Delete => {
            dialog.clear_row();
            None
        }
        InputKey::Char(c) => {
            dialog.type_char(c);
            None
        }
        _ => None,
    }
}
