//! Main update function - handles state transitions (TEA pattern)

use tracing::debug;

use crate::message::Message;
use crate::state::AppState;

use super::{config, detail, keys, sync, toolbar, RequestSlot, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns an optional action for the event loop to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key),

        Message::Tick => UpdateResult::none(),

        Message::Quit => {
            debug!("Quit requested");
            state.should_quit = true;
            UpdateResult::none()
        }

        Message::Start => detail::handle_start(state),

        // ─────────────────────────────────────────────────────────
        // Remote Lists
        // ─────────────────────────────────────────────────────────
        Message::Refresh(collection) => sync::handle_refresh(state, collection),

        Message::RefreshCollections(collections) => {
            sync::handle_refresh_collections(state, collections)
        }

        Message::ListLoaded { generation, items } => {
            sync::handle_list_loaded(state, generation, items)
        }

        Message::ListFailed {
            collection,
            generation,
            error,
        } => sync::handle_list_failed(state, collection, generation, error),

        // ─────────────────────────────────────────────────────────
        // Detail Views
        // ─────────────────────────────────────────────────────────
        Message::ResolveFragment(fragment) => detail::handle_resolve_fragment(state, &fragment),

        Message::EntitiesResolved {
            token,
            generation,
            entities,
        } => detail::handle_entities_resolved(state, token, generation, entities),

        Message::EntityLookupFailed {
            token,
            generation,
            error,
        } => detail::handle_lookup_failed(state, token, generation, error),

        Message::OpenDetail(entity) => detail::handle_open_detail(state, entity),

        Message::CloseDetail => detail::handle_close_detail(state),

        Message::CancelResults(owner) => UpdateResult::action(UpdateAction::CancelRequest(
            RequestSlot::Results(owner),
        )),

        Message::ResultsLoaded {
            owner,
            generation,
            results,
        } => detail::handle_results_loaded(state, owner, generation, results),

        Message::ResultsFailed {
            owner,
            generation,
            error,
        } => detail::handle_results_failed(state, owner, generation, error),

        Message::DismissError => {
            if state.error_get.take().is_none() {
                state.error_update = None;
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Configuration Dialog
        // ─────────────────────────────────────────────────────────
        Message::OpenConfig => config::handle_open(state),

        Message::CancelConfig => {
            state.config_dialog = None;
            UpdateResult::none()
        }

        Message::ApplyConfig { filters, display } => config::handle_apply(state, filters, display),

        // ─────────────────────────────────────────────────────────
        // Table Toolbar
        // ─────────────────────────────────────────────────────────
        Message::FocusNext => toolbar::handle_focus_next(state),

        Message::ToggleWide => toolbar::handle_toggle_wide(state),

        Message::HideSelected => toolbar::handle_hide_selected(state),

        Message::RestoreHidden => toolbar::handle_restore_hidden(state),

        Message::ExportSelected => toolbar::handle_export_selected(state),

        Message::Exported { path } => {
            state.status_message = Some(format!("Saved {}", path.display()));
            UpdateResult::none()
        }

        Message::ExportFailed { path, error } => {
            state.status_message = Some(format!("Could not write {}: {}", path.display(), error));
            UpdateResult::none()
        }
    }
}
