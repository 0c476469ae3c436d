//! Remote list synchronization
//!
//! Each collection refresh bumps that collection's generation. Completions
//! carrying an older generation were superseded and are dropped.

use tracing::{debug, warn};
use vfb_core::Collection;

use crate::message::{CollectionItems, Message};
use crate::state::AppState;

use super::{RequestSlot, UpdateAction, UpdateResult};

/// Refresh one collection with the current filters.
///
/// Embedded without filters, the list resolves to empty immediately and any
/// request in flight is superseded.
pub(crate) fn handle_refresh(state: &mut AppState, collection: Collection) -> UpdateResult {
    if state.show_introduction() {
        debug!("No filters while embedded, clearing {} without a request", collection);
        match collection {
            Collection::Models => state.models.clear_to_empty(),
            Collection::Tests => state.tests.clear_to_empty(),
        }
        state.error_update = None;
        return UpdateResult::action(UpdateAction::CancelRequest(RequestSlot::List(collection)));
    }

    let generation = state.status_mut(collection).begin();
    debug!("Refreshing {} (generation {})", collection, generation);
    UpdateResult::action(UpdateAction::FetchList {
        collection,
        filters: state.filters.clone(),
        generation,
    })
}

/// Refresh the first collection and queue the rest.
pub(crate) fn handle_refresh_collections(
    state: &mut AppState,
    mut collections: Vec<Collection>,
) -> UpdateResult {
    if collections.is_empty() {
        return UpdateResult::none();
    }
    let first = collections.remove(0);
    let result = handle_refresh(state, first);
    if collections.is_empty() {
        result
    } else {
        result.with_message(Message::RefreshCollections(collections))
    }
}

pub(crate) fn handle_list_loaded(
    state: &mut AppState,
    generation: u64,
    items: CollectionItems,
) -> UpdateResult {
    let collection = items.collection();
    let count = items.len();
    let committed = match items {
        CollectionItems::Models(models) => state.models.commit(generation, models),
        CollectionItems::Tests(tests) => state.tests.commit(generation, tests),
    };
    if committed {
        debug!("Loaded {} {}", count, collection);
    } else {
        debug!(
            "Dropping stale {} response (generation {}, current {})",
            collection,
            generation,
            state.status(collection).generation()
        );
    }
    UpdateResult::none()
}

/// Keep the previous records, record the error and raise the update dialog.
pub(crate) fn handle_list_failed(
    state: &mut AppState,
    collection: Collection,
    generation: u64,
    error: String,
) -> UpdateResult {
    if !state.status_mut(collection).fail(generation, error.clone()) {
        debug!("Dropping stale {} failure (generation {})", collection, generation);
        return UpdateResult::none();
    }
    warn!("Failed to load {}: {}", collection, error);
    state.error_update = Some(error);
    UpdateResult::none()
}
