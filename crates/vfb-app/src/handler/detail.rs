//! Fragment resolution and detail views

use tracing::{debug, info, warn};
use vfb_core::{Collection, Entity, EntityKind, Error, FragmentToken, QueryKey, ValidationResult};

use crate::detail_state::ResultDetail;
use crate::message::Message;
use crate::state::AppState;

use super::{RequestSlot, UpdateAction, UpdateResult};

/// Startup: resolve the launch fragment (if any), then load the collections
/// the display shows.
pub(crate) fn handle_start(state: &mut AppState) -> UpdateResult {
    let collections = state.display.collections();
    let result = match state.fragment.clone() {
        Some(fragment) => handle_resolve_fragment(state, &fragment),
        None => UpdateResult::none(),
    };
    result.with_message(Message::RefreshCollections(collections))
}

/// Validate a fragment and issue exactly one lookup for it.
///
/// Malformed fragments fill the get-error slot without touching the network.
pub(crate) fn handle_resolve_fragment(state: &mut AppState, fragment: &str) -> UpdateResult {
    match FragmentToken::parse(fragment) {
        Ok(token) => {
            let generation = state.detail.lookup.begin();
            info!("Resolving {}", token);
            UpdateResult::action(UpdateAction::FetchEntity { token, generation })
        }
        Err(e) => {
            warn!("Rejected fragment {:?}: {}", fragment, e);
            state.error_get = Some(e.to_string());
            UpdateResult::none()
        }
    }
}

/// Anything other than exactly one match is reported as "does not exist".
pub(crate) fn handle_entities_resolved(
    state: &mut AppState,
    token: FragmentToken,
    generation: u64,
    entities: Vec<Entity>,
) -> UpdateResult {
    if !state.detail.lookup.succeed(generation) {
        debug!("Dropping stale lookup for {} (generation {})", token, generation);
        return UpdateResult::none();
    }

    let count = entities.len();
    let mut entities = entities.into_iter();
    match (entities.next(), count) {
        (Some(entity), 1) => {
            state.error_get = None;
            open_detail(state, entity, token.to_string())
        }
        _ => {
            let err = Error::not_found(token.key.as_str(), &token.value);
            warn!("{} matched {} records", token, count);
            state.detail.lookup.error = Some(err.to_string());
            state.error_get = Some(err.to_string());
            UpdateResult::none()
        }
    }
}

pub(crate) fn handle_lookup_failed(
    state: &mut AppState,
    token: FragmentToken,
    generation: u64,
    error: String,
) -> UpdateResult {
    if !state.detail.lookup.fail(generation, error.clone()) {
        debug!("Dropping stale lookup failure for {}", token);
        return UpdateResult::none();
    }
    warn!("Lookup of {} failed: {}", token, error);
    state.error_get = Some(error);
    UpdateResult::none()
}

/// Row selection: open the record and point the fragment at its id.
pub(crate) fn handle_open_detail(state: &mut AppState, entity: Entity) -> UpdateResult {
    let fragment = FragmentToken::new(QueryKey::id_key(entity.kind()), entity.id()).to_string();
    open_detail(state, entity, fragment)
}

fn open_detail(state: &mut AppState, entity: Entity, fragment: String) -> UpdateResult {
    state.fragment = Some(fragment);
    match entity {
        Entity::Model(model) => {
            let replaced = state.detail.test.is_open();
            state.detail.test.close();
            state.detail.result = ResultDetail::default();
            let id = model.id.clone();
            let generation = state.detail.model.open(model);
            let result = UpdateResult::action(UpdateAction::FetchResults {
                owner: Collection::Models,
                id,
                generation,
            });
            if replaced {
                result.with_message(Message::CancelResults(Collection::Tests))
            } else {
                result
            }
        }
        Entity::Test(test) => {
            let replaced = state.detail.model.is_open();
            state.detail.model.close();
            state.detail.result = ResultDetail::default();
            let id = test.id.clone();
            let generation = state.detail.test.open(test);
            let result = UpdateResult::action(UpdateAction::FetchResults {
                owner: Collection::Tests,
                id,
                generation,
            });
            if replaced {
                result.with_message(Message::CancelResults(Collection::Models))
            } else {
                result
            }
        }
        Entity::Result(result) => {
            state.detail.result = ResultDetail {
                record: Some(result),
                ..ResultDetail::default()
            };
            UpdateResult::none()
        }
    }
}

/// Close the topmost detail view, clear the fragment and cancel its results
/// request.
pub(crate) fn handle_close_detail(state: &mut AppState) -> UpdateResult {
    let Some(kind) = state.detail.top() else {
        return UpdateResult::none();
    };
    debug!("Closing {} detail", kind);
    state.fragment = None;
    match kind {
        EntityKind::Result => {
            state.detail.result = ResultDetail::default();
            UpdateResult::none()
        }
        EntityKind::Test => {
            state.detail.test.close();
            UpdateResult::action(UpdateAction::CancelRequest(RequestSlot::Results(
                Collection::Tests,
            )))
        }
        EntityKind::Model => {
            state.detail.model.close();
            UpdateResult::action(UpdateAction::CancelRequest(RequestSlot::Results(
                Collection::Models,
            )))
        }
    }
}

pub(crate) fn handle_results_loaded(
    state: &mut AppState,
    owner: Collection,
    generation: u64,
    results: Vec<ValidationResult>,
) -> UpdateResult {
    let count = results.len();
    if state.detail.results_mut(owner).commit(generation, results) {
        debug!("Loaded {} results for {}", count, owner);
    } else {
        debug!("Dropping stale results for {} (generation {})", owner, generation);
    }
    UpdateResult::none()
}

/// Results errors stay inside the detail's Results tab.
pub(crate) fn handle_results_failed(
    state: &mut AppState,
    owner: Collection,
    generation: u64,
    error: String,
) -> UpdateResult {
    if state
        .detail
        .results_mut(owner)
        .status
        .fail(generation, error.clone())
    {
        warn!("Failed to load results for {}: {}", owner, error);
    } else {
        debug!("Dropping stale results failure for {}", owner);
    }
    UpdateResult::none()
}
