//! Tests for handler module

use super::*;
use crate::detail_state::DetailTab;
use crate::input_key::InputKey;
use crate::message::CollectionItems;
use crate::state::{AppState, UiMode};
use vfb_core::{DisplayMode, Entity, EntityKind, FilterKey, Model, QueryKey, Test, ValidationResult};

const UUID: &str = "0d3d0a53-4b8c-4a5c-9a3e-1f9c2d7b6e10";

fn model(id: &str) -> Model {
    Model {
        id: id.to_string(),
        alias: Some(format!("alias-{id}")),
        name: format!("Model {id}"),
        ..Default::default()
    }
}

fn test_record(id: &str) -> Test {
    Test {
        id: id.to_string(),
        name: format!("Test {id}"),
        ..Default::default()
    }
}

fn embedded_state() -> AppState {
    let mut state = AppState::new();
    state.settings.host.embedded = true;
    state
}

/// Run a message and every follow-up, collecting the actions produced.
fn run(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        actions.extend(result.action);
        msg = result.message;
    }
    actions
}

fn fetch_generation(action: &UpdateAction) -> u64 {
    match action {
        UpdateAction::FetchList { generation, .. } => *generation,
        other => panic!("expected FetchList, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────
// Remote lists
// ─────────────────────────────────────────────────────────

#[test]
fn test_refresh_sets_loading_and_fetches() {
    let mut state = AppState::new();
    state.filters.push(FilterKey::Species, "Mus musculus");

    let result = update(&mut state, Message::Refresh(Collection::Models));

    assert!(state.models.is_loading());
    match result.action {
        Some(UpdateAction::FetchList {
            collection,
            filters,
            ..
        }) => {
            assert_eq!(collection, Collection::Models);
            assert_eq!(filters, state.filters);
        }
        other => panic!("expected FetchList, got {other:?}"),
    }
}

#[test]
fn test_overlapping_refreshes_only_latest_commits() {
    let mut state = AppState::new();
    let first = run(&mut state, Message::Refresh(Collection::Models));
    let second = run(&mut state, Message::Refresh(Collection::Models));
    let g1 = fetch_generation(&first[0]);
    let g2 = fetch_generation(&second[0]);

    update(
        &mut state,
        Message::ListLoaded {
            generation: g2,
            items: CollectionItems::Models(vec![model("second")]),
        },
    );
    update(
        &mut state,
        Message::ListLoaded {
            generation: g1,
            items: CollectionItems::Models(vec![model("first")]),
        },
    );

    assert_eq!(state.models.items.len(), 1);
    assert_eq!(state.models.items[0].id, "second");
    assert!(!state.models.is_loading());
}

#[test]
fn test_stale_failure_does_not_raise_dialog() {
    let mut state = AppState::new();
    let first = run(&mut state, Message::Refresh(Collection::Tests));
    run(&mut state, Message::Refresh(Collection::Tests));

    update(
        &mut state,
        Message::ListFailed {
            collection: Collection::Tests,
            generation: fetch_generation(&first[0]),
            error: "timeout".into(),
        },
    );

    assert!(state.error_update.is_none());
    assert!(state.tests.is_loading());
}

#[test]
fn test_failure_keeps_previous_items() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::Refresh(Collection::Models));
    update(
        &mut state,
        Message::ListLoaded {
            generation: fetch_generation(&actions[0]),
            items: CollectionItems::Models(vec![model("a")]),
        },
    );

    let actions = run(&mut state, Message::Refresh(Collection::Models));
    update(
        &mut state,
        Message::ListFailed {
            collection: Collection::Models,
            generation: fetch_generation(&actions[0]),
            error: "HTTP 500".into(),
        },
    );

    assert_eq!(state.models.items.len(), 1);
    assert_eq!(state.models.status.error.as_deref(), Some("HTTP 500"));
    assert_eq!(state.current_error(), Some(("Error updating data", "HTTP 500")));
    assert_eq!(state.ui_mode(), UiMode::Error);
}

#[test]
fn test_embedded_without_filters_resolves_empty_without_request() {
    let mut state = embedded_state();
    state.models.items = vec![model("old")];

    let actions = run(&mut state, Message::Refresh(Collection::Models));

    assert!(state.models.items.is_empty());
    assert!(!state.models.is_loading());
    assert!(state.models.status.error.is_none());
    assert_eq!(
        actions,
        vec![UpdateAction::CancelRequest(RequestSlot::List(Collection::Models))]
    );
}

#[test]
fn test_embedded_without_filters_clears_update_error() {
    let mut state = embedded_state();
    state.error_update = Some("HTTP 500".into());
    run(&mut state, Message::Refresh(Collection::Models));
    assert!(state.error_update.is_none());
    assert_eq!(state.ui_mode(), UiMode::Browse);
}

#[test]
fn test_embedded_with_filters_fetches() {
    let mut state = embedded_state();
    state.filters.push(FilterKey::BrainRegion, "hippocampus");
    let actions = run(&mut state, Message::Refresh(Collection::Tests));
    assert!(matches!(actions[0], UpdateAction::FetchList { .. }));
}

#[test]
fn test_refresh_collections_fetches_each() {
    let mut state = AppState::new();
    let actions = run(
        &mut state,
        Message::RefreshCollections(vec![Collection::Models, Collection::Tests]),
    );
    let collections: Vec<Collection> = actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::FetchList { collection, .. } => Some(*collection),
            _ => None,
        })
        .collect();
    assert_eq!(collections, vec![Collection::Models, Collection::Tests]);
}

// ─────────────────────────────────────────────────────────
// Fragment resolution
// ─────────────────────────────────────────────────────────

#[test]
fn test_malformed_uuid_fragment_sets_error_without_request() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::ResolveFragment("model_id.not-a-uuid".into()));

    assert!(actions.is_empty());
    let error = state.error_get.as_deref().unwrap_or_default();
    assert!(error.contains("not a valid UUID"));
    assert!(error.contains("not-a-uuid"));
    assert!(!state.detail.lookup.loading);
}

#[test]
fn test_unknown_fragment_key_sets_error_without_request() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::ResolveFragment("bogus_key.123".into()));

    assert!(actions.is_empty());
    let error = state.error_get.as_deref().unwrap_or_default();
    assert!(error.starts_with("URL query parameter must be one of"));
    assert!(error.contains("model_alias"));
}

#[test]
fn test_alias_fragment_issues_exactly_one_lookup() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::ResolveFragment("model_alias.foo".into()));

    assert_eq!(actions.len(), 1);
    match &actions[0] {
        UpdateAction::FetchEntity { token, .. } => {
            assert_eq!(token, &FragmentToken::new(QueryKey::ModelAlias, "foo"));
        }
        other => panic!("expected FetchEntity, got {other:?}"),
    }
    assert!(state.detail.lookup.loading);
}

#[test]
fn test_start_resolves_fragment_then_loads_collections() {
    let mut state = AppState::new();
    state.fragment = Some(format!("test_id.{UUID}"));
    let actions = run(&mut state, Message::Start);

    assert!(matches!(actions[0], UpdateAction::FetchEntity { .. }));
    let lists = actions
        .iter()
        .filter(|a| matches!(a, UpdateAction::FetchList { .. }))
        .count();
    assert_eq!(lists, 2);
}

#[test]
fn test_start_with_only_models_skips_tests() {
    let mut state = AppState::new();
    state.display = DisplayMode::OnlyModels;
    let actions = run(&mut state, Message::Start);

    let collections: Vec<Collection> = actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::FetchList { collection, .. } => Some(*collection),
            _ => None,
        })
        .collect();
    assert_eq!(collections, vec![Collection::Models]);
    assert!(!state.tests.is_loading());
}

#[test]
fn test_successful_resolution_clears_previous_get_error() {
    let mut state = AppState::new();
    state.error_get = Some("Specified model_alias = 'old' does not exist!".into());
    let token = FragmentToken::new(QueryKey::ModelAlias, "CA1");
    let generation = match run(&mut state, Message::ResolveFragment(token.to_string())).pop() {
        Some(UpdateAction::FetchEntity { generation, .. }) => generation,
        other => panic!("expected FetchEntity, got {other:?}"),
    };

    run(
        &mut state,
        Message::EntitiesResolved {
            token,
            generation,
            entities: vec![Entity::Model(model("m1"))],
        },
    );

    assert!(state.error_get.is_none());
    assert!(state.detail.model.is_open());
}

#[test]
fn test_duplicate_alias_reports_not_found() {
    let mut state = AppState::new();
    let token = FragmentToken::new(QueryKey::TestAlias, "dup");
    let generation = match run(&mut state, Message::ResolveFragment(token.to_string())).pop() {
        Some(UpdateAction::FetchEntity { generation, .. }) => generation,
        other => panic!("expected FetchEntity, got {other:?}"),
    };

    let actions = run(
        &mut state,
        Message::EntitiesResolved {
            token,
            generation,
            entities: vec![
                Entity::Test(test_record("t1")),
                Entity::Test(test_record("t2")),
            ],
        },
    );

    assert!(actions.is_empty());
    assert!(!state.detail.test.is_open());
    assert_eq!(
        state.error_get.as_deref(),
        Some("Specified test_alias = 'dup' does not exist!")
    );
}

#[test]
fn test_empty_lookup_reports_not_found() {
    let mut state = AppState::new();
    let token = FragmentToken::new(QueryKey::ModelId, UUID);
    let generation = state.detail.lookup.begin();
    update(
        &mut state,
        Message::EntitiesResolved {
            token,
            generation,
            entities: Vec::new(),
        },
    );
    assert!(state
        .error_get
        .as_deref()
        .unwrap_or_default()
        .ends_with("does not exist!"));
}

#[test]
fn test_single_match_opens_detail_and_fetches_results() {
    let mut state = AppState::new();
    let token = FragmentToken::new(QueryKey::ModelAlias, "alias-m1");
    let generation = state.detail.lookup.begin();

    let actions = run(
        &mut state,
        Message::EntitiesResolved {
            token,
            generation,
            entities: vec![Entity::Model(model("m1"))],
        },
    );

    assert_eq!(state.ui_mode(), UiMode::Detail(EntityKind::Model));
    assert_eq!(state.fragment.as_deref(), Some("model_alias.alias-m1"));
    assert!(state.detail.model.results.is_loading());
    assert!(matches!(
        &actions[0],
        UpdateAction::FetchResults { owner: Collection::Models, id, .. } if id == "m1"
    ));
}

#[test]
fn test_lookup_failure_sets_get_error() {
    let mut state = AppState::new();
    let token = FragmentToken::new(QueryKey::TestAlias, "x");
    let generation = state.detail.lookup.begin();
    update(
        &mut state,
        Message::EntityLookupFailed {
            token,
            generation,
            error: "connection refused".into(),
        },
    );
    assert_eq!(
        state.current_error(),
        Some(("Error retrieving data", "connection refused"))
    );
}

// ─────────────────────────────────────────────────────────
// Detail views
// ─────────────────────────────────────────────────────────

#[test]
fn test_open_detail_sets_id_fragment() {
    let mut state = AppState::new();
    run(&mut state, Message::OpenDetail(Entity::Test(test_record("t9"))));
    assert_eq!(state.fragment.as_deref(), Some("test_id.t9"));
    assert!(state.detail.test.is_open());
}

#[test]
fn test_opening_test_closes_model_detail() {
    let mut state = AppState::new();
    run(&mut state, Message::OpenDetail(Entity::Model(model("m1"))));
    let actions = run(&mut state, Message::OpenDetail(Entity::Test(test_record("t1"))));
    assert!(!state.detail.model.is_open());
    assert_eq!(state.detail.top(), Some(EntityKind::Test));

    // The replaced model detail's results request is cancelled
    assert_eq!(actions.len(), 2);
    assert!(matches!(
        actions[0],
        UpdateAction::FetchResults {
            owner: Collection::Tests,
            ..
        }
    ));
    assert_eq!(
        actions[1],
        UpdateAction::CancelRequest(RequestSlot::Results(Collection::Models))
    );
}

#[test]
fn test_opening_first_detail_cancels_nothing() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::OpenDetail(Entity::Model(model("m1"))));
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], UpdateAction::FetchResults { .. }));
}

#[test]
fn test_close_detail_clears_fragment_and_cancels_results() {
    let mut state = AppState::new();
    run(&mut state, Message::OpenDetail(Entity::Model(model("m1"))));

    let actions = run(&mut state, Message::CloseDetail);

    assert!(state.fragment.is_none());
    assert_eq!(state.ui_mode(), UiMode::Browse);
    assert_eq!(
        actions,
        vec![UpdateAction::CancelRequest(RequestSlot::Results(Collection::Models))]
    );
}

#[test]
fn test_result_detail_closes_before_owner() {
    let mut state = AppState::new();
    run(&mut state, Message::OpenDetail(Entity::Model(model("m1"))));
    run(
        &mut state,
        Message::OpenDetail(Entity::Result(ValidationResult {
            id: "r1".into(),
            ..Default::default()
        })),
    );
    assert_eq!(state.ui_mode(), UiMode::Detail(EntityKind::Result));

    assert!(run(&mut state, Message::CloseDetail).is_empty());
    assert_eq!(state.ui_mode(), UiMode::Detail(EntityKind::Model));
}

#[test]
fn test_stale_results_are_dropped() {
    let mut state = AppState::new();
    let first = run(&mut state, Message::OpenDetail(Entity::Model(model("m1"))));
    let g1 = match &first[0] {
        UpdateAction::FetchResults { generation, .. } => *generation,
        other => panic!("expected FetchResults, got {other:?}"),
    };
    run(&mut state, Message::OpenDetail(Entity::Model(model("m2"))));

    update(
        &mut state,
        Message::ResultsLoaded {
            owner: Collection::Models,
            generation: g1,
            results: vec![ValidationResult::default()],
        },
    );
    assert!(state.detail.model.results.items.is_empty());
    assert!(state.detail.model.results.is_loading());
}

#[test]
fn test_results_failure_stays_in_detail() {
    let mut state = AppState::new();
    let actions = run(&mut state, Message::OpenDetail(Entity::Test(test_record("t1"))));
    let generation = match &actions[0] {
        UpdateAction::FetchResults { generation, .. } => *generation,
        other => panic!("expected FetchResults, got {other:?}"),
    };

    update(
        &mut state,
        Message::ResultsFailed {
            owner: Collection::Tests,
            generation,
            error: "HTTP 502".into(),
        },
    );
    assert!(state.error_update.is_none());
    assert_eq!(
        state.detail.test.results.status.error.as_deref(),
        Some("HTTP 502")
    );
}

#[test]
fn test_dismiss_error_clears_get_error_first() {
    let mut state = AppState::new();
    state.error_get = Some("get".into());
    state.error_update = Some("update".into());

    update(&mut state, Message::DismissError);
    assert!(state.error_get.is_none());
    assert!(state.error_update.is_some());

    update(&mut state, Message::DismissError);
    assert_eq!(state.ui_mode(), UiMode::Browse);
}

// ─────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────

#[test]
fn test_apply_unchanged_config_does_nothing() {
    let mut state = AppState::new();
    update(&mut state, Message::OpenConfig);
    let message = Message::ApplyConfig {
        filters: state.filters.clone(),
        display: state.display,
    };
    let actions = run(&mut state, message);
    assert!(actions.is_empty());
    assert!(state.config_dialog.is_none());
}

#[test]
fn test_apply_filters_notifies_host_and_refreshes_shown() {
    let mut state = AppState::new();
    let filters = FilterConfiguration::new().with(FilterKey::Species, ["Rattus norvegicus"]);

    let actions = run(
        &mut state,
        Message::ApplyConfig {
            filters: filters.clone(),
            display: DisplayMode::OnlyTests,
        },
    );

    assert_eq!(
        actions[0],
        UpdateAction::NotifyHost {
            filters: Some(filters.clone()),
            display: Some(DisplayMode::OnlyTests),
        }
    );
    let refreshed: Vec<Collection> = actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::FetchList { collection, .. } => Some(*collection),
            _ => None,
        })
        .collect();
    assert_eq!(refreshed, vec![Collection::Tests]);
    assert_eq!(state.filters, filters);
    assert_eq!(state.focus, Collection::Tests);
}

#[test]
fn test_apply_display_only_refreshes_newly_shown() {
    let mut state = AppState::new();
    state.display = DisplayMode::OnlyModels;
    state.models.wide = true;

    let message = Message::ApplyConfig {
        filters: state.filters.clone(),
        display: DisplayMode::ModelsAndTests,
    };
    let actions = run(&mut state, message);

    assert_eq!(
        actions[0],
        UpdateAction::NotifyHost {
            filters: None,
            display: Some(DisplayMode::ModelsAndTests),
        }
    );
    assert_eq!(actions.len(), 2);
    assert!(matches!(
        actions[1],
        UpdateAction::FetchList { collection: Collection::Tests, .. }
    ));
    assert!(!state.models.wide);
}

#[test]
fn test_narrowing_display_refreshes_nothing() {
    let mut state = AppState::new();
    let message = Message::ApplyConfig {
        filters: state.filters.clone(),
        display: DisplayMode::OnlyModels,
    };
    let actions = run(&mut state, message);
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], UpdateAction::NotifyHost { .. }));
}

#[test]
fn test_clearing_filters_while_embedded_shows_introduction() {
    let mut state = embedded_state();
    state.filters.push(FilterKey::CellType, "pyramidal cell");
    state.models.items = vec![model("a")];

    let message = Message::ApplyConfig {
        filters: FilterConfiguration::new(),
        display: state.display,
    };
    let actions = run(&mut state, message);

    assert!(state.show_introduction());
    assert!(state.models.items.is_empty());
    assert!(!actions
        .iter()
        .any(|a| matches!(a, UpdateAction::FetchList { .. })));
}

// ─────────────────────────────────────────────────────────
// Toolbar
// ─────────────────────────────────────────────────────────

#[test]
fn test_export_selected_row() {
    let mut state = AppState::new();
    state.settings.ui.export_dir = "/tmp/vfb".into();
    state.models.items = vec![model("m1")];

    let result = update(&mut state, Message::ExportSelected);
    match result.action {
        Some(UpdateAction::ExportRecord { path, json }) => {
            assert_eq!(path, std::path::PathBuf::from("/tmp/vfb/alias-m1.json"));
            assert!(json.contains("\"id\": \"m1\""));
        }
        other => panic!("expected ExportRecord, got {other:?}"),
    }
}

#[test]
fn test_hide_and_restore_set_status() {
    let mut state = AppState::new();
    state.models.items = vec![model("a"), model("b")];
    update(&mut state, Message::HideSelected);
    assert_eq!(state.models.visible_len(), 1);
    update(&mut state, Message::RestoreHidden);
    assert_eq!(state.models.visible_len(), 2);
    assert_eq!(state.status_message.as_deref(), Some("Restored 1 hidden entries"));
}

#[test]
fn test_focus_next_only_when_split() {
    let mut state = AppState::new();
    update(&mut state, Message::FocusNext);
    assert_eq!(state.focus, Collection::Tests);

    update(&mut state, Message::ToggleWide);
    assert!(state.tests.wide);
    update(&mut state, Message::FocusNext);
    assert_eq!(state.effective_focus(), Collection::Tests);
}

// ─────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let mut state = AppState::new();
    state.error_update = Some("x".into());
    run(&mut state, Message::Key(InputKey::CharCtrl('c')));
    assert!(state.should_quit);
}

#[test]
fn test_enter_opens_selected_row() {
    let mut state = AppState::new();
    state.models.items = vec![model("a"), model("b")];
    run(&mut state, Message::Key(InputKey::Down));
    run(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(
        state.detail.model.record.as_ref().map(|m| m.id.as_str()),
        Some("b")
    );
}

#[test]
fn test_detail_tab_toggles() {
    let mut state = AppState::new();
    run(&mut state, Message::OpenDetail(Entity::Model(model("a"))));
    run(&mut state, Message::Key(InputKey::Tab));
    assert_eq!(state.detail.model.tab, DetailTab::Results);
    run(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.ui_mode(), UiMode::Browse);
}

#[test]
fn test_config_dialog_typing_and_apply() {
    let mut state = AppState::new();
    run(&mut state, Message::Key(InputKey::Char('c')));
    assert_eq!(state.ui_mode(), UiMode::Config);

    run(&mut state, Message::Key(InputKey::Down));
    for c in "Mus musculus".chars() {
        run(&mut state, Message::Key(InputKey::Char(c)));
    }
    // First Enter adds the typed value, second applies.
    run(&mut state, Message::Key(InputKey::Enter));
    assert!(state.filters.is_empty());
    let actions = run(&mut state, Message::Key(InputKey::Enter));

    assert_eq!(state.filters.get(FilterKey::Species), &["Mus musculus".to_string()]);
    assert!(matches!(actions[0], UpdateAction::NotifyHost { .. }));
    assert_eq!(state.ui_mode(), UiMode::Browse);
}

#[test]
fn test_escape_cancels_config() {
    let mut state = AppState::new();
    run(&mut state, Message::Key(InputKey::Char('c')));
    run(&mut state, Message::Key(InputKey::Down));
    run(&mut state, Message::Key(InputKey::Char('z')));
    run(&mut state, Message::Key(InputKey::Esc));
    assert!(state.config_dialog.is_none());
    assert!(state.filters.is_empty());
}

#[test]
fn test_error_dialog_swallows_browse_keys() {
    let mut state = AppState::new();
    state.error_get = Some("boom".into());
    run(&mut state, Message::Key(InputKey::Char('q')));
    assert!(!state.should_quit);
    assert!(state.error_get.is_none());
}
