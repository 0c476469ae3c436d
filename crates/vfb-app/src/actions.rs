//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Requests run as tokio tasks and report back through the message channel.
//! Each request slot holds at most one live task; starting a new one aborts
//! its predecessor.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use vfb_client::ValidationApi;
use vfb_core::{Collection, FilterConfiguration, FragmentToken};

use crate::handler::{RequestSlot, UpdateAction};
use crate::host::HostBridge;
use crate::message::{CollectionItems, Message};

/// Live request tasks by slot
#[derive(Debug, Default)]
pub struct RequestTracker {
    handles: HashMap<RequestSlot, AbortHandle>,
}

impl RequestTracker {
    /// Register a task, aborting the one it supersedes.
    pub fn track(&mut self, slot: RequestSlot, handle: AbortHandle) {
        if let Some(previous) = self.handles.insert(slot, handle) {
            if !previous.is_finished() {
                previous.abort();
                debug!("Cancelled superseded {:?} request", slot);
            }
        }
    }

    pub fn cancel(&mut self, slot: RequestSlot) {
        if let Some(handle) = self.handles.remove(&slot) {
            if !handle.is_finished() {
                handle.abort();
                debug!("Cancelled {:?} request", slot);
            }
        }
    }

    pub fn cancel_all(&mut self) {
        let slots: Vec<RequestSlot> = self.handles.keys().copied().collect();
        for slot in slots {
            self.cancel(slot);
        }
    }

    pub fn is_running(&self, slot: RequestSlot) -> bool {
        self.handles
            .get(&slot)
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Everything actions need from the outside world
pub struct ActionContext<A> {
    pub api: Arc<A>,
    pub bridge: HostBridge,
    pub msg_tx: mpsc::Sender<Message>,
    pub tracker: RequestTracker,
}

impl<A> ActionContext<A> {
    pub fn new(api: Arc<A>, bridge: HostBridge, msg_tx: mpsc::Sender<Message>) -> Self {
        Self {
            api,
            bridge,
            msg_tx,
            tracker: RequestTracker::default(),
        }
    }
}

/// Execute an action, spawning a background task where it does I/O
pub fn handle_action<A>(action: UpdateAction, ctx: &mut ActionContext<A>)
where
    A: ValidationApi + Send + Sync + 'static,
{
    let slot = action.slot();
    let handle = match action {
        UpdateAction::FetchList {
            collection,
            filters,
            generation,
        } => spawn_fetch_list(ctx, collection, filters, generation),

        UpdateAction::FetchEntity { token, generation } => {
            spawn_fetch_entity(ctx, token, generation)
        }

        UpdateAction::FetchResults {
            owner,
            id,
            generation,
        } => spawn_fetch_results(ctx, owner, id, generation),

        UpdateAction::CancelRequest(slot) => {
            ctx.tracker.cancel(slot);
            return;
        }

        UpdateAction::NotifyHost { filters, display } => {
            if let Some(filters) = &filters {
                ctx.bridge.notify_filters(filters);
            }
            if let Some(display) = display {
                ctx.bridge.notify_display(display);
            }
            return;
        }

        UpdateAction::ExportRecord { path, json } => {
            spawn_export(ctx.msg_tx.clone(), path, json);
            return;
        }
    };

    if let Some(slot) = slot {
        ctx.tracker.track(slot, handle);
    }
}

fn spawn_fetch_list<A>(
    ctx: &ActionContext<A>,
    collection: Collection,
    filters: FilterConfiguration,
    generation: u64,
) -> AbortHandle
where
    A: ValidationApi + Send + Sync + 'static,
{
    let api = ctx.api.clone();
    let msg_tx = ctx.msg_tx.clone();
    tokio::spawn(async move {
        let result = match collection {
            Collection::Models => api.list_models(&filters).await.map(CollectionItems::Models),
            Collection::Tests => api.list_tests(&filters).await.map(CollectionItems::Tests),
        };
        let msg = match result {
            Ok(items) => Message::ListLoaded { generation, items },
            Err(e) => Message::ListFailed {
                collection,
                generation,
                error: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    })
    .abort_handle()
}

fn spawn_fetch_entity<A>(ctx: &ActionContext<A>, token: FragmentToken, generation: u64) -> AbortHandle
where
    A: ValidationApi + Send + Sync + 'static,
{
    let api = ctx.api.clone();
    let msg_tx = ctx.msg_tx.clone();
    tokio::spawn(async move {
        let msg = match api.find(&token).await {
            Ok(entities) => Message::EntitiesResolved {
                token,
                generation,
                entities,
            },
            Err(e) => Message::EntityLookupFailed {
                token,
                generation,
                error: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    })
    .abort_handle()
}

fn spawn_fetch_results<A>(
    ctx: &ActionContext<A>,
    owner: Collection,
    id: String,
    generation: u64,
) -> AbortHandle
where
    A: ValidationApi + Send + Sync + 'static,
{
    let api = ctx.api.clone();
    let msg_tx = ctx.msg_tx.clone();
    tokio::spawn(async move {
        let msg = match api.results_for(owner, &id).await {
            Ok(results) => Message::ResultsLoaded {
                owner,
                generation,
                results,
            },
            Err(e) => Message::ResultsFailed {
                owner,
                generation,
                error: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    })
    .abort_handle()
}

fn spawn_export(msg_tx: mpsc::Sender<Message>, path: PathBuf, json: String) {
    tokio::spawn(async move {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                warn!("Failed to create {}: {}", dir.display(), e);
            }
        }
        let msg = match tokio::fs::write(&path, json).await {
            Ok(()) => Message::Exported { path },
            Err(e) => {
                warn!("Failed to export to {}: {}", path.display(), e);
                Message::ExportFailed {
                    path,
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::host::testing::RecordingNotifier;
    use vfb_core::prelude::*;
    use vfb_core::{Entity, FilterKey, Model, QueryKey, Test, ValidationResult};

    /// Model lists filtered by species "slow" take far longer than a test.
    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
    }

    impl ValidationApi for FakeApi {
        async fn list_models(&self, filters: &FilterConfiguration) -> Result<Vec<Model>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if filters.get(FilterKey::Species).iter().any(|s| s == "slow") {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Ok(vec![Model {
                id: format!("m{call}"),
                ..Default::default()
            }])
        }

        async fn list_tests(&self, _filters: &FilterConfiguration) -> Result<Vec<Test>> {
            Err(Error::status(503, "/tests/"))
        }

        async fn find(&self, token: &FragmentToken) -> Result<Vec<Entity>> {
            Ok(vec![Entity::Model(Model {
                id: token.value.clone(),
                ..Default::default()
            })])
        }

        async fn results_for(&self, _owner: Collection, _id: &str) -> Result<Vec<ValidationResult>> {
            Ok(Vec::new())
        }
    }

    fn context(embedded: bool) -> (
        ActionContext<FakeApi>,
        mpsc::Receiver<Message>,
        Arc<RecordingNotifier>,
    ) {
        let (tx, rx) = mpsc::channel(16);
        let recorder = Arc::new(RecordingNotifier::default());
        let bridge = HostBridge::new(embedded, recorder.clone());
        (
            ActionContext::new(Arc::new(FakeApi::default()), bridge, tx),
            rx,
            recorder,
        )
    }

    fn fetch_models(generation: u64, species: &str) -> UpdateAction {
        UpdateAction::FetchList {
            collection: Collection::Models,
            filters: FilterConfiguration::new().with(FilterKey::Species, [species]),
            generation,
        }
    }

    #[tokio::test]
    async fn test_new_list_request_aborts_previous() {
        let (mut ctx, mut rx, _) = context(false);

        handle_action(fetch_models(1, "slow"), &mut ctx);
        handle_action(fetch_models(2, "fast"), &mut ctx);

        let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match msg {
            Message::ListLoaded { generation, items } => {
                assert_eq!(generation, 2);
                assert_eq!(items.len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        // The aborted first request never reports back.
        assert!(tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_failure_is_reported_with_generation() {
        let (mut ctx, mut rx, _) = context(false);
        handle_action(
            UpdateAction::FetchList {
                collection: Collection::Tests,
                filters: FilterConfiguration::new(),
                generation: 7,
            },
            &mut ctx,
        );
        match rx.recv().await.unwrap() {
            Message::ListFailed {
                collection,
                generation,
                error,
            } => {
                assert_eq!(collection, Collection::Tests);
                assert_eq!(generation, 7);
                assert!(error.contains("503"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_request_stops_task() {
        let (mut ctx, mut rx, _) = context(false);
        handle_action(fetch_models(1, "slow"), &mut ctx);
        assert!(ctx.tracker.is_running(RequestSlot::List(Collection::Models)));

        handle_action(
            UpdateAction::CancelRequest(RequestSlot::List(Collection::Models)),
            &mut ctx,
        );
        assert!(!ctx.tracker.is_running(RequestSlot::List(Collection::Models)));
        assert!(tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_fetch_entity_reports_matches() {
        let (mut ctx, mut rx, _) = context(false);
        let token = FragmentToken::new(QueryKey::ModelAlias, "CA1");
        handle_action(
            UpdateAction::FetchEntity {
                token: token.clone(),
                generation: 3,
            },
            &mut ctx,
        );
        match rx.recv().await.unwrap() {
            Message::EntitiesResolved {
                token: got,
                generation,
                entities,
            } => {
                assert_eq!(got, token);
                assert_eq!(generation, 3);
                assert_eq!(entities.len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notify_host_goes_through_bridge() {
        let (mut ctx, _rx, recorder) = context(true);
        handle_action(
            UpdateAction::NotifyHost {
                filters: Some(FilterConfiguration::new()),
                display: None,
            },
            &mut ctx,
        );
        assert_eq!(recorder.taken().len(), 1);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("CA1.json");
        let (mut ctx, mut rx, _) = context(false);

        handle_action(
            UpdateAction::ExportRecord {
                path: path.clone(),
                json: "{}".to_string(),
            },
            &mut ctx,
        );
        match rx.recv().await.unwrap() {
            Message::Exported { path: written } => assert_eq!(written, path),
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
