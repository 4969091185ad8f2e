//! Task coordinator: store observation and command dispatch.
//!
//! # Responsibility
//! - Forward store snapshots into [`UiState`] for the lifetime of the
//!   coordinator.
//! - Run add/update/delete commands off the render loop, fire-and-forget.
//!
//! # Invariants
//! - `categories` is seeded once and never touched by observation.
//! - Commands do not mutate state optimistically; the UI changes only when
//!   the store publishes the new snapshot.
//! - All spawned work is aborted together when the coordinator drops.

use std::sync::Arc;

use log::error;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::model::task::{Task, TaskDraft, DEFAULT_CATEGORIES};
use crate::store::task_store::TaskStore;

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// All tasks as last observed from the store, in insertion order.
    pub tasks: Vec<Task>,
    /// Fixed ordered category labels.
    pub categories: Vec<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|label| (*label).to_string())
                .collect(),
        }
    }
}

/// Mediates between a [`TaskStore`] and the presentation layer.
///
/// Must be created inside a Tokio runtime context; observation and commands
/// run as runtime tasks. Store calls are synchronous SQLite work, so
/// commands go through blocking tasks.
pub struct TaskCoordinator<S: TaskStore> {
    store: Arc<S>,
    state_rx: watch::Receiver<UiState>,
    ops: JoinSet<()>,
}

impl<S: TaskStore> TaskCoordinator<S> {
    /// Starts observing the store; the held state carries the store's
    /// current snapshot before the first `await` on the returned handle.
    pub fn new(store: Arc<S>) -> Self {
        let (state_tx, state_rx) = watch::channel(UiState::default());
        let mut ops = JoinSet::new();

        let mut store_rx = store.observe_all();
        ops.spawn(async move {
            loop {
                let tasks = store_rx.borrow_and_update().clone();
                state_tx.send_modify(|state| state.tasks = tasks);
                if store_rx.changed().await.is_err() {
                    break;
                }
            }
        });

        Self {
            store,
            state_rx,
            ops,
        }
    }

    /// Returns a subscription to the held UI state.
    pub fn state(&self) -> watch::Receiver<UiState> {
        self.state_rx.clone()
    }

    /// Requests creation of a new task. Returns immediately; the UI updates
    /// once the store publishes the new snapshot.
    pub fn add_task(&mut self, draft: TaskDraft) {
        let store = Arc::clone(&self.store);
        self.ops.spawn_blocking(move || {
            if let Err(err) = store.insert(&draft) {
                error!("event=task_insert module=coordinator status=error error={err}");
            }
        });
    }

    /// Requests replacement of an existing record with `task`.
    pub fn update_task(&mut self, task: Task) {
        let store = Arc::clone(&self.store);
        self.ops.spawn_blocking(move || {
            if let Err(err) = store.update(&task) {
                error!(
                    "event=task_update module=coordinator status=error id={} error={err}",
                    task.id
                );
            }
        });
    }

    /// Requests removal of the record matching `task`'s identity.
    pub fn delete_task(&mut self, task: Task) {
        let store = Arc::clone(&self.store);
        self.ops.spawn_blocking(move || {
            if let Err(err) = store.delete(&task) {
                error!(
                    "event=task_delete module=coordinator status=error id={} error={err}",
                    task.id
                );
            }
        });
    }
}
