//! In-memory task store stub.
//!
//! # Responsibility
//! - Satisfy the [`TaskStore`] contract without a database, for coordinator
//!   and presentation tests.
//!
//! # Invariants
//! - Assigned ids are monotonically increasing and never reused, matching
//!   SQLite rowid behavior.

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::model::task::{Task, TaskDraft, TaskId};
use crate::store::task_store::{StoreError, StoreResult, TaskStore};

/// Contract stub holding tasks in a plain vector.
pub struct MemoryTaskStore {
    inner: Mutex<MemoryState>,
    snapshot: watch::Sender<Vec<Task>>,
}

struct MemoryState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(MemoryState {
                tasks: Vec::new(),
                next_id: 1,
            }),
            snapshot,
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryTaskStore {
    fn observe_all(&self) -> watch::Receiver<Vec<Task>> {
        self.snapshot.subscribe()
    }

    fn insert(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        let mut state = self.inner.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.push(draft.clone().into_task(id));
        self.snapshot.send_replace(state.tasks.clone());
        Ok(id)
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.inner.lock();
        let slot = state
            .tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or(StoreError::NotFound(task.id))?;
        *slot = task.clone();
        self.snapshot.send_replace(state.tasks.clone());
        Ok(())
    }

    fn delete(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.inner.lock();
        let before = state.tasks.len();
        state.tasks.retain(|existing| existing.id != task.id);
        if state.tasks.len() != before {
            self.snapshot.send_replace(state.tasks.clone());
        }
        Ok(())
    }
}
