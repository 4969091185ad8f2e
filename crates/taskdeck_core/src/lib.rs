//! Core domain logic for taskdeck.
//! This crate is the single source of truth for the task list's behavior.

pub mod coordinator;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use coordinator::task_coordinator::{TaskCoordinator, UiState};
pub use logging::{default_log_level, init_logging};
pub use model::task::{Task, TaskDraft, TaskId, DEFAULT_CATEGORIES};
pub use store::memory::MemoryTaskStore;
pub use store::task_store::{SqliteTaskStore, StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
