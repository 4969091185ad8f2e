use std::sync::Arc;
use std::time::Duration;

use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    MemoryTaskStore, SqliteTaskStore, TaskCoordinator, TaskDraft, TaskStore, UiState,
    DEFAULT_CATEGORIES,
};
use tokio::sync::watch;
use tokio::time::timeout;

const SETTLE: Duration = Duration::from_secs(2);

fn draft(title: &str, category: &str) -> TaskDraft {
    TaskDraft::new(title, None, category)
}

async fn wait_until(
    rx: &mut watch::Receiver<UiState>,
    predicate: impl Fn(&UiState) -> bool,
) -> UiState {
    timeout(SETTLE, async {
        loop {
            {
                let state = rx.borrow_and_update();
                if predicate(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("state channel closed while waiting");
        }
    })
    .await
    .expect("state did not settle in time")
}

#[tokio::test(flavor = "multi_thread")]
async fn initial_state_has_fixed_categories_and_no_tasks() {
    let coordinator = TaskCoordinator::new(Arc::new(MemoryTaskStore::new()));
    let mut rx = coordinator.state();

    let state = wait_until(&mut rx, |state| state.tasks.is_empty()).await;
    assert_eq!(state.categories, DEFAULT_CATEGORIES);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_task_reaches_state_only_through_store_observation() {
    let store = Arc::new(MemoryTaskStore::new());
    let mut coordinator = TaskCoordinator::new(Arc::clone(&store));
    let mut rx = coordinator.state();

    coordinator.add_task(draft("Buy milk", "Личные"));

    let state = wait_until(&mut rx, |state| state.tasks.len() == 1).await;
    assert_eq!(state.tasks[0].title, "Buy milk");
    assert_eq!(state.tasks[0].category, "Личные");
    assert!(!state.tasks[0].is_completed);
    // Observation replaces tasks only; categories stay fixed.
    assert_eq!(state.categories, DEFAULT_CATEGORIES);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_twice_is_idempotent_through_the_coordinator() {
    let store = Arc::new(MemoryTaskStore::new());
    let mut coordinator = TaskCoordinator::new(Arc::clone(&store));
    let mut rx = coordinator.state();

    coordinator.add_task(draft("flip", "Важные"));
    let state = wait_until(&mut rx, |state| state.tasks.len() == 1).await;
    let original = state.tasks[0].clone();

    coordinator.update_task(original.toggled());
    let state = wait_until(&mut rx, |state| state.tasks[0].is_completed).await;

    coordinator.update_task(state.tasks[0].toggled());
    let state = wait_until(&mut rx, |state| !state.tasks[0].is_completed).await;
    assert_eq!(state.tasks[0], original);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_update_is_abandoned_and_state_stays_consistent() {
    let store = Arc::new(MemoryTaskStore::new());
    let mut coordinator = TaskCoordinator::new(Arc::clone(&store));
    let mut rx = coordinator.state();

    coordinator.add_task(draft("real", "Личные"));
    let state = wait_until(&mut rx, |state| state.tasks.len() == 1).await;

    // Update against an identity the store never assigned fails inside the
    // store; the last observed state remains untouched.
    let mut phantom = state.tasks[0].clone();
    phantom.id += 100;
    coordinator.update_task(phantom);

    coordinator.add_task(draft("after failure", "Личные"));
    let state = wait_until(&mut rx, |state| state.tasks.len() == 2).await;
    assert_eq!(state.tasks[0].title, "real");
    assert!(!state.tasks[0].is_completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_the_coordinator_stops_state_updates() {
    let store = Arc::new(MemoryTaskStore::new());
    let coordinator = TaskCoordinator::new(Arc::clone(&store));
    let mut rx = coordinator.state();
    wait_until(&mut rx, |state| state.tasks.is_empty()).await;

    drop(coordinator);

    // The observation task is aborted with the coordinator; the state channel
    // closes instead of delivering this write.
    store.insert(&draft("too late", "Личные")).unwrap();
    let closed = timeout(SETTLE, async {
        loop {
            if rx.changed().await.is_err() {
                return true;
            }
        }
    })
    .await
    .expect("state channel should close after teardown");
    assert!(closed);
    assert!(rx.borrow().tasks.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn full_scenario_walk_against_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let store = Arc::new(SqliteTaskStore::new(conn).unwrap());
    let mut coordinator = TaskCoordinator::new(Arc::clone(&store));
    let mut rx = coordinator.state();

    // Empty store: nothing to render but the fixed categories.
    let state = wait_until(&mut rx, |state| state.tasks.is_empty()).await;
    assert_eq!(state.categories, DEFAULT_CATEGORIES);

    coordinator.add_task(draft("Buy milk", "Личные"));
    let state = wait_until(&mut rx, |state| state.tasks.len() == 1).await;
    assert_eq!(state.tasks[0].title, "Buy milk");
    assert!(!state.tasks[0].is_completed);

    coordinator.update_task(state.tasks[0].toggled());
    let state = wait_until(&mut rx, |state| state.tasks[0].is_completed).await;

    coordinator.delete_task(state.tasks[0].clone());
    wait_until(&mut rx, |state| state.tasks.is_empty()).await;
}
