//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{SqliteTaskStore, TaskDraft, TaskStore};

fn main() {
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    // Exercise the full insert/observe path against a throwaway database so
    // a broken SQLite bundle surfaces here instead of inside the TUI.
    match smoke_roundtrip() {
        Ok(count) => println!("taskdeck_core smoke=ok tasks={count}"),
        Err(err) => {
            eprintln!("taskdeck_core smoke=error: {err}");
            std::process::exit(1);
        }
    }
}

fn smoke_roundtrip() -> Result<usize, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let store = SqliteTaskStore::new(conn)?;
    store.insert(&TaskDraft::new("smoke", None, "Личные"))?;
    Ok(store.observe_all().borrow().len())
}
