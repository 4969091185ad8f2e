//! Terminal front end for taskdeck.
//!
//! Wires paths, logging, the SQLite store and the coordinator together, then
//! hands control to the render loop.

mod run;
mod state;
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use taskdeck_core::db::open_db;
use taskdeck_core::{default_log_level, init_logging, SqliteTaskStore, TaskCoordinator};

fn main() -> anyhow::Result<()> {
    let data_dir = resolve_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;

    // File logging only; the terminal belongs to the UI.
    init_logging(default_log_level(), &data_dir.join("logs")).map_err(anyhow::Error::msg)?;

    // Storage unavailable at startup fails fast with a diagnostic instead of
    // rendering a perpetual empty list.
    let conn = open_db(data_dir.join("taskdeck.sqlite3")).context("opening task database")?;
    let store = Arc::new(SqliteTaskStore::new(conn).context("loading task store")?);

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();
    let coordinator = TaskCoordinator::new(store);

    run::run(coordinator)
}

/// Data directory for the database and logs.
///
/// `TASKDECK_DATA_DIR` overrides the platform-local default, mainly for
/// development and tests.
fn resolve_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(raw) = std::env::var("TASKDECK_DATA_DIR") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::data_local_dir()
        .map(|dir| dir.join("taskdeck"))
        .context("no platform data directory; set TASKDECK_DATA_DIR")
}
