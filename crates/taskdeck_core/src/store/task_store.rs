//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the observe/insert/update/delete surface over `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes re-query the full table and publish the snapshot before
//!   returning, so observers never see a stale acknowledged write.
//! - Read paths reject invalid persisted state instead of masking it.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::info;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use tokio::sync::watch;

use crate::db::DbError;
use crate::model::task::{Task, TaskDraft, TaskId};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    is_completed
FROM tasks
ORDER BY id ASC";

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic store error for task persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store contract consumed by the coordinator.
///
/// The store assigns identity on insert and publishes a fresh complete
/// snapshot to every observer after each acknowledged write. Title
/// validation belongs to the presentation layer; the store persists drafts
/// as given.
pub trait TaskStore: Send + Sync + 'static {
    /// Returns a live view of all tasks in stable insertion order.
    ///
    /// The receiver already holds the current snapshot; every subsequent
    /// write publishes a new one.
    fn observe_all(&self) -> watch::Receiver<Vec<Task>>;

    /// Assigns identity, persists the draft and publishes the snapshot.
    fn insert(&self, draft: &TaskDraft) -> StoreResult<TaskId>;

    /// Replaces the full record matching `task.id`.
    ///
    /// Returns [`StoreError::NotFound`] when no such record exists.
    fn update(&self, task: &Task) -> StoreResult<()>;

    /// Removes the record matching `task.id`.
    ///
    /// Deleting an absent record is a logged no-op, not an error; the caller
    /// never distinguishes that case.
    fn delete(&self, task: &Task) -> StoreResult<()>;
}

/// SQLite-backed task store.
///
/// The connection sits behind a mutex; each write holds the lock across the
/// mutation and the snapshot re-query, so published snapshots are serialized
/// in write order.
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
    snapshot: watch::Sender<Vec<Task>>,
}

impl SqliteTaskStore {
    /// Wraps a bootstrapped connection and seeds the snapshot channel with
    /// the current table contents.
    pub fn new(conn: Connection) -> StoreResult<Self> {
        let initial = list_all(&conn)?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self {
            conn: Mutex::new(conn),
            snapshot,
        })
    }

    fn publish(&self, conn: &Connection) -> StoreResult<()> {
        let tasks = list_all(conn)?;
        self.snapshot.send_replace(tasks);
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn observe_all(&self) -> watch::Receiver<Vec<Task>> {
        self.snapshot.subscribe()
    }

    fn insert(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO tasks (title, description, category, is_completed)
             VALUES (?1, ?2, ?3, 0);",
            params![
                draft.title.as_str(),
                draft.description.as_deref(),
                draft.category.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        self.publish(&conn)?;

        info!("event=task_insert module=store status=ok id={id}");
        Ok(id)
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                category = ?3,
                is_completed = ?4
             WHERE id = ?5;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                task.category.as_str(),
                i64::from(task.is_completed),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(task.id));
        }
        self.publish(&conn)?;

        info!(
            "event=task_update module=store status=ok id={} completed={}",
            task.id, task.is_completed
        );
        Ok(())
    }

    fn delete(&self, task: &Task) -> StoreResult<()> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1;", [task.id])?;
        if changed > 0 {
            self.publish(&conn)?;
        }

        info!(
            "event=task_delete module=store status=ok id={} removed={changed}",
            task.id
        );
        Ok(())
    }
}

fn list_all(conn: &Connection) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(TASK_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_completed value `{other}` in tasks.is_completed"
            )));
        }
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        is_completed,
    })
}
