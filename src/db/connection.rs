use rusqlite::Connection;
use std::cell::RefCell;

use crate::errors::PipelineError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, tagged with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, PipelineError>
    where
        F: FnOnce(&mut Connection) -> Result<T, PipelineError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| PipelineError::DbError(format!("Open DB failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }

                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(PipelineError::DbError("Connection slot empty".to_string())),
                }
            })
            .map_err(|e| PipelineError::DbError(format!("Connection slot unavailable: {e}")))?
    }
}

/// Creates the snapshot table if it isn't there yet.
pub fn init_db(db: &Database) -> Result<(), PipelineError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| PipelineError::DbError(format!("Failed to apply schema: {e}")))
    })?;

    log::info!("Database initialized at {}", db.path);
    Ok(())
}
