use crate::db::connection::Database;
use crate::domain::CheapestSnapshot;
use crate::errors::PipelineError;
use rusqlite::params;

/// Where each run's cheapest listing is recorded. Write-only.
pub trait SnapshotStore {
    fn put_snapshot(&self, snapshot: &CheapestSnapshot) -> Result<(), PipelineError>;
}

impl SnapshotStore for Database {
    fn put_snapshot(&self, snapshot: &CheapestSnapshot) -> Result<(), PipelineError> {
        self.with_conn(|conn| insert_snapshot(conn, snapshot))
    }
}

pub fn insert_snapshot(
    conn: &rusqlite::Connection,
    snapshot: &CheapestSnapshot,
) -> Result<(), PipelineError> {
    conn.execute(
        "INSERT INTO cheapest_snapshots (id, model, price, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            snapshot.id,
            snapshot.model,
            snapshot.price,
            snapshot.created_at
        ],
    )
    .map_err(|e| PipelineError::DbError(e.to_string()))?;
    Ok(())
}
