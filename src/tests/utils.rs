use crate::catalog::{CatalogError, InventorySource};
use crate::db::{init_db, Database, SnapshotStore};
use crate::domain::{CheapestSnapshot, InventoryRecord, ModelCode, RankedSelection};
use crate::errors::PipelineError;
use crate::mailer::{MailerError, OutgoingEmail, ReportMailer};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// A listing with the fields the pipeline looks at.
pub fn listing(model: &str, price: i64) -> InventoryRecord {
    serde_json::from_value(json!({
        "Model": model,
        "Price": price,
        "TotalPrice": price,
        "TrimName": "Long Range",
        "Year": 2021,
        "City": "Darlington"
    }))
    .unwrap()
}

pub fn prices_of(selection: &RankedSelection) -> Vec<f64> {
    selection
        .records()
        .iter()
        .map(|r| r.numeric_price().unwrap())
        .collect()
}

/// Returns a fresh database file under the temp dir.
pub fn make_db(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{name}_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).expect("Failed to initialize DB");
    db
}

pub fn stored_snapshots(db: &Database) -> Vec<CheapestSnapshot> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT id, model, price, created_at FROM cheapest_snapshots ORDER BY created_at")
            .map_err(|e| PipelineError::DbError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CheapestSnapshot {
                    id: row.get(0)?,
                    model: row.get(1)?,
                    price: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| PipelineError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
    .unwrap()
}

/// Canned partitions keyed by model. Unlisted models return no listings.
#[derive(Default)]
pub struct FakeCatalog {
    partitions: HashMap<ModelCode, Vec<InventoryRecord>>,
    failing: Vec<ModelCode>,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_partition(mut self, model: ModelCode, records: Vec<InventoryRecord>) -> Self {
        self.partitions.insert(model, records);
        self
    }

    pub fn with_failure(mut self, model: ModelCode) -> Self {
        self.failing.push(model);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InventorySource for FakeCatalog {
    fn fetch_model_inventory(
        &self,
        model: &ModelCode,
    ) -> Result<Vec<InventoryRecord>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(model) {
            return Err(CatalogError::Network("connection reset".to_string()));
        }
        Ok(self.partitions.get(model).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub fail: bool,
    pub written: Mutex<Vec<CheapestSnapshot>>,
}

impl SnapshotStore for FakeStore {
    fn put_snapshot(&self, snapshot: &CheapestSnapshot) -> Result<(), PipelineError> {
        if self.fail {
            return Err(PipelineError::DbError("disk full".to_string()));
        }
        self.written.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl ReportMailer for FakeMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::ApiError("401 unauthorized".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
