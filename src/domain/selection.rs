// src/domain/selection.rs

use crate::domain::InventoryRecord;

/// Price-ordered, size-bounded listings for one run. Built by the aggregator
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedSelection {
    records: Vec<InventoryRecord>,
}

impl RankedSelection {
    /// Wraps records that are already ranked cheapest first.
    pub fn from_ranked(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn cheapest(&self) -> Option<&InventoryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The cheapest listing of one run, as written to the snapshot store.
#[derive(Debug, Clone, PartialEq)]
pub struct CheapestSnapshot {
    pub id: String,
    pub model: String,
    pub price: String,
    /// RFC 3339, UTC.
    pub created_at: String,
}
