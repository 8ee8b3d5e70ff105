// src/aggregator.rs

use crate::catalog::{CatalogError, InventorySource};
use crate::domain::{InventoryRecord, ModelCode, RankedSelection};
use crate::errors::PipelineError;
use log::{debug, info};
use std::thread;

/// Default size of the ranked selection.
pub const DEFAULT_TOP_N: usize = 5;

/// Fetches every partition and keeps the `n` cheapest listings across all of them.
///
/// Any failed partition fails the whole aggregation: a ranking missing a
/// product line can't claim to be the cheapest overall.
pub fn aggregate_top_n(
    source: &dyn InventorySource,
    models: &[ModelCode],
    n: usize,
) -> Result<RankedSelection, PipelineError> {
    let partitions = fetch_partitions(source, models)?;
    Ok(rank_top_n(partitions, n))
}

/// One fetch per model, issued concurrently. Results come back in `models`
/// order whatever order the fetches finish in.
fn fetch_partitions(
    source: &dyn InventorySource,
    models: &[ModelCode],
) -> Result<Vec<Vec<InventoryRecord>>, PipelineError> {
    let results: Vec<Result<Vec<InventoryRecord>, CatalogError>> = thread::scope(|s| {
        let handles: Vec<_> = models
            .iter()
            .map(|model| s.spawn(move || source.fetch_model_inventory(model)))
            .collect();

        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(CatalogError::Network("fetch thread panicked".to_string()))
                })
            })
            .collect()
    });

    let mut partitions = Vec::with_capacity(models.len());
    for (model, result) in models.iter().zip(results) {
        let records = result.map_err(|source| PipelineError::CatalogUnavailable {
            model: model.to_string(),
            source,
        })?;
        info!("Partition {model}: {} listings", records.len());
        partitions.push(records);
    }

    Ok(partitions)
}

/// Merges partitions and keeps the `n` cheapest. Listings without a numeric
/// price are dropped. Equal prices keep partition order, then response order.
pub fn rank_top_n(partitions: Vec<Vec<InventoryRecord>>, n: usize) -> RankedSelection {
    let mut priced: Vec<(f64, InventoryRecord)> = partitions
        .into_iter()
        .flatten()
        .filter_map(|record| match record.numeric_price() {
            Some(price) => Some((price, record)),
            None => {
                debug!(
                    "Dropping {} listing with unusable price {:?}",
                    record.model, record.price
                );
                None
            }
        })
        .collect();

    priced.sort_by(|a, b| a.0.total_cmp(&b.0));

    RankedSelection::from_ranked(
        priced
            .into_iter()
            .take(n)
            .map(|(_, record)| record)
            .collect(),
    )
}
