// src/snapshot.rs

use crate::domain::{CheapestSnapshot, ProductLines, RankedSelection};
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::RngCore;

fn generate_snapshot_id() -> String {
    // 16 bytes = 128-bit id, url-safe base64 (no padding)
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Snapshot of the cheapest listing, or `None` when nothing was ranked.
pub fn build_snapshot(
    selection: &RankedSelection,
    lines: &ProductLines,
    now: DateTime<Utc>,
) -> Option<CheapestSnapshot> {
    let cheapest = selection.cheapest()?;

    Some(CheapestSnapshot {
        id: generate_snapshot_id(),
        model: lines.pretty_name(&cheapest.model).to_string(),
        price: cheapest
            .price
            .as_ref()
            .map(|p| p.to_price_text())
            .unwrap_or_default(),
        created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
