use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived metrics for one snapshot, recomputed wholesale from the raw
/// dataset on every run.
///
/// Population: full rewrite of the processed dataset per run; a pure
/// function of the raw rows, so re-running on unchanged input yields an
/// identical file.
///
/// Query Patterns:
///   - "How has supply moved run-over-run?"
///   - "Smoothed supply trend for the chart overlay"
///   - "How concentrated are the top holders right now?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRow {
    pub timestamp: DateTime<Utc>,

    // Supply trend
    pub supply: f64,
    pub supply_change: f64,
    pub supply_change_pct: f64,
    pub supply_ma: f64,

    // Holder concentration
    pub top_holder_share_pct: f64,
    pub top10_share_pct: f64,
}
