//! Raw → processed dataset derivation.
//!
//! A pure function of the full raw dataset, recomputed every run. Derived
//! columns:
//!
//! - `supply_change` / `supply_change_pct` - delta vs the previous row
//! - `supply_ma` - trailing mean over [`ROLLING_WINDOW`] rows (partial
//!   windows average over the rows available)
//! - `top_holder_share_pct` / `top10_share_pct` - holder balances as a
//!   percentage of supply

use crate::store::models::{ProcessedRow, Snapshot};
use crate::utils::{pct_change, share_pct};

/// Rows in the trailing supply mean, matching a week of daily runs.
pub const ROLLING_WINDOW: usize = 7;

/// Derive the processed dataset from the raw snapshots.
///
/// Input rows are assumed ordered by timestamp (the store validates this on
/// load). Output has exactly one row per input row; an empty input yields
/// an empty output.
pub fn transform(snapshots: &[Snapshot]) -> Vec<ProcessedRow> {
    let mut rows = Vec::with_capacity(snapshots.len());

    for (idx, snapshot) in snapshots.iter().enumerate() {
        let supply_change = match idx {
            0 => 0.0,
            _ => snapshot.supply - snapshots[idx - 1].supply,
        };
        let supply_change_pct = match idx {
            0 => 0.0,
            _ => pct_change(snapshot.supply, snapshots[idx - 1].supply),
        };

        let window_start = (idx + 1).saturating_sub(ROLLING_WINDOW);
        let window = &snapshots[window_start..=idx];
        let supply_ma = window.iter().map(|s| s.supply).sum::<f64>() / window.len() as f64;

        rows.push(ProcessedRow {
            timestamp: snapshot.timestamp,
            supply: snapshot.supply,
            supply_change,
            supply_change_pct,
            supply_ma,
            top_holder_share_pct: share_pct(snapshot.top_holder_balance, snapshot.supply),
            top10_share_pct: share_pct(snapshot.top10_balance, snapshot.supply),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn snap(day: i64, supply: f64) -> Snapshot {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Snapshot::new(
            base + Duration::days(day),
            "So11111111111111111111111111111111111111112".to_string(),
            250_000_000 + day as u64,
            supply,
            9,
            supply * 0.125,
            supply * 0.25,
            20,
        )
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(transform(&[]).is_empty());
    }

    #[test]
    fn test_first_row_has_no_change() {
        let rows = transform(&[snap(0, 100.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supply_change, 0.0);
        assert_eq!(rows[0].supply_change_pct, 0.0);
        // A one-row window averages to the supply itself
        assert_eq!(rows[0].supply_ma, 100.0);
    }

    #[test]
    fn test_rolling_mean_covers_all_rows() {
        // Three daily snapshots at 100, 110, 120: the last row's trailing
        // mean reflects all three.
        let rows = transform(&[snap(0, 100.0), snap(1, 110.0), snap(2, 120.0)]);

        assert_eq!(rows.len(), 3);
        let last = &rows[2];
        assert_eq!(last.supply, 120.0);
        assert_eq!(last.supply_change, 10.0);
        assert_eq!(last.supply_ma, 110.0);
    }

    #[test]
    fn test_rolling_window_caps_at_seven_rows() {
        // Ten rows with supply = day index; the last window is days 3..=9
        let snapshots: Vec<Snapshot> = (0..10).map(|d| snap(d, d as f64)).collect();
        let rows = transform(&snapshots);

        let expected = (3..=9).sum::<i64>() as f64 / 7.0;
        assert_eq!(rows[9].supply_ma, expected);
    }

    #[test]
    fn test_transform_is_idempotent() {
        let snapshots = vec![snap(0, 100.0), snap(1, 110.0), snap(2, 95.0)];
        assert_eq!(transform(&snapshots), transform(&snapshots));
    }

    #[test]
    fn test_holder_shares() {
        let rows = transform(&[snap(0, 1000.0)]);
        assert_eq!(rows[0].top_holder_share_pct, 12.5);
        assert_eq!(rows[0].top10_share_pct, 25.0);
    }

    #[test]
    fn test_zero_supply_yields_zero_shares() {
        let rows = transform(&[snap(0, 0.0)]);
        assert_eq!(rows[0].top_holder_share_pct, 0.0);
        assert_eq!(rows[0].top10_share_pct, 0.0);
        assert_eq!(rows[0].supply_ma, 0.0);
    }
}
