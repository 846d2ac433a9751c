//! Markdown summary of the latest processed metrics.
//!
//! Mirrors the chart artifacts in text form so the reports directory is
//! useful without an image viewer. Content derives only from the dataset
//! (the "last updated" line is the latest snapshot's timestamp, not the
//! wall clock), keeping the artifact deterministic.

use std::path::PathBuf;

use crate::error::RenderError;
use crate::store::{DataLayout, ProcessedRow};

/// Write `summary.md` into the reports directory, returning its path.
pub fn write_summary(
    mint: &str,
    rows: &[ProcessedRow],
    layout: &DataLayout,
) -> Result<PathBuf, RenderError> {
    let latest = rows.last().ok_or(RenderError::EmptyDataset)?;
    let content = render_summary(mint, rows, latest);

    let path = layout.summary_file();
    std::fs::write(&path, content)?;
    Ok(path)
}

fn render_summary(mint: &str, rows: &[ProcessedRow], latest: &ProcessedRow) -> String {
    let mut out = String::new();

    out.push_str("# Token metrics summary\n\n");
    out.push_str(&format!("- Mint: `{mint}`\n"));
    out.push_str(&format!(
        "- Last snapshot: {}\n",
        latest.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("- Snapshots recorded: {}\n\n", rows.len()));

    out.push_str("## Latest metrics\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|--------|-------|\n");
    out.push_str(&format!("| Supply | {:.2} |\n", latest.supply));
    out.push_str(&format!(
        "| Supply change (run) | {:+.2} ({:+.2}%) |\n",
        latest.supply_change, latest.supply_change_pct
    ));
    out.push_str(&format!("| Supply 7-run mean | {:.2} |\n", latest.supply_ma));
    out.push_str(&format!("| Top account share | {:.2}% |\n", latest.top_holder_share_pct));
    out.push_str(&format!("| Top 10 share | {:.2}% |\n", latest.top10_share_pct));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn row(day: i64, supply: f64) -> ProcessedRow {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ProcessedRow {
            timestamp: base + Duration::days(day),
            supply,
            supply_change: if day == 0 { 0.0 } else { 10.0 },
            supply_change_pct: if day == 0 { 0.0 } else { 9.09 },
            supply_ma: supply,
            top_holder_share_pct: 12.5,
            top10_share_pct: 25.0,
        }
    }

    #[test]
    fn test_summary_reflects_latest_row() {
        let rows = [row(0, 100.0), row(1, 110.0), row(2, 120.0)];
        let text = render_summary("So11111111111111111111111111111111111111112", &rows, &rows[2]);

        assert!(text.contains("`So11111111111111111111111111111111111111112`"));
        assert!(text.contains("Last snapshot: 2024-01-03 00:00:00 UTC"));
        assert!(text.contains("Snapshots recorded: 3"));
        assert!(text.contains("| Supply | 120.00 |"));
        assert!(text.contains("(+9.09%)"));
        assert!(text.contains("| Top 10 share | 25.00% |"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let rows = [row(0, 100.0)];
        let mint = "So11111111111111111111111111111111111111112";
        assert_eq!(render_summary(mint, &rows, &rows[0]), render_summary(mint, &rows, &rows[0]));
    }

    #[test]
    fn test_write_summary_rejects_empty_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let layout = DataLayout::new(dir.path());
        layout.prepare().unwrap();

        let err = write_summary("mint", &[], &layout).unwrap_err();
        assert!(matches!(err, RenderError::EmptyDataset));
        assert!(!layout.summary_file().exists());
    }

    #[test]
    fn test_write_summary_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let layout = DataLayout::new(dir.path());
        layout.prepare().unwrap();

        let rows = [row(0, 100.0)];
        let path = write_summary("mint", &rows, &layout).unwrap();
        assert!(path.exists());

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("# Token metrics summary"));
    }
}
