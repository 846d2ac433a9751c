use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::store::layout::DataLayout;
use crate::store::models::{ProcessedRow, Snapshot};

/// CSV-backed persistence for the raw and processed datasets.
///
/// The raw dataset is append-only: one validated row per run, prior rows
/// never rewritten. The processed dataset is rewritten wholesale each run
/// via a temp file + rename so a failed run cannot leave it half-written.
pub struct SnapshotStore {
    raw_path: PathBuf,
    processed_path: PathBuf,
}

impl SnapshotStore {
    pub fn new(layout: &DataLayout) -> Self {
        Self { raw_path: layout.raw_dataset(), processed_path: layout.processed_dataset() }
    }

    /// Append one snapshot to the raw dataset, creating the file (with a
    /// header row) when absent.
    ///
    /// The existing file is fully loaded and validated first, so a corrupt
    /// dataset fails the append rather than being extended, and the new
    /// timestamp must land strictly after the last row.
    pub fn append(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let existing = self.load_raw()?;
        if let Some(last) = existing.last() {
            if snapshot.timestamp <= last.timestamp {
                return Err(StorageError::NonMonotonicTimestamp {
                    last: last.timestamp,
                    next: snapshot.timestamp,
                });
            }
        }

        // Header only when the file is new or empty
        let needs_header = match std::fs::metadata(&self.raw_path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new().create(true).append(true).open(&self.raw_path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(needs_header).from_writer(file);
        writer.serialize(snapshot)?;
        writer.flush()?;

        Ok(())
    }

    /// Load every raw snapshot, verifying strict timestamp ordering.
    ///
    /// A missing file is an empty dataset, not an error.
    pub fn load_raw(&self) -> Result<Vec<Snapshot>, StorageError> {
        if !self.raw_path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.raw_path)?;
        let mut rows: Vec<Snapshot> = Vec::new();
        for (idx, result) in reader.deserialize::<Snapshot>().enumerate() {
            let row = result?;
            if let Some(prev) = rows.last() {
                if row.timestamp <= prev.timestamp {
                    return Err(StorageError::Corrupt(format!(
                        "raw dataset timestamps out of order at row {} ({} after {})",
                        idx + 1,
                        row.timestamp,
                        prev.timestamp
                    )));
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// Replace the processed dataset with `rows`.
    ///
    /// Writes to a sibling temp file first and renames over the target, so
    /// readers only ever observe a complete dataset.
    pub fn write_processed(&self, rows: &[ProcessedRow]) -> Result<(), StorageError> {
        let tmp_path = self.processed_path.with_extension("csv.tmp");

        {
            let mut writer = csv::Writer::from_path(&tmp_path)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        std::fs::rename(&tmp_path, &self.processed_path)?;
        Ok(())
    }

    /// Load the processed dataset. Missing file means no run has completed.
    pub fn load_processed(&self) -> Result<Vec<ProcessedRow>, StorageError> {
        if !self.processed_path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.processed_path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<ProcessedRow>() {
            rows.push(result?);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn test_store() -> (TempDir, SnapshotStore) {
        let dir = TempDir::new().unwrap();
        let layout = DataLayout::new(dir.path());
        layout.prepare().unwrap();
        let store = SnapshotStore::new(&layout);
        (dir, store)
    }

    fn snap(day: i64, supply: f64) -> Snapshot {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Snapshot::new(
            base + Duration::days(day),
            "So11111111111111111111111111111111111111112".to_string(),
            250_000_000 + day as u64,
            supply,
            9,
            supply * 0.10,
            supply * 0.25,
            20,
        )
    }

    #[test]
    fn test_append_accumulates_rows() {
        let (_dir, store) = test_store();

        for (day, supply) in [(0, 100.0), (1, 110.0), (2, 120.0)] {
            store.append(&snap(day, supply)).unwrap();
        }

        let rows = store.load_raw().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], snap(0, 100.0));
        assert_eq!(rows[1], snap(1, 110.0));
        assert_eq!(rows[2].supply, 120.0);
    }

    #[test]
    fn test_append_preserves_prior_rows() {
        let (_dir, store) = test_store();

        store.append(&snap(0, 100.0)).unwrap();
        let before = store.load_raw().unwrap();

        store.append(&snap(1, 110.0)).unwrap();
        let after = store.load_raw().unwrap();

        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
    }

    #[test]
    fn test_append_rejects_stale_timestamp() {
        let (_dir, store) = test_store();

        store.append(&snap(1, 110.0)).unwrap();

        // Earlier than the last row
        let err = store.append(&snap(0, 100.0)).unwrap_err();
        assert!(matches!(err, StorageError::NonMonotonicTimestamp { .. }));

        // Equal to the last row
        let err = store.append(&snap(1, 115.0)).unwrap_err();
        assert!(matches!(err, StorageError::NonMonotonicTimestamp { .. }));

        // The rejected appends left the dataset untouched
        let rows = store.load_raw().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supply, 110.0);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = test_store();
        assert!(store.load_raw().unwrap().is_empty());
        assert!(store.load_processed().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_raw_dataset_fails() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("raw/snapshots.csv"), "a,b\n1,2\n").unwrap();

        assert!(store.load_raw().is_err());
        // A corrupt file must not be extended
        assert!(store.append(&snap(0, 100.0)).is_err());
    }

    #[test]
    fn test_out_of_order_file_detected() {
        let (dir, store) = test_store();

        // Bypass append() to craft a file with reversed timestamps
        let mut writer = csv::Writer::from_path(dir.path().join("raw/snapshots.csv")).unwrap();
        writer.serialize(snap(1, 110.0)).unwrap();
        writer.serialize(snap(0, 100.0)).unwrap();
        writer.flush().unwrap();
        drop(writer);

        let err = store.load_raw().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_processed_rewrite_replaces_previous() {
        let (_dir, store) = test_store();

        let rows: Vec<ProcessedRow> = crate::store::transform::transform(&[
            snap(0, 100.0),
            snap(1, 110.0),
            snap(2, 120.0),
        ]);
        store.write_processed(&rows).unwrap();
        assert_eq!(store.load_processed().unwrap().len(), 3);

        let shorter = crate::store::transform::transform(&[snap(0, 100.0)]);
        store.write_processed(&shorter).unwrap();

        let reloaded = store.load_processed().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded, shorter);
    }
}
