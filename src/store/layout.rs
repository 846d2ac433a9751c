use std::path::{Path, PathBuf};

use log::info;

use crate::error::StorageError;

/// On-disk layout for datasets and rendered reports.
///
/// All paths are fixed relative to the configured data root:
///
/// ```text
/// <data_dir>/raw/snapshots.csv
/// <data_dir>/processed/metrics.csv
/// <data_dir>/reports/{supply.png, holders.png, summary.md}
/// ```
///
/// [`DataLayout::prepare`] creates every directory up front; components
/// assume the directories exist and never create them implicitly.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
    raw_dir: PathBuf,
    processed_dir: PathBuf,
    reports_dir: PathBuf,
}

impl DataLayout {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let root = data_dir.as_ref().to_path_buf();
        Self {
            raw_dir: root.join("raw"),
            processed_dir: root.join("processed"),
            reports_dir: root.join("reports"),
            root,
        }
    }

    /// Create every required directory. Must run before any pipeline stage.
    pub fn prepare(&self) -> Result<(), StorageError> {
        for dir in [&self.raw_dir, &self.processed_dir, &self.reports_dir] {
            std::fs::create_dir_all(dir)?;
        }
        info!("Prepared data layout under {}", self.root.display());
        Ok(())
    }

    pub fn raw_dataset(&self) -> PathBuf {
        self.raw_dir.join("snapshots.csv")
    }

    pub fn processed_dataset(&self) -> PathBuf {
        self.processed_dir.join("metrics.csv")
    }

    pub fn supply_chart(&self) -> PathBuf {
        self.reports_dir.join("supply.png")
    }

    pub fn holders_chart(&self) -> PathBuf {
        self.reports_dir.join("holders.png")
    }

    pub fn summary_file(&self) -> PathBuf {
        self.reports_dir.join("summary.md")
    }
}
