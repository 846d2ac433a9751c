//! Dataset storage: on-disk layout, append-only raw snapshots, and the
//! derived processed dataset.

mod dataset;
mod layout;
pub mod models;
pub mod transform;

pub use dataset::SnapshotStore;
pub use layout::DataLayout;
pub use models::{ProcessedRow, Snapshot};
