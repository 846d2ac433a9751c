//! Dataset row types.

mod processed;
mod snapshot;

pub use processed::ProcessedRow;
pub use snapshot::Snapshot;
