use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped record of on-chain token metrics, as fetched.
///
/// Population: one row appended per pipeline run, never mutated or deleted.
///
/// Serialized as one CSV row in the raw dataset; timestamps serialize as
/// RFC 3339 via chrono's serde support, so the file stays greppable and
/// diff-friendly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    // Identifiers
    pub timestamp: DateTime<Utc>,
    pub mint: String,
    pub slot: u64,

    // Supply data (UI units)
    pub supply: f64,
    pub decimals: u8,

    // Holder concentration (UI units)
    pub top_holder_balance: f64,
    pub top10_balance: f64,
    pub holder_sample: u32,
}

impl Snapshot {
    pub fn new(
        timestamp: DateTime<Utc>,
        mint: String,
        slot: u64,
        supply: f64,
        decimals: u8,
        top_holder_balance: f64,
        top10_balance: f64,
        holder_sample: u32,
    ) -> Self {
        Self {
            timestamp,
            mint,
            slot,
            supply,
            decimals,
            top_holder_balance,
            top10_balance,
            holder_sample,
        }
    }
}
