//! The snapshot pipeline: fetch → append → transform → render.
//!
//! One run per invocation. Fetches current metrics over RPC, appends one
//! snapshot to the raw dataset, recomputes the processed dataset in full,
//! and regenerates the report artifacts. Stages run in strict sequence;
//! the first failure aborts the run and propagates to the caller.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::config::Settings;
use crate::report;
use crate::rpc::RpcClient;
use crate::store::{transform, DataLayout, Snapshot, SnapshotStore};

/// Execute one full pipeline run.
pub async fn run(settings: &Settings, layout: &DataLayout) -> Result<()> {
    let mint = &settings.token.mint;
    info!("Starting snapshot run for mint {mint}...");
    let start = std::time::Instant::now();

    let client = RpcClient::new(&settings.rpc).context("Failed to build RPC client")?;
    let metrics =
        client.fetch_token_metrics(mint).await.context("Failed to fetch token metrics")?;
    info!(
        "Fetched metrics at slot {}: supply {:.2}, {} holder accounts",
        metrics.slot,
        metrics.supply,
        metrics.holders.len()
    );

    let snapshot = Snapshot::new(
        Utc::now(),
        mint.clone(),
        metrics.slot,
        metrics.supply,
        metrics.decimals,
        metrics.top_holder_balance(),
        metrics.top10_balance(),
        metrics.holders.len() as u32,
    );

    let artifacts = record_snapshot(mint, &snapshot, layout)?;

    info!("Completed snapshot run ({} artifacts) in {:?}", artifacts.len(), start.elapsed());
    Ok(())
}

/// Persist one snapshot and regenerate every derived output: the raw
/// append, the processed rewrite, the charts, and the summary.
///
/// Split from [`run`] so the post-fetch stages can be driven without a
/// network connection.
pub fn record_snapshot(
    mint: &str,
    snapshot: &Snapshot,
    layout: &DataLayout,
) -> Result<Vec<PathBuf>> {
    let store = SnapshotStore::new(layout);

    store.append(snapshot).context("Failed to append snapshot to raw dataset")?;
    let raw = store.load_raw().context("Failed to load raw dataset")?;
    info!("Raw dataset now holds {} snapshots", raw.len());

    let processed = transform::transform(&raw);
    store.write_processed(&processed).context("Failed to write processed dataset")?;

    let mut artifacts =
        report::render_charts(mint, &processed, layout).context("Failed to render charts")?;
    let summary =
        report::write_summary(mint, &processed, layout).context("Failed to write summary")?;
    artifacts.push(summary);

    Ok(artifacts)
}
