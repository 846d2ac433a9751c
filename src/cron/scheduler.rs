//! Cron scheduler for the optional keep-alive mode.
//!
//! Registers a single repeated job that re-runs the snapshot pipeline on
//! the configured interval. Per-run failures are logged rather than
//! propagated so one bad run never stops the cadence.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::pipeline;
use crate::store::DataLayout;

/// Cron scheduler that re-runs the pipeline periodically.
pub struct CronScheduler {
    settings: Arc<Settings>,
    layout: DataLayout,
}

impl CronScheduler {
    pub fn new(settings: Arc<Settings>, layout: DataLayout) -> Self {
        Self { settings, layout }
    }

    /// Starts the cron scheduler and runs until cancellation.
    pub async fn run(&self, cancellation_token: CancellationToken) -> Result<()> {
        let mut scheduler = JobScheduler::new().await?;

        self.register_snapshot_job(&scheduler).await?;

        scheduler.start().await?;
        info!("Cron scheduler started");

        // Wait for cancellation
        cancellation_token.cancelled().await;
        info!("Cron scheduler shutting down...");

        scheduler.shutdown().await?;
        Ok(())
    }

    async fn register_snapshot_job(&self, scheduler: &JobScheduler) -> Result<()> {
        let settings = self.settings.clone();
        let layout = self.layout.clone();
        let interval = self.settings.scheduler.run_interval_secs;

        let job = Job::new_repeated_async(
            std::time::Duration::from_secs(interval),
            move |_uuid, _lock| {
                let settings = settings.clone();
                let layout = layout.clone();
                Box::pin(async move {
                    if let Err(e) = pipeline::run(&settings, &layout).await {
                        error!("Scheduled snapshot run failed: {:#}", e);
                    }
                })
            },
        )?;

        scheduler.add(job).await?;
        info!("Registered snapshot job (every {}s)", interval);
        Ok(())
    }
}
