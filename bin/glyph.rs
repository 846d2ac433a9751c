use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use glyph::{pipeline, CronScheduler, DataLayout, Settings};

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Make .env values visible to the configuration layer
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Arc::new(Settings::new().context(
        "Failed to load configuration. Provide config.yaml or set GLYPH__RPC__URL and GLYPH__TOKEN__MINT",
    )?);

    // Acquire the data directories before any pipeline stage runs
    let layout = DataLayout::new(&settings.storage.data_dir);
    layout.prepare().context("Failed to prepare data directories")?;

    if !settings.scheduler.enabled {
        // Single-shot mode: one run, exit code reports the outcome
        return pipeline::run(&settings, &layout).await;
    }

    run_scheduled(settings, layout).await
}

async fn run_scheduled(settings: Arc<Settings>, layout: DataLayout) -> anyhow::Result<()> {
    // The initial run happens immediately; scheduled reruns follow. In this
    // mode a failed run is logged and the cadence continues.
    if let Err(e) = pipeline::run(&settings, &layout).await {
        error!("Initial snapshot run failed: {:#}", e);
    }

    let cancellation_token = CancellationToken::new();

    let cron_scheduler = CronScheduler::new(settings.clone(), layout);

    let cron_token = cancellation_token.child_token();
    let cron_handle = tokio::spawn(async move {
        if let Err(e) = cron_scheduler.run(cron_token).await {
            error!("Cron scheduler failed: {:#}", e);
        }
    });

    #[cfg(unix)]
    let mut sigterm_stream = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?
    };

    // Set up graceful shutdown signal handler
    info!(
        "Tracker running on a {}s interval. Press Ctrl+C to stop.",
        settings.scheduler.run_interval_secs
    );

    #[cfg(unix)]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
            _ = sigterm_stream.recv() => {
                info!("Received SIGTERM, exiting gracefully...");
            },
        };
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
        };
    }

    // Cancel the scheduler and wait for it to wind down
    info!("Finishing all tasks...");

    cancellation_token.cancel();

    let _ = cron_handle.await;

    info!("Scheduler stopped");
    Ok(())
}
