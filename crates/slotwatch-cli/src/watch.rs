//! The watch loop.
//!
//! Runs the pipeline once immediately, then re-invokes it at the configured
//! fixed interval. The scheduler is the sole retry mechanism in the system:
//! a failed run is logged and the next interval tries again from scratch.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};

use slotwatch_core::MonitorConfig;
use slotwatch_notify::Notifier;

/// Start the monitoring loop and block until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the scheduler cannot be initialised or the job
/// cannot be registered. Individual run failures are logged, never
/// propagated.
pub(crate) async fn run_watch(
    config: MonitorConfig,
    notifier: Notifier,
    headed: bool,
) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let notifier = Arc::new(notifier);

    tracing::info!(
        interval_minutes = config.check_interval_minutes,
        locations = ?config.monitored_locations,
        cutoff = %config.cutoff_date,
        "starting watch loop"
    );

    // First check runs immediately; the interval only paces the repeats.
    execute_run(&config, &notifier, headed).await;

    let mut scheduler = JobScheduler::new().await?;

    let job_config = Arc::clone(&config);
    let job_notifier = Arc::clone(&notifier);
    let interval = Duration::from_secs(config.check_interval_minutes * 60);
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let config = Arc::clone(&job_config);
        let notifier = Arc::clone(&job_notifier);
        Box::pin(async move {
            tracing::info!("scheduler: starting monitoring run");
            execute_run(&config, &notifier, headed).await;
            tracing::info!("scheduler: monitoring run complete");
        })
    })?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    shutdown_signal().await;
    tracing::info!("shutdown signal received; stopping the watch loop");
    scheduler.shutdown().await?;

    Ok(())
}

/// One scheduled run; every failure ends here as a log line.
async fn execute_run(config: &MonitorConfig, notifier: &Notifier, headed: bool) {
    if let Err(e) = crate::run::run_once(config, Some(notifier), headed).await {
        tracing::error!(error = %e, "monitoring run failed");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
