//! Single-run command handler.

use slotwatch_browser::SessionOptions;
use slotwatch_core::{DayFirstDateParser, MonitorConfig};
use slotwatch_notify::Notifier;
use slotwatch_pipeline::run_pipeline;

/// Execute one pipeline run and deliver a notification when matches exist.
///
/// # Errors
///
/// Returns an error when the pipeline run fails outright or when a
/// notification cannot be delivered. An empty match set is a success.
pub(crate) async fn run_once(
    config: &MonitorConfig,
    notifier: Option<&Notifier>,
    headed: bool,
) -> anyhow::Result<()> {
    let session_opts = SessionOptions {
        headless: !headed,
        chrome_path: config.chrome_path.clone(),
    };
    let parser = DayFirstDateParser::new();

    let outcome = run_pipeline(config, &session_opts, &parser).await;
    if !outcome.success {
        anyhow::bail!("pipeline run failed; see logs for the failing stage");
    }

    println!(
        "extracted {} locations, {} matching slots",
        outcome.records.len(),
        outcome.matches.len()
    );

    if outcome.matches.is_empty() {
        tracing::info!("no slots matched the filter this run");
        return Ok(());
    }

    match notifier {
        Some(notifier) => {
            notifier
                .send_match_notification(&outcome.matches, config.cutoff_date, &config.booking_url)
                .await?;
        }
        None => {
            tracing::info!(
                matches = outcome.matches.len(),
                "notification suppressed by --no-notify"
            );
        }
    }

    Ok(())
}
