//! One end-to-end monitoring run.
//!
//! Launch a browser session, drive the booking flow, extract the location
//! table, filter for matches, persist snapshots, and tear the session down.
//! Teardown is guaranteed on every exit path. Nothing here retries; the
//! scheduler re-invokes the whole pipeline on its fixed interval.

use std::path::Path;

use slotwatch_browser::{
    extract_records, to_booking_form_opened, to_location_list_loaded, to_page_loaded,
    BrowserSession, NavState, NavTimeouts, NavigationError, PageDriver, SessionOptions,
    TerminalState,
};
use slotwatch_core::{
    filter_matching_slots, AvailabilityParser, CenterType, LocationRecord, MatchResult,
    MonitorConfig,
};

use crate::persist::persist_snapshots;

/// What a single run produced.
///
/// `success` with an empty `records` list is a valid outcome (site
/// reachable, table empty) and is distinct from `success == false`, which
/// always carries an empty record set.
#[derive(Debug)]
pub struct RunOutcome {
    pub success: bool,
    pub records: Vec<LocationRecord>,
    pub matches: Vec<MatchResult>,
}

impl RunOutcome {
    fn failure() -> Self {
        Self {
            success: false,
            records: Vec::new(),
            matches: Vec::new(),
        }
    }
}

/// Execute one full pipeline run.
///
/// Page-level failures (load timeout, dead control, missing table) produce
/// `success == false`; a transition timeout is downgraded to a warning and
/// extraction is still attempted opportunistically. If extraction produced
/// records, filtering and persistence always proceed on that set.
pub async fn run_pipeline(
    config: &MonitorConfig,
    session_opts: &SessionOptions,
    parser: &dyn AvailabilityParser,
) -> RunOutcome {
    let session = match BrowserSession::launch(session_opts).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "could not launch a browser session");
            return RunOutcome::failure();
        }
    };

    let driver = session.driver();
    let outcome = drive(&driver, config, parser).await;

    // Unconditional: runs after success and failure alike.
    session.close().await;

    outcome
}

async fn drive(
    driver: &dyn PageDriver,
    config: &MonitorConfig,
    parser: &dyn AvailabilityParser,
) -> RunOutcome {
    let timeouts = NavTimeouts::default();

    let state = match to_page_loaded(driver, &config.booking_url, &timeouts).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(stage = "page_load", error = %e, "run aborted");
            return RunOutcome::failure();
        }
    };
    tracing::debug!(state = ?state, "transition complete");
    capture(driver, &config.output_dir, "initial_page").await;

    let state = match to_booking_form_opened(driver, &timeouts).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(stage = "booking_form", error = %e, "run aborted");
            capture(driver, &config.output_dir, "error_page").await;
            return RunOutcome::failure();
        }
    };
    tracing::debug!(state = ?state, "transition complete");

    let state = match to_location_list_loaded(driver, &timeouts).await {
        Ok(state) => state,
        Err(NavigationError::PageTransitionTimeout) => {
            // The site sometimes rewrites the URL late; try extraction
            // anyway and let the table wait decide.
            tracing::warn!(
                stage = "page_transition",
                "transition timed out; attempting extraction opportunistically"
            );
            NavState::Terminal(TerminalState::Failure)
        }
        Err(e) => {
            tracing::error!(stage = "page_transition", error = %e, "run aborted");
            return RunOutcome::failure();
        }
    };
    capture(driver, &config.output_dir, "location_page").await;

    let records = match extract_records(driver, &timeouts).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(stage = "extraction", error = %e, "run aborted");
            return RunOutcome::failure();
        }
    };

    if state != NavState::LocationListLoaded {
        tracing::info!("extraction succeeded despite the transition timeout");
    }
    let state = NavState::Terminal(TerminalState::Success);
    tracing::debug!(state = ?state, "navigation complete");

    log_run_summary(&records);

    let matches = filter_matching_slots(&records, config, parser);

    persist_snapshots(&config.output_dir, &records);
    capture(driver, &config.output_dir, "final_page").await;

    RunOutcome {
        success: true,
        records,
        matches,
    }
}

/// Diagnostic screenshot keyed by stage name. Purely observational: a
/// failure is logged and never affects control flow.
async fn capture(driver: &dyn PageDriver, dir: &Path, stage: &str) {
    let path = dir.join(format!("{stage}.png"));
    match driver.screenshot(&path).await {
        Ok(()) => tracing::debug!(stage, path = %path.display(), "screenshot saved"),
        Err(e) => tracing::warn!(stage, error = %e, "screenshot failed"),
    }
}

/// Post-run summary of the extracted table.
fn log_run_summary(records: &[LocationRecord]) {
    let available: Vec<&LocationRecord> =
        records.iter().filter(|r| r.has_available_slots).collect();
    let bupa = records
        .iter()
        .filter(|r| r.center_type == CenterType::BupaCentre)
        .count();

    tracing::info!(
        total = records.len(),
        available = available.len(),
        bupa_centres = bupa,
        regional_centres = records.len() - bupa,
        "run summary"
    );

    for record in available {
        tracing::info!(
            location = %record.location_name,
            distance = %record.distance,
            availability = %record.availability_text,
            "open slots"
        );
    }
}
