use thiserror::Error;

/// Failures at the browser/CDP layer, below the navigation flow.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no Chrome binary found; set SLOTWATCH_CHROME_PATH or install google-chrome")]
    ChromeNotFound,

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser command failed: {0}")]
    Cdp(String),
}

/// Failures while driving the booking flow. Page-level: any of these aborts
/// the current run, except that the orchestrator treats a transition timeout
/// as a warning and still attempts extraction opportunistically.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("page load timed out waiting for the document body")]
    PageLoadTimeout,

    #[error("booking control did not become clickable in time")]
    ControlNotClickable,

    #[error("transition to the location list page timed out")]
    PageTransitionTimeout,

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// Failures while extracting location records from the loaded page.
///
/// `TableNotFound` aborts the run; `RowFieldMissing` only ever skips the
/// affected row.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("location table not found on the page")]
    TableNotFound,

    #[error("row {row}: missing field \"{field}\"")]
    RowFieldMissing { row: usize, field: &'static str },

    #[error(transparent)]
    Browser(#[from] BrowserError),
}
