//! The booking-flow state machine.
//!
//! `Init → PageLoaded → BookingFormOpened → LocationListLoaded →
//! Terminal(Success | Failure)`, one transition function per edge. All waits
//! are bounded polls; a timed-out step is terminal for that step and nothing
//! here retries.

use std::time::Duration;

use tokio::time::Instant;

use crate::driver::PageDriver;
use crate::error::{BrowserError, NavigationError};

/// "New Individual booking" control on the landing page.
pub const BOOKING_BUTTON_SELECTOR: &str = "#ContentPlaceHolder1_btnInd";

/// URL fragment that marks arrival on the location-selection page.
pub const LOCATION_PATH_FRAGMENT: &str = "Location.aspx";

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Init,
    PageLoaded,
    BookingFormOpened,
    LocationListLoaded,
    Terminal(TerminalState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    Success,
    Failure,
}

/// Bounds for every wait in the flow. Defaults match the live site's
/// observed load behavior; tests shrink them to milliseconds.
#[derive(Debug, Clone)]
pub struct NavTimeouts {
    /// Document body presence after navigation.
    pub page_load: Duration,
    /// Booking control becoming clickable.
    pub control: Duration,
    /// URL transition to the location list.
    pub transition: Duration,
    /// Location table appearing on the loaded page.
    pub table: Duration,
    /// Settle pause between scrolling the control into view and clicking.
    pub settle: Duration,
    /// Poll interval for all waits.
    pub poll: Duration,
}

impl Default for NavTimeouts {
    fn default() -> Self {
        Self {
            page_load: Duration::from_secs(20),
            control: Duration::from_secs(10),
            transition: Duration::from_secs(30),
            table: Duration::from_secs(15),
            settle: Duration::from_secs(1),
            poll: Duration::from_millis(500),
        }
    }
}

/// Poll until an element matching `selector` is present.
///
/// Always probes at least once, so a zero timeout still observes current
/// state. Returns `Ok(false)` on timeout.
pub(crate) async fn wait_for_element(
    driver: &dyn PageDriver,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<bool, BrowserError> {
    let deadline = Instant::now() + timeout;
    loop {
        if driver.element_present(selector).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(poll).await;
    }
}

async fn wait_for_clickable(
    driver: &dyn PageDriver,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<bool, BrowserError> {
    let deadline = Instant::now() + timeout;
    loop {
        if driver.element_clickable(selector).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(poll).await;
    }
}

/// `Init → PageLoaded`: load the booking URL and wait for a document body.
///
/// # Errors
///
/// [`NavigationError::PageLoadTimeout`] if no body appears within the bound.
pub async fn to_page_loaded(
    driver: &dyn PageDriver,
    url: &str,
    timeouts: &NavTimeouts,
) -> Result<NavState, NavigationError> {
    tracing::info!(url, "loading booking page");
    driver.goto(url).await?;

    if !wait_for_element(driver, "body", timeouts.page_load, timeouts.poll).await? {
        return Err(NavigationError::PageLoadTimeout);
    }

    tracing::info!("booking page loaded");
    Ok(NavState::PageLoaded)
}

/// `PageLoaded → BookingFormOpened`: activate "New Individual booking".
///
/// The control is scrolled to the viewport center and given a settle pause
/// before the click, matching the site's in-page animation timing.
///
/// # Errors
///
/// [`NavigationError::ControlNotClickable`] if the control never becomes
/// interactable within the bound.
pub async fn to_booking_form_opened(
    driver: &dyn PageDriver,
    timeouts: &NavTimeouts,
) -> Result<NavState, NavigationError> {
    let clickable = wait_for_clickable(
        driver,
        BOOKING_BUTTON_SELECTOR,
        timeouts.control,
        timeouts.poll,
    )
    .await?;
    if !clickable {
        return Err(NavigationError::ControlNotClickable);
    }

    driver.scroll_into_view(BOOKING_BUTTON_SELECTOR).await?;
    tokio::time::sleep(timeouts.settle).await;
    driver.click(BOOKING_BUTTON_SELECTOR).await?;

    tracing::info!("clicked the new-individual-booking control");
    Ok(NavState::BookingFormOpened)
}

/// `BookingFormOpened → LocationListLoaded`: poll the navigation location
/// until it reaches the location-selection page.
///
/// # Errors
///
/// [`NavigationError::PageTransitionTimeout`] on timeout. The caller treats
/// this as a warning and may still attempt extraction opportunistically.
pub async fn to_location_list_loaded(
    driver: &dyn PageDriver,
    timeouts: &NavTimeouts,
) -> Result<NavState, NavigationError> {
    tracing::info!("waiting for transition to the location list");
    let deadline = Instant::now() + timeouts.transition;
    loop {
        let url = driver.current_url().await?;
        if url.contains(LOCATION_PATH_FRAGMENT) {
            tracing::info!(url, "location list reached");
            return Ok(NavState::LocationListLoaded);
        }
        if Instant::now() >= deadline {
            return Err(NavigationError::PageTransitionTimeout);
        }
        tokio::time::sleep(timeouts.poll).await;
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;
