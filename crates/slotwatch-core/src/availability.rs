//! Availability-text parsing.
//!
//! The booking site renders availability as locale-specific free text
//! (`"Saturday 23/08/2025\n03:00 PM"` or the `"No available slot"`
//! sentinel). Parsing is behind a one-method strategy trait so the
//! site-specific pattern can be swapped or hardened without touching the
//! filter.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ParseError;

/// Fixed substring marking "no availability" in place of a date.
pub const NO_SLOT_SENTINEL: &str = "No available slot";

/// Strategy for turning an availability text into a calendar date.
///
/// Implementations must be pure functions of the input text: no locale,
/// timezone, or clock state may affect the result.
pub trait AvailabilityParser: Send + Sync {
    /// Parse the appointment date out of an availability string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoDateFound`] if no date pattern is present, or
    /// [`ParseError::InvalidCalendarDate`] if the matched text fails
    /// calendar validation. Both are recoverable at the call site.
    fn parse_date(&self, text: &str) -> Result<NaiveDate, ParseError>;
}

/// Default parser: first `D{1,2}/M{1,2}/YYYY` match on the first line,
/// interpreted day-first to match the source site's locale.
pub struct DayFirstDateParser {
    pattern: Regex,
}

impl DayFirstDateParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").expect("valid regex"),
        }
    }
}

impl Default for DayFirstDateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityParser for DayFirstDateParser {
    fn parse_date(&self, text: &str) -> Result<NaiveDate, ParseError> {
        // Only the first line carries the date; later lines hold the time.
        let first_line = text.trim().lines().next().unwrap_or("");

        let matched = self
            .pattern
            .find(first_line)
            .ok_or(ParseError::NoDateFound)?
            .as_str();

        NaiveDate::parse_from_str(matched, "%d/%m/%Y")
            .map_err(|_| ParseError::InvalidCalendarDate(matched.to_owned()))
    }
}

/// Convenience wrapper used by the filter: sentinel text and parse failures
/// both yield `None`, with a warning logged for the latter so malformed
/// availability strings are diagnosable without re-running.
#[must_use]
pub fn parse_availability(parser: &dyn AvailabilityParser, text: &str) -> Option<NaiveDate> {
    if text.contains(NO_SLOT_SENTINEL) {
        return None;
    }

    match parser.parse_date(text) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(availability = text, error = %e, "could not parse availability date");
            None
        }
    }
}

#[cfg(test)]
#[path = "availability_test.rs"]
mod tests;
