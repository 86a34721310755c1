//! Eligibility filter: which extracted records are actionable.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::{parse_availability, AvailabilityParser};
use crate::config::MonitorConfig;
use crate::types::LocationRecord;

/// A record that passed the filter, carrying its parsed appointment date.
/// Ephemeral; consumed by the notifier within the same run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub record: LocationRecord,
    pub availability_date: NaiveDate,
}

/// Select the records worth notifying about.
///
/// Per record, in order: the trimmed name must be on the allow-list (exact,
/// case-sensitive, trim on both sides), the record must have open slots, the
/// availability text must parse to a date, and that date must fall on or
/// before the cutoff (inclusive). Output order matches input order; no
/// deduplication — every run re-evaluates from scratch with no memory of
/// prior runs.
///
/// Every decision is logged so a run can be audited without re-running.
#[must_use]
pub fn filter_matching_slots(
    records: &[LocationRecord],
    config: &MonitorConfig,
    parser: &dyn AvailabilityParser,
) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    tracing::info!(
        locations = ?config.monitored_locations,
        cutoff = %config.cutoff_date,
        "filtering extracted records"
    );

    for record in records {
        let name = record.location_name.trim();

        if !config
            .monitored_locations
            .iter()
            .any(|loc| loc.trim() == name)
        {
            tracing::debug!(location = name, "skipped: not on the allow-list");
            continue;
        }

        if !record.has_available_slots {
            tracing::info!(location = name, "skipped: no available slots");
            continue;
        }

        let Some(availability_date) = parse_availability(parser, &record.availability_text)
        else {
            tracing::warn!(
                location = name,
                availability = %record.availability_text,
                "skipped: availability date could not be parsed"
            );
            continue;
        };

        if availability_date <= config.cutoff_date {
            tracing::info!(
                location = name,
                availability = %record.availability_text,
                date = %availability_date,
                "match: slot on or before cutoff"
            );
            matches.push(MatchResult {
                record: record.clone(),
                availability_date,
            });
        } else {
            tracing::info!(
                location = name,
                date = %availability_date,
                cutoff = %config.cutoff_date,
                "skipped: slot after cutoff"
            );
        }
    }

    matches
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
