//! Notification message content.

use chrono::{NaiveDate, Utc};

use slotwatch_core::MatchResult;

pub(crate) fn match_subject(count: usize) -> String {
    let noun = if count == 1 { "slot" } else { "slots" };
    format!("Appointment alert: {count} matching {noun} found")
}

/// Plain-text body listing every match, the filter conditions, and the
/// booking URL so the operator can act immediately.
pub(crate) fn match_body(
    matches: &[MatchResult],
    cutoff_date: NaiveDate,
    booking_url: &str,
) -> String {
    let mut body = String::new();

    body.push_str("Medical visa appointment monitor\n");
    body.push_str("================================\n\n");
    body.push_str(&format!(
        "Detected at: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    body.push_str(&format!("Cutoff date: {cutoff_date} (inclusive)\n"));
    body.push_str(&format!("Matching slots: {}\n\n", matches.len()));

    for (i, m) in matches.iter().enumerate() {
        let r = &m.record;
        body.push_str(&format!(
            "{}. {} ({})\n   Appointment: {}\n   Date: {}\n   Address: {}\n   \
             Type: {}\n   Coordinates: {}\n   Location id: {}\n\n",
            i + 1,
            r.location_name.trim(),
            r.distance,
            r.availability_text.replace('\n', " "),
            m.availability_date,
            r.full_address.replace('\n', ", "),
            r.center_type,
            r.coordinates,
            r.location_id,
        ));
    }

    body.push_str("Next steps:\n");
    body.push_str("1. Open the booking site\n");
    body.push_str("2. Start a new individual booking\n");
    body.push_str("3. Pick the centre and complete the booking\n\n");
    body.push_str(&format!("Booking site: {booking_url}\n\n"));
    body.push_str("Slots can be taken quickly; act promptly.\n");

    body
}

pub(crate) fn test_subject() -> String {
    "Monitor test message".to_string()
}

pub(crate) fn test_body() -> String {
    format!(
        "This is a test message confirming the notification configuration works.\n\n\
         Sent at: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}
