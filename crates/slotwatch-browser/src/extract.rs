//! Location-table extraction.
//!
//! The driver hands over the table's outer HTML and everything after that is
//! pure parsing, so row extraction is testable without a browser. Row
//! failures are isolated: a missing sub-element skips that row with a
//! warning and extraction continues.

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};

use slotwatch_core::availability::NO_SLOT_SENTINEL;
use slotwatch_core::types::{CenterType, LocationRecord};

use crate::driver::PageDriver;
use crate::error::ExtractionError;
use crate::navigation::{wait_for_element, NavTimeouts};

/// Container table on the location-selection page.
pub const TABLE_SELECTOR: &str = "table.tbl-location";

/// Marker asset distinguishing Bupa-operated centres in the row markup.
const BUPA_MARKER: &str = "blue-dot.png";

/// Wait for the location table and turn its rows into records.
///
/// # Errors
///
/// [`ExtractionError::TableNotFound`] if the table never appears within the
/// bound; [`ExtractionError::Browser`] if the driver fails underneath.
pub async fn extract_records(
    driver: &dyn PageDriver,
    timeouts: &NavTimeouts,
) -> Result<Vec<LocationRecord>, ExtractionError> {
    let present = wait_for_element(driver, TABLE_SELECTOR, timeouts.table, timeouts.poll).await?;
    if !present {
        return Err(ExtractionError::TableNotFound);
    }

    let html = driver
        .outer_html(TABLE_SELECTOR)
        .await?
        .ok_or(ExtractionError::TableNotFound)?;

    Ok(parse_location_table(&html))
}

/// Parse the location table's HTML into records, in document order.
///
/// Pure function of the markup apart from the `extracted_at` stamp. Rows
/// with a missing required sub-element are skipped with a warning; the
/// coordinate lookup is best-effort and never fails a row.
#[must_use]
pub fn parse_location_table(html: &str) -> Vec<LocationRecord> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tbody tr.trlocation").expect("valid selector");

    let mut records = Vec::new();
    for (index, row) in document.select(&row_selector).enumerate() {
        match parse_row(row, index) {
            Ok(record) => {
                tracing::debug!(
                    location = %record.location_name,
                    availability = %record.availability_text,
                    "extracted row"
                );
                records.push(record);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping row");
            }
        }
    }

    tracing::info!(count = records.len(), "extracted location records");
    records
}

fn parse_row(row: ElementRef<'_>, index: usize) -> Result<LocationRecord, ExtractionError> {
    let missing = |field: &'static str| ExtractionError::RowFieldMissing { row: index, field };

    let radio_selector = Selector::parse("input.rbLocation").expect("valid selector");
    let location_id = row
        .select(&radio_selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .ok_or_else(|| missing("location_id"))?
        .to_owned();

    let name_cell_selector = Selector::parse(".tdloc_name").expect("valid selector");
    let name_cell = row
        .select(&name_cell_selector)
        .next()
        .ok_or_else(|| missing("location_name"))?;

    let title_selector = Selector::parse(".tdlocNameTitle").expect("valid selector");
    let location_name = name_cell
        .select(&title_selector)
        .next()
        .map(text_with_breaks)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("location_name"))?;

    // The first plain span in the name cell carries the multi-line address.
    let address_selector = Selector::parse("span").expect("valid selector");
    let full_address = name_cell
        .select(&address_selector)
        .next()
        .map(text_with_breaks)
        .ok_or_else(|| missing("full_address"))?;

    let distance_selector = Selector::parse(".td-distance span").expect("valid selector");
    let distance = row
        .select(&distance_selector)
        .next()
        .map(text_with_breaks)
        .ok_or_else(|| missing("distance"))?;

    let availability_selector = Selector::parse(".tdloc_availability span").expect("valid selector");
    let availability_text = row
        .select(&availability_selector)
        .next()
        .map(text_with_breaks)
        .ok_or_else(|| missing("availability"))?;

    // Best-effort: an absent or unresolvable coordinate element yields an
    // empty string. The id is interpolated from page data, so the selector
    // itself may fail to parse.
    let coordinates = Selector::parse(&format!("input[id=\"{location_id}hidCoords\"]"))
        .ok()
        .and_then(|sel| {
            row.select(&sel)
                .next()
                .and_then(|el| el.value().attr("value").map(ToOwned::to_owned))
        })
        .unwrap_or_default();

    let center_type = if row.html().contains(BUPA_MARKER) {
        CenterType::BupaCentre
    } else {
        CenterType::RegionalMedicalCentre
    };

    let has_available_slots = !availability_text.contains(NO_SLOT_SENTINEL);

    Ok(LocationRecord {
        location_id,
        location_name,
        full_address,
        distance,
        availability_text,
        coordinates,
        center_type,
        has_available_slots,
        extracted_at: Utc::now(),
    })
}

/// Collect an element's rendered text, turning `<br>` into newlines.
///
/// Each line is trimmed and blank lines are dropped so indentation in the
/// source markup does not leak into the record.
fn text_with_breaks(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            scraper::Node::Text(text) => raw.push_str(text),
            scraper::Node::Element(element) if element.name() == "br" => raw.push('\n'),
            _ => {}
        }
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
