//! Snapshot persistence for extracted records.
//!
//! Purely observational: archival failures are logged warnings and never
//! fail the run. Downstream tooling reads the CSV; the JSON snapshot keeps
//! the full structured records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use slotwatch_core::LocationRecord;

const CSV_FILE: &str = "slot_locations.csv";
const JSON_FILE: &str = "slot_locations.json";

const CSV_HEADER: &str = "location_id,location_name,full_address,distance,availability,\
coordinates,center_type,has_available_slots,extracted_time";

/// Write both snapshot files into `dir`, logging (not propagating) failures.
pub fn persist_snapshots(dir: &Path, records: &[LocationRecord]) {
    if records.is_empty() {
        tracing::debug!("no records to persist");
        return;
    }

    let csv_path = dir.join(CSV_FILE);
    match write_csv_snapshot(&csv_path, records) {
        Ok(()) => tracing::info!(path = %csv_path.display(), "wrote CSV snapshot"),
        Err(e) => tracing::warn!(path = %csv_path.display(), error = %e, "CSV snapshot failed"),
    }

    let json_path = dir.join(JSON_FILE);
    match write_json_snapshot(&json_path, records) {
        Ok(()) => tracing::info!(path = %json_path.display(), "wrote JSON snapshot"),
        Err(e) => tracing::warn!(path = %json_path.display(), error = %e, "JSON snapshot failed"),
    }
}

/// One header line then one line per record, in extraction order.
///
/// # Errors
///
/// Returns the underlying I/O error; callers treat it as observational.
pub fn write_csv_snapshot(path: &Path, records: &[LocationRecord]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{CSV_HEADER}")?;

    for record in records {
        let fields = [
            record.location_id.as_str(),
            record.location_name.as_str(),
            record.full_address.as_str(),
            record.distance.as_str(),
            record.availability_text.as_str(),
            record.coordinates.as_str(),
            &record.center_type.to_string(),
            if record.has_available_slots {
                "true"
            } else {
                "false"
            },
            &record.extracted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
        .map(csv_field);
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()
}

/// Pretty-printed JSON array of the full records.
///
/// # Errors
///
/// Returns the underlying I/O error; callers treat it as observational.
pub fn write_json_snapshot(path: &Path, records: &[LocationRecord]) -> std::io::Result<()> {
    let out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(out, records).map_err(std::io::Error::from)
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') || raw.contains('\r') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod tests;
