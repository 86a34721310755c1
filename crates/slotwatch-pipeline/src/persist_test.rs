use chrono::{TimeZone, Utc};

use slotwatch_core::types::CenterType;

use super::*;

fn sample_record() -> LocationRecord {
    LocationRecord {
        location_id: "193".to_string(),
        location_name: "Perth".to_string(),
        full_address: "Perth - Bupa Centre\nLevel 3,\n2 Mill Street,\nPerth".to_string(),
        distance: "4 km".to_string(),
        availability_text: "Saturday 23/08/2025\n03:00 PM".to_string(),
        coordinates: "-31.9548200,115.8526330".to_string(),
        center_type: CenterType::BupaCentre,
        has_available_slots: true,
        extracted_at: Utc.with_ymd_and_hms(2025, 8, 20, 10, 30, 0).unwrap(),
    }
}

#[test]
fn csv_snapshot_has_header_and_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_csv_snapshot(&path, &[sample_record(), sample_record()]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // Quoted fields keep their embedded newlines, so count records by the
    // leading id instead of raw line count.
    assert!(lines[0].starts_with("location_id,location_name"));
    assert_eq!(content.matches("193,Perth").count(), 2);
}

#[test]
fn csv_quotes_fields_with_delimiters_and_newlines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_csv_snapshot(&path, &[sample_record()]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"Perth - Bupa Centre\nLevel 3,\n2 Mill Street,\nPerth\""));
    assert!(content.contains("\"-31.9548200,115.8526330\""));
    assert!(content.contains("Bupa Centre"));
    assert!(content.contains("2025-08-20 10:30:00"));
}

#[test]
fn csv_doubles_embedded_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut record = sample_record();
    record.full_address = "the \"old\" surgery".to_string();
    write_csv_snapshot(&path, &[record]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"the \"\"old\"\" surgery\""));
}

#[test]
fn json_snapshot_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    write_json_snapshot(&path, &[sample_record()]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<LocationRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].location_name, "Perth");
    assert_eq!(parsed[0].center_type, CenterType::BupaCentre);
}

#[test]
fn persist_snapshots_skips_empty_record_set() {
    let dir = tempfile::tempdir().unwrap();

    persist_snapshots(dir.path(), &[]);

    assert!(!dir.path().join("slot_locations.csv").exists());
    assert!(!dir.path().join("slot_locations.json").exists());
}

#[test]
fn persist_snapshots_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();

    persist_snapshots(dir.path(), &[sample_record()]);

    assert!(dir.path().join("slot_locations.csv").exists());
    assert!(dir.path().join("slot_locations.json").exists());
}
