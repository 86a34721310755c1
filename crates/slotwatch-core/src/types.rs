//! Domain types for location-table extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Centre classification, derived from a visual marker in the row markup.
///
/// Rows carrying the `blue-dot.png` marker asset are Bupa-operated centres;
/// everything else is a regional medical centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterType {
    #[serde(rename = "Bupa Centre")]
    BupaCentre,
    #[serde(rename = "Regional Medical Centre")]
    RegionalMedicalCentre,
}

impl std::fmt::Display for CenterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CenterType::BupaCentre => write!(f, "Bupa Centre"),
            CenterType::RegionalMedicalCentre => write!(f, "Regional Medical Centre"),
        }
    }
}

/// One row of the booking site's location table at extraction time.
///
/// Created fresh on every run and never mutated afterwards. `location_id` is
/// unique per table row within a single page load but is not guaranteed
/// stable across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    /// The row's radio-input value; opaque identifier.
    pub location_id: String,
    /// Display name; the filter key. Non-empty after trim.
    pub location_name: String,
    /// Multi-line free text.
    pub full_address: String,
    /// Free text, e.g. `"4 km"`. Never parsed numerically.
    pub distance: String,
    /// Free text: either the "No available slot" sentinel or a day name,
    /// a `DD/MM/YYYY` date, and a time.
    pub availability_text: String,
    /// `"lat,lon"`; empty when the coordinate element is absent.
    pub coordinates: String,
    pub center_type: CenterType,
    /// True iff `availability_text` does not contain the sentinel.
    pub has_available_slots: bool,
    pub extracted_at: DateTime<Utc>,
}
