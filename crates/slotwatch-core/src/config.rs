//! Process-wide configuration.
//!
//! Loaded exactly once at startup and passed down; no module reads the
//! environment ad hoc after init. The builders take an env-var lookup
//! closure so tests can drive them from a plain `HashMap` without touching
//! process state.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::ConfigError;

/// Booking-flow entry point on the appointment site.
pub const BOOKING_URL_DEFAULT: &str =
    "https://bmvs.onlineappointmentscheduling.net.au/oasis/Default.aspx";

/// Monitoring configuration: what to watch and how often.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub booking_url: String,
    /// Location allow-list; comparison is exact after trim on both sides.
    pub monitored_locations: Vec<String>,
    /// Inclusive upper bound on acceptable appointment dates.
    pub cutoff_date: NaiveDate,
    pub check_interval_minutes: u64,
    /// Explicit Chrome binary; discovery runs when unset.
    pub chrome_path: Option<PathBuf>,
    /// Where snapshots and screenshots land.
    pub output_dir: PathBuf,
    pub log_level: String,
}

/// Notification delivery settings; only required by commands that notify.
#[derive(Clone)]
pub struct NotifyConfig {
    pub api_url: String,
    pub api_token: String,
    pub email_to: String,
    pub email_from: String,
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"[redacted]")
            .field("email_to", &self.email_to)
            .field("email_from", &self.email_from)
            .finish()
    }
}

/// Load monitoring configuration from the environment.
///
/// Calls `dotenvy::dotenv().ok()` to pick up a `.env` file before reading.
///
/// # Errors
///
/// Returns [`ConfigError`] if a value fails to parse.
pub fn load_monitor_config() -> Result<MonitorConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_monitor_config(|key| std::env::var(key))
}

/// Load notifier configuration from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] if a required delivery setting is
/// absent.
pub fn load_notify_config() -> Result<NotifyConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_notify_config(|key| std::env::var(key))
}

/// Build monitoring configuration using the provided env-var lookup.
pub(crate) fn build_monitor_config<F>(lookup: F) -> Result<MonitorConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let monitored_locations = parse_location_list(&or_default(
        "MONITOR_LOCATIONS",
        "Perth,Booragoon,Fremantle",
    ));

    let raw_cutoff = or_default("CUTOFF_DATE", "2025-08-29");
    let cutoff_date = NaiveDate::parse_from_str(&raw_cutoff, "%Y-%m-%d").map_err(|e| {
        ConfigError::InvalidEnvVar {
            var: "CUTOFF_DATE".to_string(),
            reason: e.to_string(),
        }
    })?;

    let raw_interval = or_default("CHECK_INTERVAL_MINUTES", "30");
    let check_interval_minutes =
        raw_interval
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "CHECK_INTERVAL_MINUTES".to_string(),
                reason: e.to_string(),
            })?;
    if check_interval_minutes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHECK_INTERVAL_MINUTES".to_string(),
            reason: "interval must be at least 1 minute".to_string(),
        });
    }

    let booking_url = or_default("SLOTWATCH_BOOKING_URL", BOOKING_URL_DEFAULT);
    let chrome_path = lookup("SLOTWATCH_CHROME_PATH").ok().map(PathBuf::from);
    let output_dir = PathBuf::from(or_default("SLOTWATCH_OUTPUT_DIR", "."));
    let log_level = or_default("SLOTWATCH_LOG_LEVEL", "info");

    Ok(MonitorConfig {
        booking_url,
        monitored_locations,
        cutoff_date,
        check_interval_minutes,
        chrome_path,
        output_dir,
        log_level,
    })
}

/// Build notifier configuration using the provided env-var lookup.
pub(crate) fn build_notify_config<F>(lookup: F) -> Result<NotifyConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let api_url = require("NOTIFY_API_URL")?;
    let api_token = require("NOTIFY_API_TOKEN")?;
    let email_to = require("NOTIFY_EMAIL_TO")?;
    let email_from =
        lookup("NOTIFY_EMAIL_FROM").unwrap_or_else(|_| "slotwatch@localhost".to_string());

    Ok(NotifyConfig {
        api_url,
        api_token,
        email_to,
        email_from,
    })
}

/// Split a comma-separated location list, trimming entries and dropping
/// empties so `"Perth, Booragoon,"` behaves sensibly.
fn parse_location_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
