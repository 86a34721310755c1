pub mod availability;
pub mod config;
pub mod error;
pub mod filter;
pub mod types;

pub use availability::{parse_availability, AvailabilityParser, DayFirstDateParser};
pub use config::{
    load_monitor_config, load_notify_config, MonitorConfig, NotifyConfig, BOOKING_URL_DEFAULT,
};
pub use error::{ConfigError, ParseError};
pub use filter::{filter_matching_slots, MatchResult};
pub use types::{CenterType, LocationRecord};
