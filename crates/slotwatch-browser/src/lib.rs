pub mod chrome;
pub mod driver;
pub mod error;
pub mod extract;
pub mod navigation;

pub use chrome::{find_chrome, BrowserSession, SessionOptions};
pub use driver::{ChromiumDriver, PageDriver};
pub use error::{BrowserError, ExtractionError, NavigationError};
pub use extract::{extract_records, parse_location_table};
pub use navigation::{
    to_booking_form_opened, to_location_list_loaded, to_page_loaded, NavState, NavTimeouts,
    TerminalState,
};
