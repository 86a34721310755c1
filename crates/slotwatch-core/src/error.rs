use thiserror::Error;

/// Errors raised while loading process configuration from the environment.
///
/// Fatal at startup: no run is attempted with a broken configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while parsing an availability text into a calendar date.
///
/// Always recoverable: the affected record is skipped with a warning and the
/// run continues.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no DD/MM/YYYY date found on the first line")]
    NoDateFound,

    #[error("matched date \"{0}\" is not a valid calendar date")]
    InvalidCalendarDate(String),
}
