use thiserror::Error;

/// Errors raised while delivering a notification.
///
/// The watch loop logs these and continues; a failed notification never
/// stops monitoring.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("delivery API returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },
}
