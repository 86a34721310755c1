//! Match notification over an HTTP email-delivery API.
//!
//! One message per run with the current match set. The transport contract
//! is deliberately thin: POST a JSON message with bearer auth, 2xx means
//! delivered. The caller never retries; the next scheduled run re-notifies
//! while a slot stays open.

mod error;
mod message;

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use slotwatch_core::{MatchResult, NotifyConfig};

pub use error::NotifyError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct OutboundEmail {
    message: Message,
}

#[derive(Debug, Serialize)]
struct Message {
    to: String,
    from: String,
    subject: String,
    body: String,
}

pub struct Notifier {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl Notifier {
    /// Build a notifier with a bounded-timeout HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the client cannot be constructed.
    pub fn new(config: NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    /// Notify the operator about the run's matching slots.
    ///
    /// An empty match set sends nothing and succeeds, so callers can invoke
    /// this unconditionally once per run.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::UnexpectedStatus`] on a non-2xx response or
    /// [`NotifyError::Http`] on transport failure.
    pub async fn send_match_notification(
        &self,
        matches: &[MatchResult],
        cutoff_date: NaiveDate,
        booking_url: &str,
    ) -> Result<(), NotifyError> {
        if matches.is_empty() {
            tracing::info!("no matching slots; nothing to notify");
            return Ok(());
        }

        let subject = message::match_subject(matches.len());
        let body = message::match_body(matches, cutoff_date, booking_url);
        self.post_message(subject, body).await?;

        tracing::info!(matches = matches.len(), to = %self.config.email_to, "notification sent");
        Ok(())
    }

    /// Send a fixed test message to verify delivery configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::send_match_notification`].
    pub async fn send_test_message(&self) -> Result<(), NotifyError> {
        self.post_message(message::test_subject(), message::test_body())
            .await?;
        tracing::info!(to = %self.config.email_to, "test message sent");
        Ok(())
    }

    async fn post_message(&self, subject: String, body: String) -> Result<(), NotifyError> {
        let payload = OutboundEmail {
            message: Message {
                to: self.config.email_to.clone(),
                from: self.config.email_from.clone(),
                subject,
                body,
            },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
