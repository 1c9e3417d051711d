use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use stockwatch_core::AvailabilityEvent;

use crate::error::DeliveryError;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Body accepted by Discord-style webhooks.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts availability events to an operator webhook.
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new() -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Makes exactly one delivery attempt for `event`.
    ///
    /// Callers only pass events whose store is available; the message text
    /// assumes it.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::InvalidUrl`] if `webhook_url` does not parse.
    /// - [`DeliveryError::Transport`] on network failure or timeout.
    /// - [`DeliveryError::UnexpectedStatus`] for any status other than 204.
    pub async fn dispatch(
        &self,
        webhook_url: &str,
        event: &AvailabilityEvent,
    ) -> Result<(), DeliveryError> {
        // The URL is a credential; keep it out of errors and logs.
        let url = Url::parse(webhook_url).map_err(|e| DeliveryError::InvalidUrl {
            reason: e.to_string(),
        })?;

        let content = availability_message(event);
        let response = self
            .client
            .post(url)
            .json(&WebhookPayload { content: &content })
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            return Err(DeliveryError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::debug!(store_id = %event.store_id, "webhook notification delivered");
        Ok(())
    }
}

/// Human-readable notification text naming the store and its address.
#[must_use]
pub fn availability_message(event: &AvailabilityEvent) -> String {
    format!(
        "**STOCKWATCH** The product is available in the store **{}**!\nStore address: {}",
        event.name, event.address
    )
}
