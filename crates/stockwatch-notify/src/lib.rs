//! Webhook delivery of availability events.
//!
//! One POST per event, no retry and no queue: a failed delivery is reported
//! to the caller and the event is dropped.

pub mod error;
pub mod webhook;

pub use error::DeliveryError;
pub use webhook::{availability_message, WebhookNotifier};
