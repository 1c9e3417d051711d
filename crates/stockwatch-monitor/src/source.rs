//! Seams between the scheduler and the network.
//!
//! The scheduler is generic over these two traits so tests can substitute
//! in-memory fakes for the store directory and the webhook.

use std::future::Future;

use stockwatch_core::{AvailabilityEvent, Region};
use stockwatch_locator::{LocatorError, StoreDirectoryClient, StoreSnapshot};
use stockwatch_notify::{DeliveryError, WebhookNotifier};

/// Produces a fresh directory snapshot for a region.
pub trait SnapshotSource {
    fn fetch(&self, region: Region) -> impl Future<Output = Result<StoreSnapshot, LocatorError>>;
}

/// Delivers one availability event to a webhook.
pub trait Notifier {
    fn notify(
        &self,
        webhook_url: &str,
        event: &AvailabilityEvent,
    ) -> impl Future<Output = Result<(), DeliveryError>>;
}

impl SnapshotSource for StoreDirectoryClient {
    fn fetch(&self, region: Region) -> impl Future<Output = Result<StoreSnapshot, LocatorError>> {
        self.fetch_region(region)
    }
}

impl Notifier for WebhookNotifier {
    fn notify(
        &self,
        webhook_url: &str,
        event: &AvailabilityEvent,
    ) -> impl Future<Output = Result<(), DeliveryError>> {
        self.dispatch(webhook_url, event)
    }
}

impl<T: SnapshotSource> SnapshotSource for &T {
    fn fetch(&self, region: Region) -> impl Future<Output = Result<StoreSnapshot, LocatorError>> {
        (**self).fetch(region)
    }
}

impl<T: Notifier> Notifier for &T {
    fn notify(
        &self,
        webhook_url: &str,
        event: &AvailabilityEvent,
    ) -> impl Future<Output = Result<(), DeliveryError>> {
        (**self).notify(webhook_url, event)
    }
}
