//! Client and wire schema for the storefront store-locator endpoint, plus the
//! city lookup that runs over a fetched snapshot.

pub mod client;
pub mod error;
pub mod resolver;
pub(crate) mod retry;
pub mod snapshot;
pub mod types;

pub use client::StoreDirectoryClient;
pub use error::LocatorError;
pub use resolver::{edit_distance, resolve, CityResolution, MAX_SUGGESTIONS};
pub use snapshot::StoreSnapshot;
pub use types::{Location, ScheduleForJsonLd, StoreResponse};
