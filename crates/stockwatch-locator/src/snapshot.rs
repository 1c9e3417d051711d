use chrono::{DateTime, Utc};

use crate::types::{Location, StoreResponse};

/// The directory's answer at one point in time.
///
/// Built once from a decoded response and never modified; each poll cycle
/// fetches a fresh one.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    fetched_at: DateTime<Utc>,
    upstream_timestamp: String,
    radius: i64,
    locations: Vec<Location>,
}

impl StoreSnapshot {
    #[must_use]
    pub fn from_response(response: StoreResponse, fetched_at: DateTime<Utc>) -> Self {
        Self {
            fetched_at,
            upstream_timestamp: response.timestamp,
            radius: response.radius,
            locations: response.locations,
        }
    }

    /// Snapshot of an explicit location list, stamped with the current time.
    #[must_use]
    pub fn from_locations(locations: Vec<Location>) -> Self {
        Self {
            fetched_at: Utc::now(),
            upstream_timestamp: String::new(),
            radius: 0,
            locations,
        }
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Timestamp string reported by the endpoint, verbatim.
    #[must_use]
    pub fn upstream_timestamp(&self) -> &str {
        &self.upstream_timestamp
    }

    #[must_use]
    pub fn radius(&self) -> i64 {
        self.radius
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// First location with the given id. The endpoint promises unique ids but
    /// a repeated id resolves to its earliest entry.
    #[must_use]
    pub fn find(&self, store_id: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == store_id)
    }
}
