use std::collections::HashSet;

use stockwatch_core::AvailabilityEvent;
use stockwatch_locator::StoreSnapshot;

/// Classifies every watched store found in `snapshot`.
///
/// Events follow watch-list order. A store id listed twice yields one event.
/// Ids absent from the snapshot yield nothing: store coverage varies by
/// region and over time, so a missing store is not an error.
#[must_use]
pub fn check(snapshot: &StoreSnapshot, watch_list: &[String]) -> Vec<AvailabilityEvent> {
    let mut seen = HashSet::new();
    watch_list
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| snapshot.find(id))
        .map(|loc| AvailabilityEvent {
            store_id: loc.id.clone(),
            name: loc.name.clone(),
            address: loc.address1.clone(),
            available: loc.product_availability,
        })
        .collect()
}
