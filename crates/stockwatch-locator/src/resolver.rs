//! City lookup over a store snapshot.
//!
//! Matching is case-insensitive on the whole city string. When no store sits
//! in the requested city the closest city names by Levenshtein distance are
//! offered instead.

use crate::snapshot::StoreSnapshot;
use crate::types::Location;

/// Maximum number of city suggestions returned on a miss.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug)]
pub enum CityResolution<'a> {
    /// Every location whose city equals the query, in snapshot order.
    Exact(Vec<&'a Location>),
    /// Closest distinct cities, nearest first; ties keep first-seen order.
    /// Empty when the snapshot has no locations.
    Suggestions(Vec<String>),
}

/// Resolves free-text `query` against the cities in `snapshot`.
#[must_use]
pub fn resolve<'a>(query: &str, snapshot: &'a StoreSnapshot) -> CityResolution<'a> {
    let folded_query = query.to_lowercase();

    let exact: Vec<&Location> = snapshot
        .locations()
        .iter()
        .filter(|loc| loc.city.to_lowercase() == folded_query)
        .collect();
    if !exact.is_empty() {
        return CityResolution::Exact(exact);
    }

    // Distinct cities by folded name, first spelling wins.
    let mut cities: Vec<(String, &str)> = Vec::new();
    for loc in snapshot.locations() {
        let folded = loc.city.to_lowercase();
        if !cities.iter().any(|(seen, _)| *seen == folded) {
            cities.push((folded, loc.city.as_str()));
        }
    }

    let mut ranked: Vec<(usize, &str)> = cities
        .iter()
        .map(|(folded, display)| (edit_distance(&folded_query, folded), *display))
        .collect();
    // Stable sort keeps first-seen order among equal distances.
    ranked.sort_by_key(|(distance, _)| *distance);

    CityResolution::Suggestions(
        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, city)| city.to_string())
            .collect(),
    )
}

/// Levenshtein distance over Unicode scalar values; insert, delete and
/// substitute each cost 1.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
