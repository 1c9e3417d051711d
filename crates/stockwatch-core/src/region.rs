use std::str::FromStr;

use thiserror::Error;

/// Storefront region the store-locator endpoint is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    It,
    De,
    Fr,
}

#[derive(Debug, Error)]
#[error("unknown region code '{0}'; expected one of IT, DE, FR")]
pub struct ParseRegionError(pub String);

impl Region {
    pub const ALL: [Region; 3] = [Region::It, Region::De, Region::Fr];

    /// Upper-case code persisted in the region state file.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Region::It => "IT",
            Region::De => "DE",
            Region::Fr => "FR",
        }
    }

    /// Store-locator endpoint for this region's storefront, without query.
    #[must_use]
    pub fn directory_base_url(self) -> &'static str {
        match self {
            Region::It => "https://www.sephora.it/on/demandware.store/Sites-Sephora_IT-Site/it_IT/Stores-FindNearestStores",
            Region::De => "https://www.sephora.de/on/demandware.store/Sites-Sephora_DE-Site/de_DE/Stores-FindNearestStores",
            Region::Fr => "https://www.sephora.fr/on/demandware.store/Sites-Sephora_FR-Site/fr_FR/Stores-FindNearestStores",
        }
    }

    /// Search radius sent as `searchedRadius`.
    #[must_use]
    pub fn search_radius(self) -> u32 {
        match self {
            Region::It => 15_000,
            Region::De | Region::Fr => 150_000,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IT" => Ok(Region::It),
            "DE" => Ok(Region::De),
            "FR" => Ok(Region::Fr),
            _ => Err(ParseRegionError(s.trim().to_string())),
        }
    }
}
