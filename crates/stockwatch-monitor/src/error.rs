use stockwatch_core::ConfigError;
use stockwatch_locator::LocatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("store watch list is empty; add at least one store id before starting")]
    EmptyWatchList,

    #[error("poll interval is not set; set it in hours before starting")]
    IntervalUnset,

    #[error("no region selected; choose IT, DE or FR before starting")]
    RegionUnset,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("store directory fetch failed: {0}")]
    Fetch(#[from] LocatorError),
}
