use std::path::PathBuf;

/// What the scheduler does when a directory fetch still fails after retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailurePolicy {
    /// Log the failure and wait for the next cycle.
    Skip,
    /// Stop the monitor with the fetch error.
    Exit,
}

impl std::fmt::Display for FetchFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailurePolicy::Skip => write!(f, "skip"),
            FetchFailurePolicy::Exit => write!(f, "exit"),
        }
    }
}

/// Whether a store that stays available is re-notified on every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Dispatch every cycle the store is seen available.
    EveryCycle,
    /// Dispatch once, then stay quiet until the store is seen unavailable.
    OnChange,
}

impl std::fmt::Display for NotifyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyPolicy::EveryCycle => write!(f, "every-cycle"),
            NotifyPolicy::OnChange => write!(f, "on-change"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub state_dir: PathBuf,
    pub log_level: String,
    pub product_id: String,
    pub user_agent: String,
    /// Replaces the region's store-locator base URL when set.
    pub directory_url: Option<String>,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_base_secs: u64,
    pub fetch_failure_policy: FetchFailurePolicy,
    pub notify_policy: NotifyPolicy,
    pub show_countdown: bool,
}
