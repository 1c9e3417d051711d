//! Shared domain primitives for stockwatch: process configuration, the
//! region table, and the flat-file state the monitor reads every cycle.

pub mod app_config;
pub mod config;
pub mod error;
pub mod event;
pub mod region;
pub mod state;

pub use app_config::{AppConfig, FetchFailurePolicy, NotifyPolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use event::AvailabilityEvent;
pub use region::Region;
pub use state::{MonitorConfig, StateStore};
