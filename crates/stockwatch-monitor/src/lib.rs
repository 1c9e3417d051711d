//! Availability monitoring: checks watched stores against each fresh
//! directory snapshot and dispatches webhook notifications on a fixed
//! interval until told to stop.

pub mod checker;
pub mod error;
pub mod scheduler;
pub mod source;

pub use checker::check;
pub use error::MonitorError;
pub use scheduler::{CycleReport, Monitor, MonitorOptions};
pub use source::{Notifier, SnapshotSource};
