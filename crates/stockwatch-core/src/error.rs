use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading process configuration or persisted state.
///
/// A state file that does not exist is never an error; callers get the
/// default value instead. `Read` and `InvalidValue` mean the file exists but
/// cannot be trusted, which is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read state file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write state file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value in {}: {reason}", path.display())]
    InvalidValue { path: PathBuf, reason: String },
}
