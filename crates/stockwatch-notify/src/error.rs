use thiserror::Error;

/// Errors returned by a single webhook delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid webhook URL: {reason}")]
    InvalidUrl { reason: String },

    /// Network, TLS or timeout failure.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The webhook answered with anything other than 204 No Content.
    #[error("webhook returned HTTP {status}, expected 204")]
    UnexpectedStatus { status: u16 },
}
