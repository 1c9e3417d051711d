use thiserror::Error;

/// Errors returned while fetching or decoding a store directory snapshot.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// DNS, connect, TLS or timeout failure, including a failed body read.
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    Protocol { status: u16, url: String },

    /// The body is not the expected JSON shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid directory endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
