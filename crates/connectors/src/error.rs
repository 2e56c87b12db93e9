use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be turned into the report endpoint.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Credentials cannot be sent as an HTTP header")]
    InvalidHeader,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
