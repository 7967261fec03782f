//! Errors arising from calls to the hosting service.

use thiserror::Error;

/// Transport-level failures. All of them abort the build; nothing retries.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("request to {url} failed with HTTP status {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The request could not be completed (DNS, TLS, connection reset...).
    #[error("request to {url} failed: {reason}")]
    Request {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("unexpected response from {url}: {reason}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Reading the response body failed.
    #[error("I/O error reading response from {url}: {source}")]
    Io {
        /// The URL that was requested.
        url: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Return the URL the failing request targeted.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Request { url, .. }
            | Self::Decode { url, .. }
            | Self::Io { url, .. } => url,
        }
    }
}
