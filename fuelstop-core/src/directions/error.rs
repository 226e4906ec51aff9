use thiserror::Error;

/// Errors from [`crate::DirectionsProvider::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The request did not complete within the configured timeout.
    #[error("directions request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("directions request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail from the HTTP client.
        message: String,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail from the HTTP client.
        message: String,
    },
    /// The service answered but reported a failure code.
    #[error("directions service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidQuery`.
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Decoder error text.
        message: String,
    },
    /// The service found no route between the endpoints.
    #[error("no route found between the requested endpoints")]
    NoRoute,
}
