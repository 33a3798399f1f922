use thiserror::Error;

/// Failures raised while talking to the places directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacesError {
    #[error("places directory is not configured: {0}")]
    Configuration(String),

    #[error("places directory rejected the request with status {status}")]
    ProviderDenied { status: String },

    #[error("network error calling places directory: {0}")]
    Network(String),

    #[error("places directory request timed out after {0}s")]
    Timeout(u64),

    #[error("malformed places directory response: {0}")]
    Malformed(String),
}

impl PlacesError {
    /// True for transport-level failures (network or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, PlacesError::Network(_) | PlacesError::Timeout(_))
    }
}

/// Problems with an incoming trip request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("destination must not be empty")]
    EmptyDestination,
}
