use thiserror::Error;

/// Failure talking to one of the hosted collaborators (webhook or event store).
///
/// Never shown to visitors; callers log it and fall back to a degraded value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Remote store is not configured")]
    NotConfigured,
}

impl From<gloo_net::Error> for RemoteError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => RemoteError::Decode(e.to_string()),
            other => RemoteError::Network(other.to_string()),
        }
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
