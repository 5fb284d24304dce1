use thiserror::Error;

/// Failures surfaced by the backend clients and the chat store.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached at all.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// Caller referenced a chat id that is not in the session.
    #[error("unknown chat id '{0}'")]
    UnknownChat(String),

    /// Message content was empty or whitespace-only.
    #[error("message content is blank")]
    BlankMessage,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Protocol(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
            }
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Startup configuration failures. These are fatal: the client cannot do
/// anything without a base URL.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PAPERCHAT_API_BASE environment variable is not set")]
    MissingApiBase,

    #[error("invalid API base URL '{raw}': {source}")]
    InvalidApiBase {
        raw: String,
        source: url::ParseError,
    },
}
