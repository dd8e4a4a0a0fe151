//! Exchange error types.

use thiserror::Error;

use crate::ContextError;

/// Boxed error used for failures reported by a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for exchange operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Failures that abort an exchange.
///
/// Errors reported by the GraphQL server inside a successful response are not
/// represented here; they are returned as the `Ok` value of
/// [`GraphQLClient::run`](crate::GraphQLClient::run).
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The context was cancelled or its deadline passed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The request envelope could not be serialized.
    #[error("encode body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The transport call failed. The collaborator's error is kept as is.
    #[error(transparent)]
    Transport(BoxError),

    /// The server answered with a status other than 200 OK.
    #[error("HTTP Error {status}: graphql server returned a non-200 status code")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be read.
    #[error("reading body: {0}")]
    Read(#[source] BoxError),

    /// The response body is not a valid response envelope.
    #[error("decoding response: {0}")]
    Decoding(#[source] serde_json::Error),
}

impl ExchangeError {
    /// Check if the exchange was cancelled through its context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Context(ContextError::Cancelled))
    }

    /// Check if the context deadline passed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Context(ContextError::DeadlineExceeded))
    }

    /// Check if this is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Get the HTTP status code if this is a status failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}
