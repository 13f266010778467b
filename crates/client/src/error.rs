//! Client-side failure taxonomy.

use smartbiz_auth::StoreError;
use smartbiz_core::DomainError;

/// Every way a client call can fail.
///
/// Each variant carries the user-facing message (server-provided when there
/// was one, otherwise a per-operation fallback). The panels only ever show
/// [`ClientError::message`]; the variant is kept for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No response reached us (connection refused, DNS, reset...).
    #[error("{message}")]
    Network { message: String, detail: String },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A required field was missing; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// A 2xx response whose body did not have the expected shape.
    #[error("{message}")]
    Decode { message: String, detail: String },

    /// The session could not be persisted.
    #[error("{0}")]
    Storage(String),
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Network { message, .. }
            | ClientError::Server { message, .. }
            | ClientError::Decode { message, .. } => message,
            ClientError::Validation(message) | ClientError::Storage(message) => message,
        }
    }

    /// HTTP status, for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        ClientError::Validation(err.detail().to_string())
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        ClientError::Storage(format!("Failed to save session: {err}"))
    }
}
