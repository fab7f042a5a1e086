use thiserror::Error;

/// Failure to get any HTTP response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}

/// Failure reading or writing durable client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Client-level error type.
/// Controllers convert these into notifications; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Authentication failed. Please login again.")]
    AuthenticationFailed,

    #[error("HTTP error! status: {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// The server-provided message, when the API sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_message_asks_for_login() {
        let err = ClientError::AuthenticationFailed;
        assert_eq!(err.to_string(), "Authentication failed. Please login again.");
    }

    #[test]
    fn test_http_error_exposes_server_message() {
        let err = ClientError::Http {
            status: 400,
            message: Some("Username already exists".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 400");
        assert_eq!(err.server_message(), Some("Username already exists"));
    }
}
