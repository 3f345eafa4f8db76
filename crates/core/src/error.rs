//! Transport-level error taxonomy.
//!
//! Transport errors are the only retryable class in the system. Validation
//! and execution errors are deterministic and retrying them cannot help, so
//! they live with their own layers (`pantry-movements`, `pantry-service`).

use std::time::Duration;

use thiserror::Error;

/// A failure between the client and the catalog backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The call exceeded its timeout budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection failed before a request could complete.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request was sent but no response ever arrived.
    #[error("no response received")]
    NoResponse,

    /// The backend answered with an error status.
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

impl TransportError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether a retry has any chance of succeeding.
    ///
    /// Timeouts, dropped connections, and missing responses are transient.
    /// Status responses are transient only when the backend flags buffering
    /// or connection trouble, or when the status itself is a timeout (408).
    /// Other 4xx responses are client errors and are never retried.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Timeout(_) | TransportError::Connection(_) | TransportError::NoResponse => true,
            TransportError::Status { status, message } => {
                if *status == 408 {
                    return true;
                }
                let msg = message.to_ascii_lowercase();
                *status >= 500 && (msg.contains("buffering") || msg.contains("connection operation"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_connection_failures_are_transient() {
        assert!(TransportError::Timeout(Duration::from_secs(5)).is_transient());
        assert!(TransportError::connection("reset by peer").is_transient());
        assert!(TransportError::NoResponse.is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        assert!(!TransportError::status(400, "bad request").is_transient());
        assert!(!TransportError::status(404, "not found").is_transient());
        assert!(!TransportError::status(422, "unprocessable").is_transient());
    }

    #[test]
    fn timeout_coded_4xx_is_transient() {
        assert!(TransportError::status(408, "request timeout").is_transient());
    }

    #[test]
    fn flagged_server_errors_are_transient() {
        assert!(TransportError::status(503, "buffering in progress").is_transient());
        assert!(TransportError::status(500, "connection operation failed").is_transient());
        assert!(!TransportError::status(500, "internal error").is_transient());
    }
}
