//! Error types for the client data layer.
//!
//! `ApiError` is the typed taxonomy of the HTTP boundary. The store
//! deliberately collapses every variant into a single user-visible
//! failure outcome; the distinctions exist for logging and for callers
//! that use the raw client directly.

/// Errors from the portal API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the portal API at {0}")]
    Connect(String),
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP transport error: {0}")]
    Http(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Parse(String),
}

/// Errors from store operations.
///
/// Fetch failures never surface here; they are absorbed into the
/// store's empty-result state and a notification. Only an unusable
/// shared state escapes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Internal lock error")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::Connect("http://localhost:8080".into());
        assert_eq!(
            err.to_string(),
            "Cannot reach the portal API at http://localhost:8080"
        );

        let err = ApiError::Status {
            status: 503,
            message: "maintenance window".into(),
        };
        assert_eq!(err.to_string(), "Server returned 503: maintenance window");
    }

    #[test]
    fn store_error_display() {
        assert_eq!(StoreError::LockPoisoned.to_string(), "Internal lock error");
    }
}
