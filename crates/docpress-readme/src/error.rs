//! Error types for the hosted docs API.

/// Error from hosted docs API operations.
#[derive(Debug, thiserror::Error)]
pub enum ReadMeError {
    /// HTTP request error.
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Category creation failed.
    #[error("failed to create category '{0}'")]
    CategoryCreate(String),

    /// Document creation or update failed.
    #[error("failed to {action} doc '{title}'")]
    DocWrite { action: &'static str, title: String },

    /// No stable version exists on the remote service.
    #[error("no stable version found")]
    NoStableVersion,

    /// Version lifecycle operation failed.
    #[error("version operation failed: {0}")]
    Version(String),
}

impl From<serde_json::Error> for ReadMeError {
    fn from(e: serde_json::Error) -> Self {
        ReadMeError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ReadMeError {
    fn from(e: ureq::Error) -> Self {
        ReadMeError::Http {
            status: 0,
            body: e.to_string(),
        }
    }
}
