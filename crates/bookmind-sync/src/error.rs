use reqwest::StatusCode;

/// Failures surfaced by the sync layer.
///
/// A mutation that returns an error has already been rolled back locally.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    /// Checked locally before any request is sent.
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("action plans are only available for completed mental models")]
    NotCompleted,
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl SyncError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status == StatusCode::CONFLICT)
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
