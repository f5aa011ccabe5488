use std::time::Duration;

use bookmind_domain::id::UserId;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the client talks to and as whom.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:3114`.
    pub base_url: String,
    pub user_id: UserId,
    /// Applied to every request; a hung call fails with `SyncError::Timeout`.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
