//! Mock identity helpers for integration tests.
//!
//! In production the identity provider hands the browser a user id that is
//! sent back in the `authorization` header. Tests inject that header
//! directly so no real provider is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use bookmind_auth_types::identity::IDENTITY_HEADER;
use bookmind_domain::id::UserId;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
}

impl MockAuth {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Return headers as if the browser sent them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HeaderName::from_static(IDENTITY_HEADER), self.header_value());
        map
    }

    pub fn header_name(&self) -> HeaderName {
        HeaderName::from_static(IDENTITY_HEADER)
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(self.user_id.as_str()).unwrap()
    }
}
