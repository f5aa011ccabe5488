//! Identity header extractor.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};
use http::request::Parts;

use bookmind_domain::error_body::ErrorBody;
use bookmind_domain::id::UserId;

pub const IDENTITY_HEADER: &str = "authorization";

/// Caller identity carried in the `authorization` header.
///
/// The header value is the user id issued by the identity provider. It is
/// not checked against the user table here; see `CurrentUser` in the
/// service for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeader {
    pub user_id: UserId,
}

/// Missing, blank or non-UTF-8 identity header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unauthorized")]
pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            code: "UNAUTHORIZED".to_owned(),
        };
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl IdentityHeader {
    /// Read the caller id from a header map.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, MissingIdentity> {
        let user_id = headers
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<UserId>().ok())
            .ok_or(MissingIdentity)?;
        Ok(Self { user_id })
    }
}

impl<S> FromRequestParts<S> for IdentityHeader
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = Self::from_headers(&parts.headers);
        async move { identity }
    }
}
