use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;

use bookmind_auth_types::identity::IdentityHeader;

use crate::domain::types::User;
use crate::error::ReadingServiceError;
use crate::state::AppState;
use crate::usecase::user::GetUserUseCase;

pub mod action_plans;
pub mod books;
pub mod google_books;
pub mod health;
pub mod likes;
pub mod mental_models;
pub mod users;

/// The caller, resolved from the identity header to a stored user.
///
/// Rejects with 401 when the header is missing and 404 `USER_NOT_FOUND`
/// when no user has that id.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ReadingServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = IdentityHeader::from_headers(&parts.headers);
        let usecase = GetUserUseCase {
            repo: state.user_repo(),
        };
        async move {
            let identity = identity?;
            let user = usecase.execute(&identity.user_id).await?;
            Ok(Self(user))
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
