use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use bookmind_domain::id::UserId;

use crate::domain::types::{User, UserProfile};
use crate::error::ReadingServiceError;
use crate::handlers::CurrentUser;
use crate::state::AppState;
use crate::usecase::user::UpsertUserUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub organization_id: Option<String>,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            email_verified: user.email_verified,
            profile_picture_url: user.profile_picture_url,
            organization_id: user.organization_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /auth/callback ──────────────────────────────────────────────────────

/// Profile delivered by the identity provider after a successful login.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCallbackRequest {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub organization_id: Option<String>,
}

pub async fn auth_callback(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<AuthCallbackRequest>, ReadingServiceError>,
) -> Result<Json<UserResponse>, ReadingServiceError> {
    let usecase = UpsertUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(UserProfile {
            id: UserId(body.id.trim().to_owned()),
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            email_verified: body.email_verified,
            profile_picture_url: body.profile_picture_url,
            organization_id: body.organization_id,
        })
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
