use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::domain::types::Like;
use crate::error::ReadingServiceError;
use crate::handlers::mental_models::MentalModelResponse;
use crate::handlers::{CurrentUser, SuccessResponse};
use crate::state::AppState;
use crate::usecase::like::{
    LikeMentalModelUseCase, ListLikedMentalModelsUseCase, UnlikeMentalModelUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub mental_model_id: String,
    pub user_id: String,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            mental_model_id: like.mental_model_id.to_string(),
            user_id: like.user_id.0,
            created_at: like.created_at,
        }
    }
}

// ── POST /likes/mental-models/{mental_model_id} ──────────────────────────────

/// Idempotent: a repeated like returns the stored row with 200.
pub async fn like_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(mental_model_id): Path<String>,
) -> Result<Json<LikeResponse>, ReadingServiceError> {
    let usecase = LikeMentalModelUseCase {
        mental_models: state.mental_model_repo(),
        likes: state.like_repo(),
    };
    let like = usecase.execute(&mental_model_id, &user.id).await?;
    Ok(Json(like.into()))
}

// ── DELETE /likes/mental-models/{mental_model_id} ────────────────────────────

pub async fn unlike_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(mental_model_id): Path<String>,
) -> Result<Json<SuccessResponse>, ReadingServiceError> {
    let usecase = UnlikeMentalModelUseCase {
        likes: state.like_repo(),
    };
    usecase.execute(&mental_model_id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}

// ── GET /likes/mental-models ─────────────────────────────────────────────────

pub async fn list_liked_mental_models(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MentalModelResponse>>, ReadingServiceError> {
    let usecase = ListLikedMentalModelsUseCase {
        likes: state.like_repo(),
    };
    let views = usecase.execute(&user.id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}
