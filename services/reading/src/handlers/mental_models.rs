use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookmind_domain::reflection::{Answers, AnswersPatch};
use bookmind_domain::status::MentalModelStatus;

use crate::domain::types::{Book, MentalModelChanges, MentalModelView};
use crate::error::ReadingServiceError;
use crate::handlers::{CurrentUser, SuccessResponse};
use crate::state::AppState;
use crate::usecase::mental_model::{
    CreateMentalModelInput, CreateMentalModelUseCase, DeleteMentalModelUseCase,
    GetMentalModelUseCase, ListMentalModelsUseCase, UpdateMentalModelInput,
    UpdateMentalModelUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Book embedded in a mental model response (no `createdAt`).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedBook {
    pub id: String,
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

impl From<Book> for EmbeddedBook {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            google_book_id: book.google_book_id,
            title: book.title,
            authors: book.authors,
            thumbnail_url: book.thumbnail_url,
            description: book.description,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalModelResponse {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub status: MentalModelStatus,
    #[serde(flatten)]
    pub answers: Answers,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub book: EmbeddedBook,
    pub liked_by_current_user: bool,
    pub likes_count: u64,
}

impl From<MentalModelView> for MentalModelResponse {
    fn from(view: MentalModelView) -> Self {
        let MentalModelView { model, book, likes } = view;
        Self {
            id: model.id.to_string(),
            user_id: model.user_id.0,
            book_id: model.book_id.to_string(),
            status: model.status,
            answers: model.answers,
            created_at: model.created_at,
            updated_at: model.updated_at,
            book: book.into(),
            liked_by_current_user: likes.liked_by_viewer,
            likes_count: likes.count,
        }
    }
}

// ── GET /mental-models ───────────────────────────────────────────────────────

pub async fn list_mental_models(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MentalModelResponse>>, ReadingServiceError> {
    let usecase = ListMentalModelsUseCase {
        mental_models: state.mental_model_repo(),
        likes: state.like_repo(),
    };
    let views = usecase.execute(&user.id).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── GET /mental-models/{id} ──────────────────────────────────────────────────

pub async fn get_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MentalModelResponse>, ReadingServiceError> {
    let usecase = GetMentalModelUseCase {
        mental_models: state.mental_model_repo(),
        likes: state.like_repo(),
    };
    let view = usecase.execute(&id, &user.id).await?;
    Ok(Json(view.into()))
}

// ── POST /mental-models ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentalModelRequest {
    pub book_id: String,
    pub status: Option<MentalModelStatus>,
    #[serde(flatten)]
    pub answers: AnswersPatch,
}

pub async fn create_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CreateMentalModelRequest>,
        ReadingServiceError,
    >,
) -> Result<(StatusCode, Json<MentalModelResponse>), ReadingServiceError> {
    let usecase = CreateMentalModelUseCase {
        books: state.book_repo(),
        mental_models: state.mental_model_repo(),
    };
    let view = usecase
        .execute(
            &user.id,
            CreateMentalModelInput {
                book_id: body.book_id,
                status: body.status,
                answers: body.answers,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /mental-models/{id} ────────────────────────────────────────────────

/// `bookId` and `userId` are not updatable and are ignored if sent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentalModelRequest {
    pub status: Option<MentalModelStatus>,
    #[serde(default, deserialize_with = "bookmind_core::serde::from_rfc3339_opt")]
    pub expected_updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub answers: AnswersPatch,
}

pub async fn update_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateMentalModelRequest>,
        ReadingServiceError,
    >,
) -> Result<Json<MentalModelResponse>, ReadingServiceError> {
    let usecase = UpdateMentalModelUseCase {
        mental_models: state.mental_model_repo(),
        likes: state.like_repo(),
    };
    let view = usecase
        .execute(
            &id,
            &user.id,
            UpdateMentalModelInput {
                changes: MentalModelChanges {
                    status: body.status,
                    answers: body.answers,
                },
                expected_updated_at: body.expected_updated_at,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /mental-models/{id} ───────────────────────────────────────────────

pub async fn delete_mental_model(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ReadingServiceError> {
    let usecase = DeleteMentalModelUseCase {
        mental_models: state.mental_model_repo(),
    };
    usecase.execute(&id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}
