use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::domain::types::Book;
use crate::error::ReadingServiceError;
use crate::handlers::CurrentUser;
use crate::state::AppState;
use crate::usecase::book::{GetBookUseCase, GetOrCreateBookInput, GetOrCreateBookUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: String,
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            google_book_id: book.google_book_id,
            title: book.title,
            authors: book.authors,
            thumbnail_url: book.thumbnail_url,
            description: book.description,
            created_at: book.created_at,
        }
    }
}

// ── POST /books ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

/// Get-or-create by catalog id; an existing row is returned unchanged.
pub async fn create_book(
    _caller: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateBookRequest>, ReadingServiceError>,
) -> Result<Json<BookResponse>, ReadingServiceError> {
    let usecase = GetOrCreateBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase
        .execute(GetOrCreateBookInput {
            google_book_id: body.google_book_id,
            title: body.title,
            authors: body.authors,
            thumbnail_url: body.thumbnail_url,
            description: body.description,
        })
        .await?;
    Ok(Json(book.into()))
}

// ── GET /books/{id} ──────────────────────────────────────────────────────────

pub async fn get_book(
    _caller: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ReadingServiceError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase.execute(&id).await?;
    Ok(Json(book.into()))
}
