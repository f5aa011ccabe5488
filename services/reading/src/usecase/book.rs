use tracing::{debug, info};
use uuid::Uuid;

use bookmind_core::time::now_ms;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, parse_id};
use crate::error::ReadingServiceError;

// ── GetOrCreateBook ──────────────────────────────────────────────────────────

pub struct GetOrCreateBookInput {
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

pub struct GetOrCreateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetOrCreateBookUseCase<R> {
    /// Look the book up by catalog id; insert only on a miss. The stored row
    /// wins over differing metadata in `input`.
    pub async fn execute(&self, input: GetOrCreateBookInput) -> Result<Book, ReadingServiceError> {
        if input.google_book_id.trim().is_empty() {
            return Err(ReadingServiceError::Validation(
                "googleBookId is required".to_owned(),
            ));
        }
        if input.title.trim().is_empty() {
            return Err(ReadingServiceError::Validation(
                "title is required".to_owned(),
            ));
        }
        if let Some(existing) = self
            .repo
            .find_by_google_book_id(&input.google_book_id)
            .await?
        {
            debug!(book_id = %existing.id, google_book_id = %existing.google_book_id, "book reused");
            return Ok(existing);
        }
        let book = Book {
            id: Uuid::now_v7(),
            google_book_id: input.google_book_id,
            title: input.title,
            authors: input.authors,
            thumbnail_url: input.thumbnail_url,
            description: input.description,
            created_at: now_ms(),
        };
        let stored = self.repo.insert_if_absent(&book).await?;
        info!(book_id = %stored.id, google_book_id = %stored.google_book_id, "book cached");
        Ok(stored)
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, raw_id: &str) -> Result<Book, ReadingServiceError> {
        let not_found = || ReadingServiceError::BookNotFound(raw_id.to_owned());
        let id = parse_id(raw_id).ok_or_else(not_found)?;
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}
