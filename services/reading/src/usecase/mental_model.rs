use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use bookmind_core::time::now_ms;
use bookmind_domain::id::UserId;
use bookmind_domain::reflection::{Answers, AnswersPatch};
use bookmind_domain::status::MentalModelStatus;

use crate::domain::repository::{BookRepository, LikeRepository, MentalModelRepository};
use crate::domain::types::{
    Book, LikeSummary, MentalModel, MentalModelChanges, MentalModelView, parse_id,
};
use crate::error::ReadingServiceError;
use crate::usecase::ensure_fresh;

/// Attach like aggregates to joined rows, keeping row order.
pub(crate) async fn into_views<L: LikeRepository>(
    likes: &L,
    rows: Vec<(MentalModel, Book)>,
    viewer: &UserId,
) -> Result<Vec<MentalModelView>, ReadingServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|(m, _)| m.id).collect();
    let summaries: HashMap<Uuid, LikeSummary> = likes.summarize(&ids, viewer).await?;
    Ok(rows
        .into_iter()
        .map(|(model, book)| {
            let likes = summaries.get(&model.id).copied().unwrap_or_default();
            MentalModelView { model, book, likes }
        })
        .collect())
}

fn not_found(raw_id: &str) -> ReadingServiceError {
    ReadingServiceError::MentalModelNotFound(raw_id.to_owned())
}

// ── ListMentalModels ─────────────────────────────────────────────────────────

pub struct ListMentalModelsUseCase<M: MentalModelRepository, L: LikeRepository> {
    pub mental_models: M,
    pub likes: L,
}

impl<M: MentalModelRepository, L: LikeRepository> ListMentalModelsUseCase<M, L> {
    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<MentalModelView>, ReadingServiceError> {
        let rows = self.mental_models.list_by_user(user_id).await?;
        into_views(&self.likes, rows, user_id).await
    }
}

// ── GetMentalModel ───────────────────────────────────────────────────────────

pub struct GetMentalModelUseCase<M: MentalModelRepository, L: LikeRepository> {
    pub mental_models: M,
    pub likes: L,
}

impl<M: MentalModelRepository, L: LikeRepository> GetMentalModelUseCase<M, L> {
    pub async fn execute(
        &self,
        raw_id: &str,
        user_id: &UserId,
    ) -> Result<MentalModelView, ReadingServiceError> {
        let id = parse_id(raw_id).ok_or_else(|| not_found(raw_id))?;
        let row = self
            .mental_models
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        into_views(&self.likes, vec![row], user_id)
            .await?
            .pop()
            .ok_or_else(|| not_found(raw_id))
    }
}

// ── CreateMentalModel ────────────────────────────────────────────────────────

pub struct CreateMentalModelInput {
    pub book_id: String,
    pub status: Option<MentalModelStatus>,
    pub answers: AnswersPatch,
}

pub struct CreateMentalModelUseCase<B: BookRepository, M: MentalModelRepository> {
    pub books: B,
    pub mental_models: M,
}

impl<B: BookRepository, M: MentalModelRepository> CreateMentalModelUseCase<B, M> {
    pub async fn execute(
        &self,
        user_id: &UserId,
        input: CreateMentalModelInput,
    ) -> Result<MentalModelView, ReadingServiceError> {
        let mut answers = Answers::default();
        answers.apply(&input.answers);
        answers
            .validate()
            .map_err(|e| ReadingServiceError::Validation(e.to_string()))?;

        let book_not_found = || ReadingServiceError::BookNotFound(input.book_id.clone());
        let book_id = parse_id(&input.book_id).ok_or_else(book_not_found)?;
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or_else(book_not_found)?;

        let now = now_ms();
        let model = MentalModel {
            id: Uuid::now_v7(),
            user_id: user_id.clone(),
            book_id: book.id,
            status: input.status.unwrap_or_default(),
            answers,
            created_at: now,
            updated_at: now,
        };
        self.mental_models.create(&model).await?;
        info!(mental_model_id = %model.id, user_id = %user_id, "mental model created");
        Ok(MentalModelView {
            model,
            book,
            likes: LikeSummary::default(),
        })
    }
}

// ── UpdateMentalModel ────────────────────────────────────────────────────────

pub struct UpdateMentalModelInput {
    pub changes: MentalModelChanges,
    /// `updatedAt` the caller last saw; `None` means last write wins.
    pub expected_updated_at: Option<DateTime<Utc>>,
}

pub struct UpdateMentalModelUseCase<M: MentalModelRepository, L: LikeRepository> {
    pub mental_models: M,
    pub likes: L,
}

impl<M: MentalModelRepository, L: LikeRepository> UpdateMentalModelUseCase<M, L> {
    pub async fn execute(
        &self,
        raw_id: &str,
        user_id: &UserId,
        input: UpdateMentalModelInput,
    ) -> Result<MentalModelView, ReadingServiceError> {
        let id = parse_id(raw_id).ok_or_else(|| not_found(raw_id))?;
        if input.changes.is_empty() {
            return Err(ReadingServiceError::Validation(
                "no fields to update".to_owned(),
            ));
        }
        let (current, _) = self
            .mental_models
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        ensure_fresh("mental model", current.updated_at, input.expected_updated_at)?;

        let mut merged = current.answers.clone();
        merged.apply(&input.changes.answers);
        merged
            .validate()
            .map_err(|e| ReadingServiceError::Validation(e.to_string()))?;

        // Zero rows: the row was deleted or rewritten after the lookup.
        if !self
            .mental_models
            .update(
                id,
                user_id,
                &input.changes,
                input.expected_updated_at,
                now_ms(),
            )
            .await?
        {
            let (stored, _) = self
                .mental_models
                .find_owned(id, user_id)
                .await?
                .ok_or_else(|| not_found(raw_id))?;
            ensure_fresh("mental model", stored.updated_at, input.expected_updated_at)?;
            return Err(not_found(raw_id));
        }
        if let Some(status) = input.changes.status.filter(|s| *s != current.status) {
            info!(mental_model_id = %id, from = %current.status, to = %status, "status changed");
        }

        let row = self
            .mental_models
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        into_views(&self.likes, vec![row], user_id)
            .await?
            .pop()
            .ok_or_else(|| not_found(raw_id))
    }
}

// ── DeleteMentalModel ────────────────────────────────────────────────────────

pub struct DeleteMentalModelUseCase<M: MentalModelRepository> {
    pub mental_models: M,
}

impl<M: MentalModelRepository> DeleteMentalModelUseCase<M> {
    pub async fn execute(&self, raw_id: &str, user_id: &UserId) -> Result<(), ReadingServiceError> {
        let id = parse_id(raw_id).ok_or_else(|| not_found(raw_id))?;
        self.mental_models
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        if !self.mental_models.delete(id, user_id).await? {
            return Err(not_found(raw_id));
        }
        info!(mental_model_id = %id, user_id = %user_id, "mental model deleted");
        Ok(())
    }
}
