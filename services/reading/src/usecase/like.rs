use tracing::{debug, info};

use bookmind_core::time::now_ms;
use bookmind_domain::id::UserId;

use crate::domain::repository::{LikeRepository, MentalModelRepository};
use crate::domain::types::{Like, MentalModelView, parse_id};
use crate::error::ReadingServiceError;
use crate::usecase::mental_model::into_views;

// ── LikeMentalModel ──────────────────────────────────────────────────────────

pub struct LikeMentalModelUseCase<M: MentalModelRepository, L: LikeRepository> {
    pub mental_models: M,
    pub likes: L,
}

impl<M: MentalModelRepository, L: LikeRepository> LikeMentalModelUseCase<M, L> {
    /// Idempotent: liking twice returns the first like unchanged.
    pub async fn execute(
        &self,
        raw_mental_model_id: &str,
        user_id: &UserId,
    ) -> Result<Like, ReadingServiceError> {
        let not_found =
            || ReadingServiceError::MentalModelNotFound(raw_mental_model_id.to_owned());
        let mental_model_id = parse_id(raw_mental_model_id).ok_or_else(not_found)?;
        self.mental_models
            .find_by_id(mental_model_id)
            .await?
            .ok_or_else(not_found)?;

        if let Some(existing) = self.likes.find(mental_model_id, user_id).await? {
            debug!(%mental_model_id, %user_id, "like already present");
            return Ok(existing);
        }
        let like = self
            .likes
            .insert_if_absent(&Like {
                mental_model_id,
                user_id: user_id.clone(),
                created_at: now_ms(),
            })
            .await?;
        info!(%mental_model_id, %user_id, "mental model liked");
        Ok(like)
    }
}

// ── UnlikeMentalModel ────────────────────────────────────────────────────────

pub struct UnlikeMentalModelUseCase<L: LikeRepository> {
    pub likes: L,
}

impl<L: LikeRepository> UnlikeMentalModelUseCase<L> {
    pub async fn execute(
        &self,
        raw_mental_model_id: &str,
        user_id: &UserId,
    ) -> Result<(), ReadingServiceError> {
        let not_found = || ReadingServiceError::LikeNotFound {
            mental_model_id: raw_mental_model_id.to_owned(),
            user_id: user_id.to_string(),
        };
        let mental_model_id = parse_id(raw_mental_model_id).ok_or_else(not_found)?;
        self.likes
            .find(mental_model_id, user_id)
            .await?
            .ok_or_else(not_found)?;
        if !self.likes.delete(mental_model_id, user_id).await? {
            return Err(not_found());
        }
        info!(%mental_model_id, %user_id, "mental model unliked");
        Ok(())
    }
}

// ── ListLikedMentalModels ────────────────────────────────────────────────────

pub struct ListLikedMentalModelsUseCase<L: LikeRepository> {
    pub likes: L,
}

impl<L: LikeRepository> ListLikedMentalModelsUseCase<L> {
    /// Models the user liked, in the order they were liked.
    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<MentalModelView>, ReadingServiceError> {
        let rows = self.likes.list_liked_by(user_id).await?;
        into_views(&self.likes, rows, user_id).await
    }
}
