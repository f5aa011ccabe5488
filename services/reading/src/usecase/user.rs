use tracing::info;

use bookmind_core::time::now_ms;
use bookmind_domain::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserProfile};
use crate::error::ReadingServiceError;

// ── UpsertUser ───────────────────────────────────────────────────────────────

pub struct UpsertUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpsertUserUseCase<R> {
    pub async fn execute(&self, profile: UserProfile) -> Result<User, ReadingServiceError> {
        if profile.id.as_str().trim().is_empty() {
            return Err(ReadingServiceError::Validation("id is required".to_owned()));
        }
        if profile.email.trim().is_empty() {
            return Err(ReadingServiceError::Validation(
                "email is required".to_owned(),
            ));
        }
        let user = self.repo.upsert(&profile, now_ms()).await?;
        info!(user_id = %user.id, "user profile synced from identity provider");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: &UserId) -> Result<User, ReadingServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ReadingServiceError::UserNotFound)
    }
}
