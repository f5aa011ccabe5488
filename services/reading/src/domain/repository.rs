#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bookmind_domain::id::UserId;

use crate::domain::types::{
    ActionPlan, Book, CatalogVolume, Like, LikeSummary, MentalModel, MentalModelChanges, User,
    UserProfile,
};
use crate::error::ReadingServiceError;

/// Repository for mirrored user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, ReadingServiceError>;

    /// Insert the profile, or overwrite every profile field of an existing
    /// row with the same id. Returns the stored row.
    async fn upsert(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, ReadingServiceError>;
}

/// Repository for cached catalog books.
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ReadingServiceError>;

    async fn find_by_google_book_id(
        &self,
        google_book_id: &str,
    ) -> Result<Option<Book>, ReadingServiceError>;

    /// Insert unless a row with the same `google_book_id` exists, then return
    /// whichever row is stored.
    async fn insert_if_absent(&self, book: &Book) -> Result<Book, ReadingServiceError>;
}

/// Repository for mental models. Every read and write is scoped to the owner
/// except [`MentalModelRepository::find_by_id`].
pub trait MentalModelRepository: Send + Sync {
    /// Owner's models joined with their books, oldest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError>;

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<(MentalModel, Book)>, ReadingServiceError>;

    /// Unscoped lookup, used when another user's model may be referenced.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MentalModel>, ReadingServiceError>;

    async fn create(&self, model: &MentalModel) -> Result<(), ReadingServiceError>;

    /// Apply changes. Returns `false` if no owned row matched, or if the
    /// row no longer carries `expected` as its `updated_at`.
    async fn update(
        &self,
        id: Uuid,
        user_id: &UserId,
        changes: &MentalModelChanges,
        expected: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ReadingServiceError>;

    /// Delete an owned row. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<bool, ReadingServiceError>;
}

/// Repository for likes, keyed by (mental model id, user id).
pub trait LikeRepository: Send + Sync {
    async fn find(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Like>, ReadingServiceError>;

    /// Insert unless the pair exists, then return the stored row.
    async fn insert_if_absent(&self, like: &Like) -> Result<Like, ReadingServiceError>;

    /// Delete a like. Returns `true` if a row was deleted.
    async fn delete(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<bool, ReadingServiceError>;

    /// Like count and viewer flag for each id. Ids without likes may be absent.
    async fn summarize(
        &self,
        mental_model_ids: &[Uuid],
        viewer: &UserId,
    ) -> Result<HashMap<Uuid, LikeSummary>, ReadingServiceError>;

    /// Models the user liked with their books, in like order.
    async fn list_liked_by(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError>;
}

/// Repository for action plans.
pub trait ActionPlanRepository: Send + Sync {
    /// Plans of one mental model, oldest first.
    async fn list_by_mental_model(
        &self,
        mental_model_id: Uuid,
    ) -> Result<Vec<ActionPlan>, ReadingServiceError>;

    /// Find a plan whose parent mental model belongs to `owner`.
    async fn find_owned(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<ActionPlan>, ReadingServiceError>;

    async fn create(&self, plan: &ActionPlan) -> Result<(), ReadingServiceError>;

    /// Returns `false` if the row vanished or no longer carries `expected`.
    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        expected: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ReadingServiceError>;

    /// Delete a plan. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ReadingServiceError>;
}

/// Port for the external book catalog.
pub trait CatalogPort: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<CatalogVolume>, ReadingServiceError>;

    /// `None` when the catalog has no volume with this id.
    async fn get(&self, google_book_id: &str) -> Result<Option<CatalogVolume>, ReadingServiceError>;
}
