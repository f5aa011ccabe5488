use chrono::{DateTime, Utc};
use uuid::Uuid;

use bookmind_domain::id::UserId;
use bookmind_domain::reflection::{Answers, AnswersPatch};
use bookmind_domain::status::MentalModelStatus;

/// Profile mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub organization_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields delivered by the identity provider on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub organization_id: Option<String>,
}

/// Cached reference to a catalog volume. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentalModel {
    pub id: Uuid,
    pub user_id: UserId,
    pub book_id: Uuid,
    pub status: MentalModelStatus,
    pub answers: Answers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A mental model joined with its book and like aggregate, as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentalModelView {
    pub model: MentalModel,
    pub book: Book,
    pub likes: LikeSummary,
}

/// Like aggregate for one mental model relative to a viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeSummary {
    pub count: u64,
    pub liked_by_viewer: bool,
}

/// Fields a mental model update may touch. `user_id` and `book_id` are fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentalModelChanges {
    pub status: Option<MentalModelStatus>,
    pub answers: AnswersPatch,
}

impl MentalModelChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.answers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub mental_model_id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    pub id: Uuid,
    pub mental_model_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Volume metadata returned by the external catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogVolume {
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
}

/// Accepted range for catalog search result counts.
pub const MAX_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 1..=40;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Parse an id taken from a request path or body.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
