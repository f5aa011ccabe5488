//! Records as the client holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use bookmind_domain::reflection::{Answers, AnswersPatch};
use bookmind_domain::status::MentalModelStatus;

/// Entries of a collection are addressed by a string key.
pub trait Keyed: Clone + PartialEq {
    fn key(&self) -> &str;
}

/// Id for an entry the server has not confirmed yet.
pub fn local_id() -> String {
    format!("local-{}", uuid::Uuid::now_v7())
}

/// Book fields embedded in a mental model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

/// Book reference of a mental model.
///
/// `Pending` until the server has confirmed the insert; only the id the
/// caller supplied is known at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookRef {
    Pending { book_id: String },
    Confirmed(BookSummary),
}

impl BookRef {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Pending { .. } => None,
            Self::Confirmed(book) => Some(&book.title),
        }
    }

    pub fn authors(&self) -> Option<&str> {
        match self {
            Self::Pending { .. } => None,
            Self::Confirmed(book) => book.authors.as_deref(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

// The server only ever sends confirmed books.
impl<'de> Deserialize<'de> for BookRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BookSummary::deserialize(deserializer).map(Self::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalModel {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub status: MentalModelStatus,
    #[serde(flatten)]
    pub answers: Answers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub book: BookRef,
    pub liked_by_current_user: bool,
    pub likes_count: u64,
}

impl Keyed for MentalModel {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub id: String,
    pub mental_model_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for ActionPlan {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub mental_model_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

// ── Request bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentalModelBody {
    pub book_id: String,
    pub status: MentalModelStatus,
    #[serde(flatten)]
    pub answers: Answers,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentalModelBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MentalModelStatus>,
    #[serde(flatten)]
    pub answers: AnswersPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateActionPlanBody {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActionPlanBody {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<DateTime<Utc>>,
}
