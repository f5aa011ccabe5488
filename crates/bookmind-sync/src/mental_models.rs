//! Mental model collection, like toggling and the filtered list view.

use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use bookmind_domain::reflection::{Answers, AnswersPatch};
use bookmind_domain::sort::Sort;
use bookmind_domain::status::MentalModelStatus;

use crate::action_plans::ActionPlans;
use crate::client::ApiClient;
use crate::collection::{Collection, CollectionSource};
use crate::error::SyncError;
use crate::query::LiveQuery;
use crate::types::{BookRef, CreateMentalModelBody, MentalModel, UpdateMentalModelBody, local_id};

pub struct MentalModelSource {
    client: ApiClient,
}

impl CollectionSource for MentalModelSource {
    type Item = MentalModel;

    async fn fetch(&self) -> Result<Vec<MentalModel>, SyncError> {
        self.client.list_mental_models().await
    }

    async fn create(&self, item: &MentalModel) -> Result<MentalModel, SyncError> {
        self.client
            .create_mental_model(&CreateMentalModelBody {
                book_id: item.book_id.clone(),
                status: item.status,
                answers: item.answers.clone(),
            })
            .await
    }

    async fn update(
        &self,
        before: &MentalModel,
        after: &MentalModel,
    ) -> Result<MentalModel, SyncError> {
        let body = UpdateMentalModelBody {
            status: (before.status != after.status).then_some(after.status),
            answers: before.answers.diff(&after.answers),
            expected_updated_at: Some(before.updated_at),
        };
        self.client.update_mental_model(&before.id, &body).await
    }

    async fn delete(&self, item: &MentalModel) -> Result<(), SyncError> {
        self.client.delete_mental_model(&item.id).await
    }
}

#[derive(Debug, Clone)]
pub struct NewMentalModel {
    pub book_id: String,
    pub status: MentalModelStatus,
    pub answers: Answers,
}

#[derive(Debug, Clone, Default)]
pub struct MentalModelChanges {
    pub status: Option<MentalModelStatus>,
    pub answers: AnswersPatch,
}

// ── Filter ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Reading,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LikedFilter {
    #[default]
    All,
    Liked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentalModelFilter {
    pub status: StatusFilter,
    pub liked: LikedFilter,
    /// Case-insensitive substring of the book title or authors.
    pub search: String,
}

impl MentalModelFilter {
    pub fn matches(&self, model: &MentalModel) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Reading => model.status == MentalModelStatus::Reading,
            StatusFilter::Completed => model.status == MentalModelStatus::Completed,
        };
        let liked_ok = match self.liked {
            LikedFilter::All => true,
            LikedFilter::Liked => model.liked_by_current_user,
        };
        status_ok && liked_ok && self.matches_search(&model.book)
    }

    fn matches_search(&self, book: &BookRef) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [book.title(), book.authors()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Matching models, newest first.
pub fn filter_mental_models(models: &[MentalModel], filter: &MentalModelFilter) -> Vec<MentalModel> {
    let mut matched: Vec<MentalModel> = models
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect();
    matched.sort_by(|a, b| {
        Sort::Desc.apply(a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
    });
    matched
}

// ── MentalModels ─────────────────────────────────────────────────────────────

/// The caller's mental models, with the action plans hanging off them.
pub struct MentalModels {
    collection: Collection<MentalModelSource>,
    plans: ActionPlans,
    client: ApiClient,
}

impl MentalModels {
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: Collection::new(MentalModelSource {
                client: client.clone(),
            }),
            plans: ActionPlans::new(client.clone()),
            client,
        }
    }

    pub fn collection(&self) -> &Collection<MentalModelSource> {
        &self.collection
    }

    pub fn action_plans(&self) -> &ActionPlans {
        &self.plans
    }

    pub async fn ensure_hydrated(&self) -> Result<(), SyncError> {
        self.collection.ensure_hydrated().await
    }

    pub fn get(&self, id: &str) -> Option<MentalModel> {
        self.collection.get(id)
    }

    /// Adds a pending entry right away and swaps in the server record once
    /// the create succeeds.
    pub async fn create(&self, input: NewMentalModel) -> Result<MentalModel, SyncError> {
        input
            .answers
            .validate()
            .map_err(|e| SyncError::Validation(e.to_string()))?;
        let now = Utc::now();
        let optimistic = MentalModel {
            id: local_id(),
            user_id: self.client.user_id().to_string(),
            book: BookRef::Pending {
                book_id: input.book_id.clone(),
            },
            book_id: input.book_id,
            status: input.status,
            answers: input.answers,
            created_at: now,
            updated_at: now,
            liked_by_current_user: false,
            likes_count: 0,
        };
        let created = self.collection.insert(optimistic).await?;
        info!(mental_model_id = %created.id, "mental model created");
        Ok(created)
    }

    /// Sends the changed fields with the last server-issued `updatedAt`; a
    /// stale write comes back as a 409 rejection. Overlapping updates of the
    /// same model are sent one after another.
    pub async fn update(
        &self,
        id: &str,
        changes: MentalModelChanges,
    ) -> Result<MentalModel, SyncError> {
        self.collection
            .update(id, |model| {
                if let Some(status) = changes.status {
                    model.status = status;
                }
                model.answers.apply(&changes.answers);
                model
                    .answers
                    .validate()
                    .map_err(|e| SyncError::Validation(e.to_string()))
            })
            .await
    }

    /// Deletes the model and drops its action plan collection.
    pub async fn remove(&self, id: &str) -> Result<(), SyncError> {
        self.collection.delete(id).await?;
        self.plans.forget(id);
        Ok(())
    }

    /// Models the caller has liked, in like order. Fetched on every call
    /// and kept out of the collection.
    pub async fn liked(&self) -> Result<Vec<MentalModel>, SyncError> {
        self.client.list_liked().await
    }

    /// Flip the caller's like. The count never drops below zero.
    pub async fn toggle_like(&self, id: &str) -> Result<MentalModel, SyncError> {
        let client = &self.client;
        self.collection
            .apply_optimistic(
                id,
                |model| {
                    if model.liked_by_current_user {
                        model.likes_count = model.likes_count.saturating_sub(1);
                    } else {
                        model.likes_count += 1;
                    }
                    model.liked_by_current_user = !model.liked_by_current_user;
                    Ok(())
                },
                |_, after| async move {
                    if after.liked_by_current_user {
                        client.like(&after.id).await?;
                    } else {
                        client.unlike(&after.id).await?;
                    }
                    Ok::<_, SyncError>(None)
                },
            )
            .await
    }

    /// Filtered, newest-first view that follows the collection and `filter`.
    pub fn filtered(
        &self,
        filter: watch::Receiver<MentalModelFilter>,
    ) -> LiveQuery<MentalModel, MentalModelFilter> {
        self.collection.live(filter, filter_mental_models)
    }
}
