//! Action plan collections, one per mental model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::client::ApiClient;
use crate::collection::{Collection, CollectionSource};
use crate::error::SyncError;
use crate::types::{ActionPlan, CreateActionPlanBody, MentalModel, UpdateActionPlanBody, local_id};

pub struct ActionPlanSource {
    client: ApiClient,
    mental_model_id: String,
}

impl ActionPlanSource {
    pub fn mental_model_id(&self) -> &str {
        &self.mental_model_id
    }
}

impl CollectionSource for ActionPlanSource {
    type Item = ActionPlan;

    async fn fetch(&self) -> Result<Vec<ActionPlan>, SyncError> {
        self.client.list_action_plans(&self.mental_model_id).await
    }

    async fn create(&self, item: &ActionPlan) -> Result<ActionPlan, SyncError> {
        self.client
            .create_action_plan(
                &self.mental_model_id,
                &CreateActionPlanBody {
                    content: item.content.clone(),
                },
            )
            .await
    }

    async fn update(&self, before: &ActionPlan, after: &ActionPlan) -> Result<ActionPlan, SyncError> {
        self.client
            .update_action_plan(
                &before.id,
                &UpdateActionPlanBody {
                    content: after.content.clone(),
                    expected_updated_at: Some(before.updated_at),
                },
            )
            .await
    }

    async fn delete(&self, item: &ActionPlan) -> Result<(), SyncError> {
        self.client.delete_action_plan(&item.id).await
    }
}

pub type PlanCollection = Collection<ActionPlanSource>;

fn require_content(content: &str) -> Result<(), SyncError> {
    if content.trim().is_empty() {
        return Err(SyncError::Validation("content is required".to_owned()));
    }
    Ok(())
}

/// Registry of action plan collections keyed by mental model id.
///
/// Plans are only reachable through a completed mental model; the status
/// checked is whatever the caller's copy holds, optimistic or synced.
pub struct ActionPlans {
    client: ApiClient,
    collections: Mutex<HashMap<String, Arc<PlanCollection>>>,
}

impl ActionPlans {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// The same collection is returned for every call with the same model.
    pub fn for_model(&self, model: &MentalModel) -> Result<Arc<PlanCollection>, SyncError> {
        if !model.status.is_completed() {
            return Err(SyncError::NotCompleted);
        }
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let collection = collections.entry(model.id.clone()).or_insert_with(|| {
            Arc::new(Collection::new(ActionPlanSource {
                client: self.client.clone(),
                mental_model_id: model.id.clone(),
            }))
        });
        Ok(Arc::clone(collection))
    }

    /// Drop the collection kept for a deleted mental model.
    pub fn forget(&self, mental_model_id: &str) {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(mental_model_id);
    }

    pub fn is_tracked(&self, mental_model_id: &str) -> bool {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(mental_model_id)
    }

    /// Hydrated collection for `model`.
    pub async fn load(&self, model: &MentalModel) -> Result<Arc<PlanCollection>, SyncError> {
        let plans = self.for_model(model)?;
        plans.ensure_hydrated().await?;
        Ok(plans)
    }

    pub async fn add(&self, model: &MentalModel, content: String) -> Result<ActionPlan, SyncError> {
        require_content(&content)?;
        let plans = self.load(model).await?;
        let now = Utc::now();
        plans
            .insert(ActionPlan {
                id: local_id(),
                mental_model_id: model.id.clone(),
                content,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    pub async fn edit(
        &self,
        model: &MentalModel,
        plan_id: &str,
        content: String,
    ) -> Result<ActionPlan, SyncError> {
        require_content(&content)?;
        let plans = self.load(model).await?;
        plans
            .update(plan_id, |plan| {
                plan.content = content;
                Ok(())
            })
            .await
    }

    pub async fn remove(&self, model: &MentalModel, plan_id: &str) -> Result<(), SyncError> {
        let plans = self.load(model).await?;
        plans.delete(plan_id).await
    }
}
