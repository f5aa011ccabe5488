use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use bookmind_core::time::now_ms;
use bookmind_domain::id::UserId;

use crate::domain::repository::{ActionPlanRepository, MentalModelRepository};
use crate::domain::types::{ActionPlan, parse_id};
use crate::error::ReadingServiceError;
use crate::usecase::ensure_fresh;

// The completed-status gate lives in the client; plans against a `reading`
// model are stored as-is.

fn require_content(content: &str) -> Result<(), ReadingServiceError> {
    if content.trim().is_empty() {
        return Err(ReadingServiceError::Validation(
            "content is required".to_owned(),
        ));
    }
    Ok(())
}

/// Resolve a mental model id the caller owns.
async fn owned_mental_model<M: MentalModelRepository>(
    mental_models: &M,
    raw_id: &str,
    user_id: &UserId,
) -> Result<Uuid, ReadingServiceError> {
    let not_found = || ReadingServiceError::MentalModelNotFound(raw_id.to_owned());
    let id = parse_id(raw_id).ok_or_else(not_found)?;
    let (model, _) = mental_models
        .find_owned(id, user_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(model.id)
}

// ── ListActionPlans ──────────────────────────────────────────────────────────

pub struct ListActionPlansUseCase<M: MentalModelRepository, A: ActionPlanRepository> {
    pub mental_models: M,
    pub action_plans: A,
}

impl<M: MentalModelRepository, A: ActionPlanRepository> ListActionPlansUseCase<M, A> {
    pub async fn execute(
        &self,
        raw_mental_model_id: &str,
        user_id: &UserId,
    ) -> Result<Vec<ActionPlan>, ReadingServiceError> {
        let id = owned_mental_model(&self.mental_models, raw_mental_model_id, user_id).await?;
        self.action_plans.list_by_mental_model(id).await
    }
}

// ── CreateActionPlan ─────────────────────────────────────────────────────────

pub struct CreateActionPlanUseCase<M: MentalModelRepository, A: ActionPlanRepository> {
    pub mental_models: M,
    pub action_plans: A,
}

impl<M: MentalModelRepository, A: ActionPlanRepository> CreateActionPlanUseCase<M, A> {
    pub async fn execute(
        &self,
        raw_mental_model_id: &str,
        user_id: &UserId,
        content: String,
    ) -> Result<ActionPlan, ReadingServiceError> {
        require_content(&content)?;
        let mental_model_id =
            owned_mental_model(&self.mental_models, raw_mental_model_id, user_id).await?;
        let now = now_ms();
        let plan = ActionPlan {
            id: Uuid::now_v7(),
            mental_model_id,
            content,
            created_at: now,
            updated_at: now,
        };
        self.action_plans.create(&plan).await?;
        info!(action_plan_id = %plan.id, %mental_model_id, "action plan created");
        Ok(plan)
    }
}

// ── UpdateActionPlan ─────────────────────────────────────────────────────────

pub struct UpdateActionPlanInput {
    /// `None` leaves the plan untouched and returns it as stored.
    pub content: Option<String>,
    pub expected_updated_at: Option<DateTime<Utc>>,
}

pub struct UpdateActionPlanUseCase<A: ActionPlanRepository> {
    pub action_plans: A,
}

impl<A: ActionPlanRepository> UpdateActionPlanUseCase<A> {
    pub async fn execute(
        &self,
        raw_id: &str,
        user_id: &UserId,
        input: UpdateActionPlanInput,
    ) -> Result<ActionPlan, ReadingServiceError> {
        if let Some(content) = &input.content {
            require_content(content)?;
        }
        let not_found = || ReadingServiceError::ActionPlanNotFound(raw_id.to_owned());
        let id = parse_id(raw_id).ok_or_else(not_found)?;
        let current = self
            .action_plans
            .find_owned(id, user_id)
            .await?
            .ok_or_else(not_found)?;
        ensure_fresh("action plan", current.updated_at, input.expected_updated_at)?;

        let Some(content) = input.content else {
            return Ok(current);
        };
        let updated_at = now_ms();
        if !self
            .action_plans
            .update_content(id, &content, input.expected_updated_at, updated_at)
            .await?
        {
            let stored = self
                .action_plans
                .find_owned(id, user_id)
                .await?
                .ok_or_else(not_found)?;
            ensure_fresh("action plan", stored.updated_at, input.expected_updated_at)?;
            return Err(not_found());
        }
        Ok(ActionPlan {
            content,
            updated_at,
            ..current
        })
    }
}

// ── DeleteActionPlan ─────────────────────────────────────────────────────────

pub struct DeleteActionPlanUseCase<A: ActionPlanRepository> {
    pub action_plans: A,
}

impl<A: ActionPlanRepository> DeleteActionPlanUseCase<A> {
    pub async fn execute(&self, raw_id: &str, user_id: &UserId) -> Result<(), ReadingServiceError> {
        let not_found = || ReadingServiceError::ActionPlanNotFound(raw_id.to_owned());
        let id = parse_id(raw_id).ok_or_else(not_found)?;
        self.action_plans
            .find_owned(id, user_id)
            .await?
            .ok_or_else(not_found)?;
        if !self.action_plans.delete(id).await? {
            return Err(not_found());
        }
        info!(action_plan_id = %id, "action plan deleted");
        Ok(())
    }
}
