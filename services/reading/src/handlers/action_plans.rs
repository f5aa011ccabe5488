use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ActionPlan;
use crate::error::ReadingServiceError;
use crate::handlers::{CurrentUser, SuccessResponse};
use crate::state::AppState;
use crate::usecase::action_plan::{
    CreateActionPlanUseCase, DeleteActionPlanUseCase, ListActionPlansUseCase,
    UpdateActionPlanInput, UpdateActionPlanUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanResponse {
    pub id: String,
    pub mental_model_id: String,
    pub content: String,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "bookmind_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ActionPlan> for ActionPlanResponse {
    fn from(plan: ActionPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            mental_model_id: plan.mental_model_id.to_string(),
            content: plan.content,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

// ── GET /action-plans/mental-models/{mental_model_id} ────────────────────────

pub async fn list_action_plans(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(mental_model_id): Path<String>,
) -> Result<Json<Vec<ActionPlanResponse>>, ReadingServiceError> {
    let usecase = ListActionPlansUseCase {
        mental_models: state.mental_model_repo(),
        action_plans: state.action_plan_repo(),
    };
    let plans = usecase.execute(&mental_model_id, &user.id).await?;
    Ok(Json(plans.into_iter().map(Into::into).collect()))
}

// ── POST /action-plans/mental-models/{mental_model_id} ───────────────────────

#[derive(Deserialize)]
pub struct CreateActionPlanRequest {
    pub content: String,
}

pub async fn create_action_plan(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(mental_model_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<CreateActionPlanRequest>, ReadingServiceError>,
) -> Result<(StatusCode, Json<ActionPlanResponse>), ReadingServiceError> {
    let usecase = CreateActionPlanUseCase {
        mental_models: state.mental_model_repo(),
        action_plans: state.action_plan_repo(),
    };
    let plan = usecase
        .execute(&mental_model_id, &user.id, body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(plan.into())))
}

// ── PATCH /action-plans/{id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActionPlanRequest {
    pub content: Option<String>,
    #[serde(default, deserialize_with = "bookmind_core::serde::from_rfc3339_opt")]
    pub expected_updated_at: Option<DateTime<Utc>>,
}

pub async fn update_action_plan(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateActionPlanRequest>, ReadingServiceError>,
) -> Result<Json<ActionPlanResponse>, ReadingServiceError> {
    let usecase = UpdateActionPlanUseCase {
        action_plans: state.action_plan_repo(),
    };
    let plan = usecase
        .execute(
            &id,
            &user.id,
            UpdateActionPlanInput {
                content: body.content,
                expected_updated_at: body.expected_updated_at,
            },
        )
        .await?;
    Ok(Json(plan.into()))
}

// ── DELETE /action-plans/{id} ────────────────────────────────────────────────

pub async fn delete_action_plan(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ReadingServiceError> {
    let usecase = DeleteActionPlanUseCase {
        action_plans: state.action_plan_repo(),
    };
    usecase.execute(&id, &user.id).await?;
    Ok(Json(SuccessResponse::ok()))
}
