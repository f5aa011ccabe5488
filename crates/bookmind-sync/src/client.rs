//! Typed HTTP client for the reading service REST surface.

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use bookmind_domain::error_body::ErrorBody;
use bookmind_domain::id::UserId;

use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::types::{
    ActionPlan, CreateActionPlanBody, CreateMentalModelBody, Like, MentalModel,
    UpdateActionPlanBody, UpdateMentalModelBody,
};

const IDENTITY_HEADER: &str = "authorization";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    user_id: UserId,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SyncError::Validation(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::Validation(
                "base url must be hierarchical".to_owned(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SyncError::from)?;
        Ok(Self {
            http,
            base_url,
            user_id: config.user_id.clone(),
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http
            .request(method, self.url(segments))
            .header(IDENTITY_HEADER, self.user_id.as_str())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SyncError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // Prefer the server's `{error, code}` body; anything else gets a generic message.
        let body = response.json::<ErrorBody>().await.ok();
        let (code, message) = match body {
            Some(body) => (Some(body.code), body.error),
            None => (None, format!("Request failed with status {status}")),
        };
        warn!(%status, code = code.as_deref(), %message, "request rejected");
        Err(SyncError::Rejected {
            status,
            code,
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SyncError> {
        let response = self.send(request).await?;
        response.json().await.map_err(SyncError::from)
    }

    async fn json_with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<T, SyncError> {
        self.json(request.json(body)).await
    }

    async fn discard(&self, request: RequestBuilder) -> Result<(), SyncError> {
        self.send(request).await.map(|_| ())
    }

    // ── Mental models ────────────────────────────────────────────────────────

    pub async fn list_mental_models(&self) -> Result<Vec<MentalModel>, SyncError> {
        debug!("fetching mental models");
        self.json(self.request(Method::GET, &["mental-models"])).await
    }

    pub async fn create_mental_model(
        &self,
        body: &CreateMentalModelBody,
    ) -> Result<MentalModel, SyncError> {
        self.json_with_body(self.request(Method::POST, &["mental-models"]), body)
            .await
    }

    pub async fn update_mental_model(
        &self,
        id: &str,
        body: &UpdateMentalModelBody,
    ) -> Result<MentalModel, SyncError> {
        self.json_with_body(self.request(Method::PATCH, &["mental-models", id]), body)
            .await
    }

    pub async fn delete_mental_model(&self, id: &str) -> Result<(), SyncError> {
        self.discard(self.request(Method::DELETE, &["mental-models", id]))
            .await
    }

    // ── Likes ────────────────────────────────────────────────────────────────

    pub async fn like(&self, mental_model_id: &str) -> Result<Like, SyncError> {
        self.json(self.request(Method::POST, &["likes", "mental-models", mental_model_id]))
            .await
    }

    pub async fn unlike(&self, mental_model_id: &str) -> Result<(), SyncError> {
        self.discard(self.request(Method::DELETE, &["likes", "mental-models", mental_model_id]))
            .await
    }

    pub async fn list_liked(&self) -> Result<Vec<MentalModel>, SyncError> {
        self.json(self.request(Method::GET, &["likes", "mental-models"]))
            .await
    }

    // ── Action plans ─────────────────────────────────────────────────────────

    pub async fn list_action_plans(
        &self,
        mental_model_id: &str,
    ) -> Result<Vec<ActionPlan>, SyncError> {
        debug!(mental_model_id, "fetching action plans");
        self.json(self.request(
            Method::GET,
            &["action-plans", "mental-models", mental_model_id],
        ))
        .await
    }

    pub async fn create_action_plan(
        &self,
        mental_model_id: &str,
        body: &CreateActionPlanBody,
    ) -> Result<ActionPlan, SyncError> {
        self.json_with_body(
            self.request(
                Method::POST,
                &["action-plans", "mental-models", mental_model_id],
            ),
            body,
        )
        .await
    }

    pub async fn update_action_plan(
        &self,
        id: &str,
        body: &UpdateActionPlanBody,
    ) -> Result<ActionPlan, SyncError> {
        self.json_with_body(self.request(Method::PATCH, &["action-plans", id]), body)
            .await
    }

    pub async fn delete_action_plan(&self, id: &str) -> Result<(), SyncError> {
        self.discard(self.request(Method::DELETE, &["action-plans", id]))
            .await
    }
}
