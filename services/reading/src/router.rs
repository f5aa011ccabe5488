use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use bookmind_core::health::healthz;
use bookmind_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    action_plans::{create_action_plan, delete_action_plan, list_action_plans, update_action_plan},
    books::{create_book, get_book},
    google_books::{get_google_book, search_google_books},
    health::readyz,
    likes::{like_mental_model, list_liked_mental_models, unlike_mental_model},
    mental_models::{
        create_mental_model, delete_mental_model, get_mental_model, list_mental_models,
        update_mental_model,
    },
    users::{auth_callback, get_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/auth/callback", post(auth_callback))
        .route("/users/me", get(get_me))
        // Books
        .route("/books", post(create_book))
        .route("/books/{id}", get(get_book))
        // Catalog proxy
        .route("/google-books/search", get(search_google_books))
        .route("/google-books/{id}", get(get_google_book))
        // Mental models
        .route("/mental-models", get(list_mental_models))
        .route("/mental-models", post(create_mental_model))
        .route("/mental-models/{id}", get(get_mental_model))
        .route("/mental-models/{id}", patch(update_mental_model))
        .route("/mental-models/{id}", delete(delete_mental_model))
        // Likes
        .route("/likes/mental-models", get(list_liked_mental_models))
        .route("/likes/mental-models/{mental_model_id}", post(like_mental_model))
        .route("/likes/mental-models/{mental_model_id}", delete(unlike_mental_model))
        // Action plans
        .route(
            "/action-plans/mental-models/{mental_model_id}",
            get(list_action_plans),
        )
        .route(
            "/action-plans/mental-models/{mental_model_id}",
            post(create_action_plan),
        )
        .route("/action-plans/{id}", patch(update_action_plan))
        .route("/action-plans/{id}", delete(delete_action_plan))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
