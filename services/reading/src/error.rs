use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use bookmind_auth_types::identity::MissingIdentity;
use bookmind_core::error::{ApiError, error_response};

/// Reading service domain error variants.
///
/// Not-found variants carry the id exactly as the caller sent it, so an
/// unparsable id and an unknown one produce the same message.
#[derive(Debug, thiserror::Error)]
pub enum ReadingServiceError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User not found")]
    UserNotFound,
    #[error("Mental model with id {0} not found")]
    MentalModelNotFound(String),
    #[error("Book with id {0} not found")]
    BookNotFound(String),
    #[error("Action plan with id {0} not found")]
    ActionPlanNotFound(String),
    #[error("Like not found for mental model {mental_model_id} and user {user_id}")]
    LikeNotFound {
        mental_model_id: String,
        user_id: String,
    },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    GoogleBooksApi(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0:#}")]
    Database(#[from] anyhow::Error),
}

impl ApiError for ReadingServiceError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound
            | Self::MentalModelNotFound(_)
            | Self::BookNotFound(_)
            | Self::ActionPlanNotFound(_)
            | Self::LikeNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::GoogleBooksApi(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MentalModelNotFound(_) => "MENTAL_MODEL_NOT_FOUND",
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::ActionPlanNotFound(_) => "ACTION_PLAN_NOT_FOUND",
            Self::LikeNotFound { .. } => "LIKE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::GoogleBooksApi(_) => "GOOGLE_BOOKS_API_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ReadingServiceError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

impl From<MissingIdentity> for ReadingServiceError {
    fn from(_: MissingIdentity) -> Self {
        Self::Unauthorized
    }
}

impl From<JsonRejection> for ReadingServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ReadingServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ReadingServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
