use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use bookmind_domain::error_body::ErrorBody;

/// An error that knows how it is rendered on the wire.
///
/// Implementors get a uniform `{ "error": ..., "code": ... }` body via
/// [`error_response`].
pub trait ApiError: std::error::Error {
    fn status(&self) -> StatusCode;
    fn code(&self) -> &'static str;
}

/// Render an [`ApiError`] as a JSON response.
pub fn error_response<E: ApiError>(err: &E) -> Response {
    let status = err.status();
    // TraceLayer already records method/uri/status; only 5xx carry detail worth logging.
    if status.is_server_error() {
        tracing::error!(error = %err, code = err.code(), "request failed");
    }
    let body = ErrorBody {
        error: err.to_string(),
        code: err.code().to_owned(),
    };
    (status, axum::Json(body)).into_response()
}
