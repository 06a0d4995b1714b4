use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sbtet_core::error::CoreError;
use sbtet_upstream::FetchError;
use serde_json::json;

pub const MSG_STUDENT_NOT_FOUND: &str = "Student not found. Please check the PIN.";
pub const MSG_TIMEOUT: &str = "Request timeout. Please try again.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`FetchError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "success": false, "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required query parameter was absent or empty.
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    /// The query string could not be deserialized; carries axum's reason.
    #[error("{0}")]
    InvalidQuery(String),

    /// A domain-level error from `sbtet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream fetch failure from `sbtet_upstream`.
    #[error(transparent)]
    Upstream(#[from] FetchError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingParameter(name) => {
                (StatusCode::BAD_REQUEST, format!("Missing {name} parameter"))
            }
            AppError::InvalidQuery(reason) => (StatusCode::BAD_REQUEST, reason.clone()),

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            },

            // --- Upstream errors ---
            AppError::Upstream(err) => classify_fetch_error(err),
        };

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upstream failure into an HTTP status and message.
///
/// - Timeouts map to 504.
/// - An explicit upstream 404 maps to 404.
/// - Other upstream HTTP errors pass their status through (502 if it is not
///   an error status).
/// - Undecodable payloads, empty pages and transport failures map to 502.
/// - A failure with no attempt behind it maps to 500.
fn classify_fetch_error(err: &FetchError) -> (StatusCode, String) {
    tracing::warn!(error = %err, "Upstream fetch failed");

    match err.root() {
        FetchError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, MSG_TIMEOUT.to_string()),
        FetchError::NotFound { .. } | FetchError::Http { status: 404, .. } => {
            (StatusCode::NOT_FOUND, MSG_STUDENT_NOT_FOUND.to_string())
        }
        FetchError::Http { status, .. } => {
            let code = StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (code, format!("HTTP Error: {status}"))
        }
        FetchError::Malformed { source, .. } => (
            StatusCode::BAD_GATEWAY,
            format!("Invalid JSON response: {source}"),
        ),
        FetchError::EmptyPage { .. } => (
            StatusCode::BAD_GATEWAY,
            "Empty HTML response from results server".to_string(),
        ),
        FetchError::Transport { source, .. } => {
            (StatusCode::BAD_GATEWAY, format!("Network error: {source}"))
        }
        FetchError::Unknown | FetchError::Exhausted { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server error: unknown upstream failure".to_string(),
        ),
    }
}
