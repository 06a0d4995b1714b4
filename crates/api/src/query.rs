//! Shared query parameter types for API handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?pin=` lookup parameter used by every student endpoint.
#[derive(Debug, Deserialize)]
pub struct PinParams {
    pub pin: Option<String>,
}

impl PinParams {
    /// The PIN, or [`AppError::MissingParameter`] when absent or empty.
    pub fn require(self) -> AppResult<String> {
        self.pin
            .filter(|p| !p.is_empty())
            .ok_or(AppError::MissingParameter("pin"))
    }
}

/// The caller's PIN, extracted from `?pin=`.
///
/// Rejects with [`AppError`] so a missing PIN and an undecodable query
/// string both render the standard error envelope:
///
/// ```ignore
/// async fn lookup(Pin(pin): Pin) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Pin(pub String);

impl<S> FromRequestParts<S> for Pin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PinParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;
        params.require().map(Pin)
    }
}
