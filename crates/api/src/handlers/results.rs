//! Handlers for the results endpoints.
//!
//! All three share the portal's results caches, so repeated lookups for the
//! same PIN within the cache lifetime never reach the upstream.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sbtet_core::results_html::parse_results_html;
use sbtet_core::types::UpstreamRecord;
use serde_json::Value;

use crate::error::AppResult;
use crate::query::Pin;
use crate::response::{PinDataResponse, RawHtmlResponse};
use crate::state::AppState;

/// GET /api/results?pin=
///
/// Proxy the consolidated-results JSON as-is.
pub async fn get_results(
    State(state): State<AppState>,
    Pin(pin): Pin,
) -> AppResult<Json<PinDataResponse<Arc<UpstreamRecord>>>> {
    let data = state.portal.results_json(&pin).await?;

    Ok(Json(PinDataResponse {
        success: true,
        pin,
        data,
    }))
}

/// GET /api/results/raw?pin=
///
/// Proxy the results HTML page as a JSON string.
pub async fn get_results_raw(
    State(state): State<AppState>,
    Pin(pin): Pin,
) -> AppResult<Json<RawHtmlResponse<Arc<str>>>> {
    let html = state.portal.results_html(&pin).await?;

    Ok(Json(RawHtmlResponse {
        success: true,
        pin,
        html,
    }))
}

/// GET /api/results/summary?pin=
///
/// Parse the results HTML page into the upstream table layout.
pub async fn get_results_summary(
    State(state): State<AppState>,
    Pin(pin): Pin,
) -> AppResult<Json<PinDataResponse<Value>>> {
    let html = state.portal.results_html(&pin).await?;
    let sheet = parse_results_html(&html, &pin)?;

    Ok(Json(PinDataResponse {
        success: true,
        pin,
        data: sheet.to_tables(),
    }))
}
