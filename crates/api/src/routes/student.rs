//! Route definitions for student lookups, mounted under `/api`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{attendance, results};
use crate::state::AppState;

/// ```text
/// GET /attendance       -> get_attendance
/// GET /results          -> get_results
/// GET /results/raw      -> get_results_raw
/// GET /results/summary  -> get_results_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(attendance::get_attendance))
        .route("/results", get(results::get_results))
        .route("/results/raw", get(results::get_results_raw))
        .route("/results/summary", get(results::get_results_summary))
}
