pub mod health;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /attendance?pin=          normalized attendance report
/// /results?pin=             consolidated results JSON (cached)
/// /results/raw?pin=         results HTML page (cached)
/// /results/summary?pin=     results HTML parsed into tables (cached page)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(student::router())
}
