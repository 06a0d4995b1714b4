use axum::extract::State;
use axum::Json;
use sbtet_core::normalizer::normalize_attendance;
use serde_json::Value;

use crate::error::AppResult;
use crate::query::Pin;
use crate::response::AttendanceResponse;
use crate::state::AppState;

/// GET /api/attendance?pin=
///
/// Fetch the live attendance report and normalize it into student info,
/// daily records and a derived summary.
pub async fn get_attendance(
    State(state): State<AppState>,
    Pin(pin): Pin,
) -> AppResult<Json<AttendanceResponse>> {
    let raw = state.portal.attendance(&pin).await?;
    let report = normalize_attendance(&Value::Object(raw))?;

    tracing::info!(
        pin = %pin,
        records = report.attendance_records.len(),
        "Attendance report served",
    );

    Ok(Json(AttendanceResponse {
        success: true,
        report,
    }))
}
