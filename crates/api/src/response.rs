//! Response envelope types for API handlers.
//!
//! Successful responses carry `"success": true`; failures are rendered by
//! [`AppError`](crate::error::AppError) as `{ "success": false, "error": ... }`.

use sbtet_core::normalizer::AttendanceReport;
use serde::Serialize;

/// `GET /api/attendance` body: the report fields flattened beside `success`.
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AttendanceReport,
}

/// `{ "success": true, "pin": ..., "data": T }` envelope for results endpoints.
#[derive(Debug, Serialize)]
pub struct PinDataResponse<T: Serialize> {
    pub success: bool,
    pub pin: String,
    pub data: T,
}

/// `GET /api/results/raw` body.
#[derive(Debug, Serialize)]
pub struct RawHtmlResponse<T: Serialize> {
    pub success: bool,
    pub pin: String,
    pub html: T,
}
