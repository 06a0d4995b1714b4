//! Normalization of the upstream attendance report.
//!
//! The upstream answers with positionally named tables: `Table` holds the
//! student info row and `Table1` the daily attendance rows. Either may be
//! missing or empty, and no other table is assumed to exist.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::summary::{derive, AttendanceSummary};
use crate::types::UpstreamRecord;

pub const MSG_NO_DATA_RETURNED: &str = "No data returned from SBTET API";
pub const MSG_NO_DATA_FOR_PIN: &str =
    "No data found for this PIN. Please verify the PIN is correct.";
pub const MSG_PIN_MAY_BE_INVALID: &str =
    "No data found for this PIN. The PIN may be invalid or not in the SBTET system.";

/// The attendance report in the shape served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub student_info: UpstreamRecord,
    pub attendance_records: Vec<Value>,
    pub attendance_summary: AttendanceSummary,
}

/// Map raw upstream attendance data into an [`AttendanceReport`].
///
/// Returns [`CoreError::NotFound`] when the upstream returned nothing, only
/// empty values, or no student info row.
pub fn normalize_attendance(data: &Value) -> Result<AttendanceReport, CoreError> {
    if is_falsy(data) {
        return Err(CoreError::NotFound(MSG_NO_DATA_RETURNED.into()));
    }

    let mut student_info = UpstreamRecord::new();
    let mut attendance_records = Vec::new();

    if let Value::Object(tables) = data {
        if tables.values().all(is_falsy) {
            return Err(CoreError::NotFound(MSG_NO_DATA_FOR_PIN.into()));
        }

        let info_table = tables.get("Table").and_then(Value::as_array);

        if let Some(first) = info_table.and_then(|rows| rows.first()) {
            if let Some(row) = first.as_object() {
                student_info = row.clone();
            }
        }

        // `Table` doubles as the record source only when it did not already
        // supply the student info row.
        if let Some(rows) = tables.get("Table1").and_then(Value::as_array) {
            attendance_records = rows.clone();
        } else if let Some(rows) = info_table {
            if student_info.is_empty() {
                attendance_records = rows.clone();
            }
        }
    }

    let attendance_summary = derive(&student_info, &attendance_records);

    if student_info.is_empty() {
        return Err(CoreError::NotFound(MSG_PIN_MAY_BE_INVALID.into()));
    }

    tracing::debug!(
        info_fields = student_info.len(),
        records = attendance_records.len(),
        "Normalized attendance report",
    );

    Ok(AttendanceReport {
        student_info,
        attendance_records,
        attendance_summary,
    })
}

/// Empty-ish upstream values: `null`, `false`, `0`, `""`, `[]` and `{}`.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
