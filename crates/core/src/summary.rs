//! Attendance summary derivation.
//!
//! Combines the total-days, present-days and percentage fields found by the
//! [`matcher`](crate::matcher) into one consistent summary, filling in what
//! can be computed and leaving the rest `null`.

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::matcher::{find_numeric_field, FieldPatterns};
use crate::types::UpstreamRecord;

/// Tolerance under which a value is treated as a whole number.
const WHOLE_EPSILON: f64 = 1e-9;

static TOTAL_DAYS: LazyLock<FieldPatterns> = LazyLock::new(|| {
    FieldPatterns::new(&[
        r"total.*day",
        r"working.*day",
        r"no.*day",
        r"totday",
        r"twd",
        r"twdays",
        r"totalworkingdays",
        r"noofdays",
    ])
    .expect("valid regex")
});

static PRESENT_DAYS: LazyLock<FieldPatterns> = LazyLock::new(|| {
    FieldPatterns::new(&[
        r"present.*day",
        r"attend.*day",
        r"presentday",
        r"pday",
        r"noofpresentdays",
        r"presentdays",
        r"daysattended",
        r"attended",
    ])
    .expect("valid regex")
});

static PERCENTAGE: LazyLock<FieldPatterns> = LazyLock::new(|| {
    FieldPatterns::new(&[
        r"percent",
        r"percentage",
        r"attend.*%",
        r"att.*per",
        r"attendancepercent",
    ])
    .expect("valid regex")
});

/// A day count that serializes as an integer when it is whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DayCount {
    Whole(i64),
    Fractional(f64),
}

impl DayCount {
    /// Normalize a raw count, snapping to an integer within [`WHOLE_EPSILON`].
    pub fn from_f64(n: f64) -> Self {
        let rounded = n.round();
        if (n - rounded).abs() < WHOLE_EPSILON {
            DayCount::Whole(rounded as i64)
        } else {
            DayCount::Fractional(n)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            DayCount::Whole(n) => n as f64,
            DayCount::Fractional(n) => n,
        }
    }
}

/// Canonical attendance summary returned alongside the raw records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub attendance_percentage: Option<f64>,
    pub total_days: Option<DayCount>,
    pub present_days: Option<DayCount>,
    pub absent_days: Option<DayCount>,
}

/// Derive a summary from the student info row, falling back to the first
/// attendance record when the info row is empty.
pub fn derive(student_info: &UpstreamRecord, records: &[Value]) -> AttendanceSummary {
    let empty = UpstreamRecord::new();
    let source = if !student_info.is_empty() {
        student_info
    } else {
        records
            .first()
            .and_then(Value::as_object)
            .unwrap_or(&empty)
    };

    let total = find_numeric_field(source, &TOTAL_DAYS);
    let present = find_numeric_field(source, &PRESENT_DAYS);
    let mut percent = find_numeric_field(source, &PERCENTAGE);

    if percent.is_none() {
        if let (Some(t), Some(p)) = (total, present) {
            if t > 0.0 {
                percent = Some(p / t * 100.0);
            }
        }
    }

    let total_days = total.map(DayCount::from_f64);
    let present_days = present.map(DayCount::from_f64);
    let absent_days = match (total_days, present_days) {
        (Some(t), Some(p)) => Some(DayCount::from_f64(t.as_f64() - p.as_f64())),
        _ => None,
    };

    AttendanceSummary {
        attendance_percentage: percent.map(round2),
        total_days,
        present_days,
        absent_days,
    }
}

/// Round to two decimal places.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}
