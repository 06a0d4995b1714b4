//! Extraction of a structured results sheet from the results HTML page.
//!
//! The results page is server-rendered HTML with three useful parts:
//! `<strong>Label:</strong> value` student details, a `data-table` listing
//! every subject, and an inline `const sgpaData = [...]` script holding the
//! per-semester SGPA history. The parsed sheet is emitted in the upstream's
//! `Table`/`Table1`/`Table2`/`Table3` layout so clients can treat it like the
//! JSON results report.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::numeric::leading_number;
use crate::summary::round2;

pub const MSG_NO_RESULTS: &str = "No results found for this PIN.";

/// Marks in the subjects table that mean "no marks recorded".
const NO_MARKS: &str = "—";

/// Grades that earn no credit.
const FAILING_GRADES: [&str; 2] = ["F", "AB"];

/// Minimum `<td>` cells in a subject row.
const SUBJECT_COLUMNS: usize = 8;

static SGPA_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)const sgpaData\s*=\s*(\[.*?\]);").expect("valid regex")
});

static DATA_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<table[^>]*class="data-table"[^>]*>([\s\S]*?)</table>"#)
        .expect("valid regex")
});

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<tr[^>]*>([\s\S]*?)</tr>").expect("valid regex"));

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<td[^>]*>([\s\S]*?)</td>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Student identity block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDetails {
    pub name: String,
    pub pin: String,
    pub branch: String,
    pub center: String,
}

/// One row of the "All Subjects" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectResult {
    #[serde(rename = "Semester")]
    pub semester: String,
    #[serde(rename = "SubjectName")]
    pub subject_name: String,
    #[serde(rename = "Subject_Code")]
    pub subject_code: String,
    #[serde(rename = "SubjectTotal")]
    pub marks: Option<String>,
    #[serde(rename = "HybridGrade")]
    pub grade: String,
    #[serde(rename = "GradePoint")]
    pub grade_point: String,
    #[serde(rename = "MaxCredits")]
    pub max_credits: String,
}

/// One semester of the SGPA history script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgpaRecord {
    #[serde(rename(serialize = "Semester", deserialize = "semester"), default)]
    pub semester: Option<String>,
    #[serde(rename(serialize = "Credits", deserialize = "credits"), default)]
    pub credits: Option<f64>,
    #[serde(
        rename(serialize = "TotalGradePoints", deserialize = "total_grade_points"),
        default
    )]
    pub total_grade_points: Option<f64>,
    #[serde(rename(serialize = "SGPA", deserialize = "sgpa"), default)]
    pub sgpa: Option<f64>,
    #[serde(rename(serialize = "SemId", deserialize = "sem_id"), default)]
    pub sem_id: Option<i64>,
}

/// Credit totals and CGPA.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditSummary {
    pub total_max_credits: f64,
    pub credits_gained: f64,
    pub cgpa: Option<f64>,
}

/// Everything recovered from one results page.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSheet {
    pub student: StudentDetails,
    pub credits: CreditSummary,
    pub subjects: Vec<SubjectResult>,
    pub sgpa_history: Vec<SgpaRecord>,
}

impl ResultsSheet {
    /// Render in the upstream table layout.
    pub fn to_tables(&self) -> Value {
        json!({
            "Table": [{
                "StudentName": self.student.name,
                "Pin": self.student.pin,
                "Branch": self.student.branch,
                "BranchName": self.student.branch,
                "BranchCode": self.student.branch,
                "CenterName": self.student.center,
            }],
            "Table1": [{
                "TotalMaxCredits": self.credits.total_max_credits,
                "CreditsGained": self.credits.credits_gained,
                "CGPA": self.credits.cgpa,
            }],
            "Table2": self.subjects,
            "Table3": self.sgpa_history,
        })
    }
}

/// Parse a results page for `pin`.
///
/// Returns [`CoreError::NotFound`] when the page has no student name, no
/// subjects and no SGPA history.
pub fn parse_results_html(html: &str, pin: &str) -> Result<ResultsSheet, CoreError> {
    let sgpa_history = parse_sgpa_history(html);
    let subjects = parse_subjects(html);

    let student = StudentDetails {
        name: labelled_value(html, "Name").unwrap_or_default(),
        pin: labelled_value(html, "PIN")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| pin.to_string()),
        branch: labelled_value(html, "Branch").unwrap_or_default(),
        center: labelled_value(html, "Center").unwrap_or_default(),
    };

    if student.branch.is_empty() {
        tracing::warn!(pin, "Branch label missing from results page");
    }

    if student.name.is_empty() && subjects.is_empty() && sgpa_history.is_empty() {
        return Err(CoreError::NotFound(MSG_NO_RESULTS.into()));
    }

    let credits = summarize_credits(
        labelled_value(html, "Credits").as_deref(),
        labelled_value(html, "CGPA").as_deref(),
        &subjects,
        &sgpa_history,
    );

    tracing::debug!(
        pin,
        subjects = subjects.len(),
        semesters = sgpa_history.len(),
        "Parsed results page",
    );

    Ok(ResultsSheet {
        student,
        credits,
        subjects,
        sgpa_history,
    })
}

/// Text following `<strong>{label}:</strong>`, up to the next `<br>`,
/// `</div>` or end of document.
fn labelled_value(html: &str, label: &str) -> Option<String> {
    let pattern = format!(
        r"<strong>\s*{}\s*[:\s]*</strong>\s*[:\s]*([\s\S]*?)(?:<br>|</div>|$)",
        regex::escape(label)
    );
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn parse_sgpa_history(html: &str) -> Vec<SgpaRecord> {
    let Some(raw) = SGPA_SCRIPT_RE.captures(html).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<SgpaRecord>>(raw.as_str()) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse SGPA script data");
            Vec::new()
        }
    }
}

fn parse_subjects(html: &str) -> Vec<SubjectResult> {
    DATA_TABLE_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|table| table.contains("<th>Subject</th>") && table.contains("<th>Code</th>"))
        .flat_map(|table| ROW_RE.captures_iter(table).filter_map(|c| c.get(1)))
        .filter_map(|row| {
            let cols: Vec<String> = CELL_RE
                .captures_iter(row.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| TAG_RE.replace_all(m.as_str(), "").trim().to_string())
                .collect();
            (cols.len() >= SUBJECT_COLUMNS).then(|| SubjectResult {
                semester: cols[0].clone(),
                subject_name: cols[1].clone(),
                subject_code: cols[2].clone(),
                marks: (cols[4] != NO_MARKS).then(|| cols[4].clone()),
                grade: cols[5].clone(),
                grade_point: cols[6].clone(),
                max_credits: cols[7].clone(),
            })
        })
        .collect()
}

/// Credits come from the `gained/total` label when present, otherwise from
/// the SGPA history, otherwise from the subjects table.
fn summarize_credits(
    credits_label: Option<&str>,
    cgpa_label: Option<&str>,
    subjects: &[SubjectResult],
    sgpa_history: &[SgpaRecord],
) -> CreditSummary {
    let mut summary = CreditSummary {
        cgpa: cgpa_label.and_then(leading_number),
        ..Default::default()
    };

    match credits_label.and_then(|c| c.split_once('/')) {
        Some((gained, total)) => {
            if let Some(g) = leading_number(gained) {
                summary.credits_gained = g;
            }
            if let Some(t) = leading_number(total) {
                summary.total_max_credits = t;
            }
        }
        None if !sgpa_history.is_empty() => {
            for credits in sgpa_history.iter().filter_map(|r| r.credits) {
                summary.total_max_credits += credits;
                summary.credits_gained += credits;
            }
        }
        None => {
            for subject in subjects {
                let credits = leading_number(&subject.max_credits).unwrap_or(0.0);
                summary.total_max_credits += credits;
                if !FAILING_GRADES.contains(&subject.grade.as_str()) {
                    summary.credits_gained += credits;
                }
            }
        }
    }

    if summary.cgpa.is_none() {
        let sgpas: Vec<f64> = sgpa_history
            .iter()
            .filter_map(|r| r.sgpa)
            .filter(|s| *s != 0.0)
            .collect();
        if !sgpas.is_empty() {
            summary.cgpa = Some(round2(sgpas.iter().sum::<f64>() / sgpas.len() as f64));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PAGE: &str = r#"
<html><body>
<div class="student">
  <strong>Name:</strong> RAVI KUMAR<br>
  <strong>PIN:</strong> 24054-CPS-020<br>
  <strong>Branch:</strong> CPS</div>
<div><strong>Center:</strong> GOVT POLYTECHNIC</div>
<div><strong>CGPA:</strong> 8.12</div>
<div><strong>Credits:</strong> 38.5/40.0</div>
<table class="data-table">
  <tr><th>Semester</th><th>Subject</th><th>Code</th><th>Type</th><th>Marks</th><th>Grade</th><th>Grade Point</th><th>Credits</th></tr>
  <tr><td>1SEM</td><td><b>English</b></td><td>101</td><td>T</td><td>78</td><td>A</td><td>8</td><td>2.5</td></tr>
  <tr><td>1SEM</td><td>Workshop</td><td>108</td><td>P</td><td>—</td><td>B</td><td>7</td><td>1.5</td></tr>
  <tr><td>short row</td></tr>
</table>
<table class="data-table"><tr><th>Semester</th><th>SGPA</th></tr><tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td><td>8</td></tr></table>
<script>
const sgpaData = [{"credits": 20.0, "sem_id": 1, "semester": "1SEM", "sgpa": 7.88, "total_grade_points": 157.5},
                  {"credits": 20.0, "sem_id": 2, "semester": "2SEM", "sgpa": 8.36, "total_grade_points": 167.2}];
</script>
</body></html>"#;

    #[test]
    fn extracts_student_details() {
        let sheet = parse_results_html(PAGE, "24054-cps-020").unwrap();

        assert_eq!(sheet.student.name, "RAVI KUMAR");
        assert_eq!(sheet.student.pin, "24054-CPS-020");
        assert_eq!(sheet.student.branch, "CPS");
        assert_eq!(sheet.student.center, "GOVT POLYTECHNIC");
    }

    #[test]
    fn extracts_subject_rows_from_subjects_table_only() {
        let sheet = parse_results_html(PAGE, "x").unwrap();

        assert_eq!(sheet.subjects.len(), 2);
        assert_eq!(sheet.subjects[0].subject_name, "English");
        assert_eq!(sheet.subjects[0].marks.as_deref(), Some("78"));
        assert_eq!(sheet.subjects[1].marks, None);
        assert_eq!(sheet.subjects[1].max_credits, "1.5");
    }

    #[test]
    fn extracts_sgpa_history() {
        let sheet = parse_results_html(PAGE, "x").unwrap();

        assert_eq!(sheet.sgpa_history.len(), 2);
        assert_eq!(sheet.sgpa_history[1].semester.as_deref(), Some("2SEM"));
        assert_eq!(sheet.sgpa_history[1].sgpa, Some(8.36));
    }

    #[test]
    fn credits_and_cgpa_from_labels() {
        let sheet = parse_results_html(PAGE, "x").unwrap();

        assert_eq!(sheet.credits.credits_gained, 38.5);
        assert_eq!(sheet.credits.total_max_credits, 40.0);
        assert_eq!(sheet.credits.cgpa, Some(8.12));
    }

    #[test]
    fn credits_fall_back_to_sgpa_history_and_cgpa_to_mean() {
        let page = r#"<strong>Name:</strong> A<br>
<script>const sgpaData = [{"credits": 20.0, "sgpa": 7.0}, {"credits": 18.0, "sgpa": 8.25}];</script>"#;
        let sheet = parse_results_html(page, "x").unwrap();

        assert_eq!(sheet.credits.total_max_credits, 38.0);
        assert_eq!(sheet.credits.credits_gained, 38.0);
        assert_eq!(sheet.credits.cgpa, Some(7.63));
    }

    #[test]
    fn credits_fall_back_to_subjects_excluding_failures() {
        let page = r#"<table class="data-table">
<tr><th>Subject</th><th>Code</th></tr>
<tr><td>1</td><td>Maths</td><td>102</td><td>T</td><td>20</td><td>F</td><td>0</td><td>3</td></tr>
<tr><td>1</td><td>Physics</td><td>103</td><td>T</td><td>60</td><td>B</td><td>7</td><td>2.5</td></tr>
<tr><td>1</td><td>Lab</td><td>104</td><td>P</td><td>—</td><td>AB</td><td>0</td><td>1</td></tr>
</table>"#;
        let sheet = parse_results_html(page, "x").unwrap();

        assert_eq!(sheet.credits.total_max_credits, 6.5);
        assert_eq!(sheet.credits.credits_gained, 2.5);
        assert_eq!(sheet.credits.cgpa, None);
    }

    #[test]
    fn pin_falls_back_to_requested_pin() {
        let page = "<strong>Name:</strong> A<br>";
        let sheet = parse_results_html(page, "abc123").unwrap();

        assert_eq!(sheet.student.pin, "abc123");
    }

    #[test]
    fn malformed_sgpa_script_is_ignored() {
        let page = "<strong>Name:</strong> A<br><script>const sgpaData = [{oops}];</script>";
        let sheet = parse_results_html(page, "x").unwrap();

        assert!(sheet.sgpa_history.is_empty());
    }

    #[test]
    fn empty_page_is_not_found() {
        let err = parse_results_html("<html><body>nothing here</body></html>", "x").unwrap_err();
        assert_matches!(err, CoreError::NotFound(msg) if msg == MSG_NO_RESULTS);
    }

    #[test]
    fn tables_layout() {
        let tables = parse_results_html(PAGE, "x").unwrap().to_tables();

        assert_eq!(tables["Table"][0]["StudentName"], "RAVI KUMAR");
        assert_eq!(tables["Table"][0]["BranchCode"], "CPS");
        assert_eq!(tables["Table1"][0]["CGPA"], 8.12);
        assert_eq!(tables["Table2"][0]["Subject_Code"], "101");
        assert!(tables["Table2"][1]["SubjectTotal"].is_null());
        assert_eq!(tables["Table3"][0]["SGPA"], 7.88);
        assert_eq!(tables["Table3"][0]["SemId"], 1);
    }
}
