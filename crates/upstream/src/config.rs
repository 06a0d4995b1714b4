use std::time::Duration;

use crate::candidates::candidate_urls;

/// Production attendance endpoint. The doubled `/api/api/` is how the portal
/// publishes it; [`candidate_urls`](crate::candidates::candidate_urls) also
/// tries the collapsed form.
pub const DEFAULT_ATTENDANCE_URL: &str =
    "https://www.sbtet.telangana.gov.in/api/api/PreExamination/getAttendanceReport?Pin={pin}";

pub const DEFAULT_RESULTS_URL: &str =
    "https://www.sbtet.telangana.gov.in/api/api/Results/GetConsolidatedResults?Pin={pin}";

pub const DEFAULT_RESULTS_HTML_URL: &str = "http://18.61.7.125/result/{pin}";

/// Placeholder substituted with the caller's PIN in every URL template.
pub const PIN_PLACEHOLDER: &str = "{pin}";

/// The three upstream report kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Attendance,
    ResultsJson,
    ResultsHtml,
}

impl ReportKind {
    /// Per-request timeout for this kind.
    pub fn timeout(self) -> Duration {
        match self {
            ReportKind::Attendance => Duration::from_secs(15),
            ReportKind::ResultsJson | ReportKind::ResultsHtml => Duration::from_secs(20),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Attendance => "attendance",
            ReportKind::ResultsJson => "results_json",
            ReportKind::ResultsHtml => "results_html",
        }
    }
}

/// Upstream URL templates.
///
/// All fields default to the production portal; the overrides exist for
/// staging mirrors and tests.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub attendance_url: String,
    pub results_url: String,
    pub results_html_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            attendance_url: DEFAULT_ATTENDANCE_URL.into(),
            results_url: DEFAULT_RESULTS_URL.into(),
            results_html_url: DEFAULT_RESULTS_HTML_URL.into(),
        }
    }
}

impl UpstreamConfig {
    /// Load URL templates from environment variables with defaults.
    ///
    /// | Env Var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `SBTET_ATTENDANCE_URL`   | [`DEFAULT_ATTENDANCE_URL`]     |
    /// | `SBTET_RESULTS_URL`      | [`DEFAULT_RESULTS_URL`]        |
    /// | `SBTET_RESULTS_HTML_URL` | [`DEFAULT_RESULTS_HTML_URL`]   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            attendance_url: std::env::var("SBTET_ATTENDANCE_URL")
                .unwrap_or(defaults.attendance_url),
            results_url: std::env::var("SBTET_RESULTS_URL").unwrap_or(defaults.results_url),
            results_html_url: std::env::var("SBTET_RESULTS_HTML_URL")
                .unwrap_or(defaults.results_html_url),
        }
    }

    /// Point every template at `base_url`, keeping the production paths.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            attendance_url: format!(
                "{base}/api/api/PreExamination/getAttendanceReport?Pin={PIN_PLACEHOLDER}"
            ),
            results_url: format!(
                "{base}/api/api/Results/GetConsolidatedResults?Pin={PIN_PLACEHOLDER}"
            ),
            results_html_url: format!("{base}/result/{PIN_PLACEHOLDER}"),
        }
    }

    pub fn template(&self, kind: ReportKind) -> &str {
        match kind {
            ReportKind::Attendance => &self.attendance_url,
            ReportKind::ResultsJson => &self.results_url,
            ReportKind::ResultsHtml => &self.results_html_url,
        }
    }

    /// Longest a single fetch of `kind` can take: the per-request timeout
    /// times the number of URLs that may be tried in sequence.
    pub fn fetch_budget(&self, kind: ReportKind) -> Duration {
        let attempts = match kind {
            ReportKind::ResultsHtml => 1,
            ReportKind::Attendance | ReportKind::ResultsJson => {
                candidate_urls(self.template(kind), PIN_PLACEHOLDER).len()
            }
        };
        kind.timeout() * attempts as u32
    }

    /// The largest [`fetch_budget`](Self::fetch_budget) over all kinds.
    pub fn max_fetch_budget(&self) -> Duration {
        [
            ReportKind::Attendance,
            ReportKind::ResultsJson,
            ReportKind::ResultsHtml,
        ]
        .into_iter()
        .map(|kind| self.fetch_budget(kind))
        .max()
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_per_kind() {
        assert_eq!(ReportKind::Attendance.timeout(), Duration::from_secs(15));
        assert_eq!(ReportKind::ResultsJson.timeout(), Duration::from_secs(20));
        assert_eq!(ReportKind::ResultsHtml.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn base_url_keeps_production_paths() {
        let config = UpstreamConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.template(ReportKind::Attendance),
            "http://127.0.0.1:9000/api/api/PreExamination/getAttendanceReport?Pin={pin}"
        );
        assert_eq!(
            config.template(ReportKind::ResultsHtml),
            "http://127.0.0.1:9000/result/{pin}"
        );
    }

    #[test]
    fn fetch_budget_counts_fallback_candidates() {
        let config = UpstreamConfig::default();
        assert_eq!(config.fetch_budget(ReportKind::Attendance), Duration::from_secs(30));
        assert_eq!(config.fetch_budget(ReportKind::ResultsJson), Duration::from_secs(40));
        assert_eq!(config.fetch_budget(ReportKind::ResultsHtml), Duration::from_secs(20));
        assert_eq!(config.max_fetch_budget(), Duration::from_secs(40));
    }

    #[test]
    fn fetch_budget_without_duplicate_segment_is_one_attempt() {
        let config = UpstreamConfig {
            results_url: "http://mirror/Results?Pin={pin}".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(config.fetch_budget(ReportKind::ResultsJson), Duration::from_secs(20));
    }
}
