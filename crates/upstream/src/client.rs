//! REST client for the SBTET portal endpoints.
//!
//! JSON reports are fetched from an ordered list of candidate URLs; HTTP
//! error statuses and undecodable bodies fall through to the next candidate,
//! while timeouts and transport failures abort immediately. The results HTML
//! page has a single URL and no fallback.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};
use sbtet_core::types::UpstreamRecord;

use crate::candidates::{candidate_urls, fill_template};
use crate::config::{ReportKind, UpstreamConfig};
use crate::decode::decode_record;
use crate::error::FetchError;

/// Results pages shorter than this are error or placeholder pages.
pub const MIN_RESULTS_HTML_LEN: usize = 200;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const PORTAL_REFERER: &str = "https://www.sbtet.telangana.gov.in/";

/// HTTP client for the portal.
pub struct PortalClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl PortalClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch a JSON report (attendance or consolidated results).
    ///
    /// Returns the first candidate's record that both answers with a
    /// non-error status and decodes into a JSON object.
    pub async fn fetch_json(
        &self,
        kind: ReportKind,
        pin: &str,
    ) -> Result<UpstreamRecord, FetchError> {
        let candidates = candidate_urls(self.config.template(kind), pin);
        self.fetch_first_json(kind, &candidates).await
    }

    /// Try `candidates` in order. Earlier failures are discarded once a
    /// later candidate succeeds.
    pub async fn fetch_first_json(
        &self,
        kind: ReportKind,
        candidates: &[String],
    ) -> Result<UpstreamRecord, FetchError> {
        let mut last_error = None;

        for (attempt, url) in candidates.iter().enumerate() {
            match self.fetch_json_candidate(kind, url).await {
                Ok(record) => {
                    tracing::debug!(
                        kind = kind.as_str(),
                        url,
                        attempt,
                        "Upstream candidate succeeded",
                    );
                    return Ok(record);
                }
                Err(e) if e.falls_back() => {
                    tracing::warn!(
                        kind = kind.as_str(),
                        url,
                        attempt,
                        error = %e,
                        "Upstream candidate failed, trying next",
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        match last_error {
            Some(last) => Err(FetchError::Exhausted {
                attempts: candidates.len(),
                last: Box::new(last),
            }),
            None => Err(FetchError::Unknown),
        }
    }

    /// Fetch the results HTML page.
    pub async fn fetch_results_html(&self, pin: &str) -> Result<String, FetchError> {
        let kind = ReportKind::ResultsHtml;
        let url = fill_template(self.config.template(kind), pin);
        let response = self.send(kind, &url).await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { url });
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;
        let len = html.chars().count();
        tracing::debug!(url, len, "Fetched results page");

        if len < MIN_RESULTS_HTML_LEN {
            return Err(FetchError::EmptyPage { url, len });
        }
        Ok(html)
    }

    // ---- private helpers ----

    async fn fetch_json_candidate(
        &self,
        kind: ReportKind,
        url: &str,
    ) -> Result<UpstreamRecord, FetchError> {
        let response = self.send(kind, url).await?;
        let status = response.status();
        tracing::debug!(
            kind = kind.as_str(),
            url,
            status = status.as_u16(),
            "Upstream responded",
        );

        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        decode_record(&body).map_err(|source| FetchError::Malformed {
            url: url.to_string(),
            source,
        })
    }

    async fn send(&self, kind: ReportKind, url: &str) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .headers(browser_headers(kind))
            .timeout(kind.timeout())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}

/// Browser-like headers; the portal throttles requests without them.
pub fn browser_headers(kind: ReportKind) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static(PORTAL_REFERER));

    match kind {
        ReportKind::Attendance | ReportKind::ResultsJson => {
            headers.insert(ACCEPT, HeaderValue::from_static(JSON_ACCEPT));
            headers.insert(
                HeaderName::from_static("x-requested-with"),
                HeaderValue::from_static("XMLHttpRequest"),
            );
        }
        ReportKind::ResultsHtml => {
            headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));
        }
    }
    headers
}
