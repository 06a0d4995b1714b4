//! Cached access to student reports.
//!
//! Results are fronted by two independent [`TtlCache`]s, one per payload
//! kind, keyed by lower-cased PIN. Attendance is always fetched live.

use std::sync::Arc;

use sbtet_core::cache::TtlCache;
use sbtet_core::types::{pin_cache_key, UpstreamRecord};

use crate::client::PortalClient;
use crate::config::{ReportKind, UpstreamConfig};
use crate::error::FetchError;

/// Shared entry point for all report lookups.
///
/// Construct once at start-up and share behind an `Arc`.
pub struct StudentPortal {
    client: PortalClient,
    results_json_cache: TtlCache<Arc<UpstreamRecord>>,
    results_html_cache: TtlCache<Arc<str>>,
}

impl StudentPortal {
    pub fn new(client: PortalClient) -> Self {
        Self {
            client,
            results_json_cache: TtlCache::new(),
            results_html_cache: TtlCache::new(),
        }
    }

    pub fn from_config(config: UpstreamConfig) -> Self {
        Self::new(PortalClient::new(config))
    }

    /// Raw attendance report. Never cached.
    pub async fn attendance(&self, pin: &str) -> Result<UpstreamRecord, FetchError> {
        self.client.fetch_json(ReportKind::Attendance, pin).await
    }

    /// Raw consolidated-results JSON.
    pub async fn results_json(&self, pin: &str) -> Result<Arc<UpstreamRecord>, FetchError> {
        let key = pin_cache_key(pin);
        if let Some(hit) = self.results_json_cache.get(&key) {
            tracing::debug!(pin, "Results JSON cache hit");
            return Ok(hit);
        }

        let record = Arc::new(self.client.fetch_json(ReportKind::ResultsJson, pin).await?);
        self.results_json_cache.put(key, Arc::clone(&record));
        Ok(record)
    }

    /// Raw results HTML page.
    pub async fn results_html(&self, pin: &str) -> Result<Arc<str>, FetchError> {
        let key = pin_cache_key(pin);
        if let Some(hit) = self.results_html_cache.get(&key) {
            tracing::debug!(pin, "Results HTML cache hit");
            return Ok(hit);
        }

        let html: Arc<str> = self.client.fetch_results_html(pin).await?.into();
        self.results_html_cache.put(key, Arc::clone(&html));
        Ok(html)
    }
}
