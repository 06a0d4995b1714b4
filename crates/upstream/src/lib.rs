//! HTTP client for the SBTET portal.
//!
//! Wraps the upstream's inconsistent endpoints (duplicated `/api/api/` path
//! segments, double-encoded JSON bodies, an HTML-only results page) behind
//! typed results, and fronts the results paths with short-lived caches.

pub mod candidates;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod portal;

pub use client::PortalClient;
pub use config::{ReportKind, UpstreamConfig};
pub use error::FetchError;
pub use portal::StudentPortal;
