//! Domain logic for the SBTET attendance and results proxy.
//!
//! Everything here is pure: no network, no clock other than the one the
//! caller hands in. The upstream client and HTTP surface live in the
//! `sbtet-upstream` and `sbtet-api` crates.

pub mod cache;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod numeric;
pub mod results_html;
pub mod summary;
pub mod types;
