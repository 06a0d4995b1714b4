use std::time::Duration;

use sbtet_upstream::UpstreamConfig;

/// Headroom kept above the slowest upstream fetch.
const TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the production deployment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`; `*` allows any.
    pub cors_origins: Vec<String>,
    /// Outer HTTP request timeout in seconds (default: `45`). Must exceed the
    /// slowest upstream fetch, fallback candidates included.
    pub request_timeout_secs: u64,
    /// Upstream URL templates.
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `5001`    |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `45`      |
    ///
    /// Upstream overrides are read by [`UpstreamConfig::from_env`].
    ///
    /// Panics when `REQUEST_TIMEOUT_SECS` would cut off an upstream fetch.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "45".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream: UpstreamConfig::from_env(),
        };
        config
            .check_request_timeout()
            .unwrap_or_else(|e| panic!("{e}"));
        config
    }

    /// Smallest `request_timeout_secs` that lets every upstream fetch finish
    /// and report its own timeout.
    pub fn min_request_timeout(&self) -> Duration {
        self.upstream.max_fetch_budget() + TIMEOUT_MARGIN
    }

    /// Reject an outer timeout shorter than [`min_request_timeout`](Self::min_request_timeout).
    pub fn check_request_timeout(&self) -> Result<(), String> {
        let min = self.min_request_timeout();
        if Duration::from_secs(self.request_timeout_secs) < min {
            return Err(format!(
                "REQUEST_TIMEOUT_SECS={} is below the slowest upstream fetch; use at least {}",
                self.request_timeout_secs,
                min.as_secs()
            ));
        }
        Ok(())
    }

    /// Whether CORS should allow any origin.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
