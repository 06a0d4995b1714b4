use crate::decode::DecodeError;

/// Errors from the upstream fetch layer.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the kind's timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The request itself failed (connection, DNS, TLS, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a 4xx/5xx status.
    #[error("upstream returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// The results page explicitly reported the PIN as unknown (404).
    #[error("upstream has no results page at {url}")]
    NotFound { url: String },

    /// A success response whose JSON body could not be decoded.
    #[error("malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: DecodeError,
    },

    /// A success response whose HTML body is too short to be a results page.
    #[error("empty page from {url} ({len} characters)")]
    EmptyPage { url: String, len: usize },

    /// Every candidate URL failed; carries the last failure observed.
    #[error("all {attempts} upstream candidates failed; last error: {last}")]
    Exhausted { attempts: usize, last: Box<FetchError> },

    /// No candidate was attempted at all.
    #[error("unknown upstream failure")]
    Unknown,
}

impl FetchError {
    /// The underlying failure, looking through [`FetchError::Exhausted`].
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Exhausted { last, .. } => last.root(),
            other => other,
        }
    }

    /// Whether a JSON candidate failing this way should fall through to the
    /// next candidate rather than abort the fetch.
    pub fn falls_back(&self) -> bool {
        matches!(self, FetchError::Http { .. } | FetchError::Malformed { .. })
    }

    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}
