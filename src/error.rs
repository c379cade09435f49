use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not an absolute URL \"{input}\": {reason}")]
    Malformed { input: String, reason: String },

    #[error("unsupported scheme \"{scheme}\" in {input} (expected http or https)")]
    UnsupportedScheme { input: String, scheme: String },

    #[error("unsupported host \"{host}\" in {input} (not an Amazon marketplace)")]
    UnsupportedHost { input: String, host: String },

    #[error("no product identifier (/dp/<ASIN> or /gp/product/<ASIN>) in {input}")]
    MissingProductId { input: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize session summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move export into place at {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Compact classification of a failed attempt, stored on `RunResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    HttpStatus(u16),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::HttpStatus(status) => write!(f, "HTTP {}", status),
        }
    }
}

impl From<&ValidationError> for ErrorKind {
    fn from(_: &ValidationError) -> Self {
        ErrorKind::Validation
    }
}

impl From<&FetchError> for ErrorKind {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Network { .. } => ErrorKind::Network,
            FetchError::HttpStatus { status, .. } => ErrorKind::HttpStatus(*status),
        }
    }
}
