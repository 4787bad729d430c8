use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the harvest library.
///
/// Fetch-side variants (`Http`, `Status`, `Io` on a page read) are recoverable:
/// builders turn them into "no data from this source". Output-side failures are
/// fatal and propagate to the caller.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("request for {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("required script fragment missing: {}", path.display())]
    MissingFragment { path: PathBuf },
}

impl HarvestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarvestError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
