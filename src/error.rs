use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("No data directory available (set --data-dir or TALLYBOOK_DATA_DIR)")]
    NoDataDir,

    #[error("Failed to read input: {0}")]
    Input(std::io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Failures of the durable key-value layer.
///
/// Read-side variants are recovered by `PersistedStore::load`; write-side
/// variants reach the caller.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to encode tracker state: {0}")]
    Encode(serde_json::Error),

    #[error("Malformed tracker state: {0}")]
    Decode(serde_json::Error),

    #[error("Malformed tracker state: {what} is not a JSON object")]
    NotAnObject { what: &'static str },

    #[error("Inconsistent tracker state: counter is {counter} but log holds {entries} entries")]
    Inconsistent { counter: u64, entries: usize },

    #[cfg(test)]
    #[error("Storage rejected write for key {key}")]
    Rejected { key: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
