use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// No `wind_farm_info` row for the wfid.
    #[error("no wind farm found for wfid '{wfid}', check the input id")]
    FarmNotFound { wfid: String },

    /// Reading or decoding a table failed.
    #[error("Get {key} data from {table} failed: {source}")]
    Table {
        table: &'static str,
        key: String,
        #[source]
        source: csv::Error,
    },

    #[error("data directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },
}

impl SourceError {
    pub(crate) fn table(table: &'static str, key: impl Into<String>, source: csv::Error) -> Self {
        Self::Table {
            table,
            key: key.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
