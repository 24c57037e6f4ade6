use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the ingestion pipeline.
///
/// Every variant is fatal for a run: the pipeline aborts and writes nothing.
/// Non-numeric cells, degenerate columns and missing indicators are not
/// errors; they become missing values instead.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Neither recognized table shape matched.
    #[error("unrecognized table layout in {file} | columns: {columns:?}")]
    SchemaMismatch { file: String, columns: Vec<String> },

    #[error("invalid sources file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output for {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, IndexError>;
