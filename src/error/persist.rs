use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to open record file '{path}': {source}")]
    OpenRecords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize execution record: {source}")]
    SerializeRecord {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write execution record: {source}")]
    WriteRecord {
        #[source]
        source: std::io::Error,
    },
}
