use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{ExecutionRecord, ExecutionRecorder};
use crate::error::{AppError, AppResult, PersistError};

#[derive(Serialize)]
struct StoredRecord<'rec> {
    id: u64,
    #[serde(flatten)]
    record: &'rec ExecutionRecord,
}

struct JsonlState {
    file: File,
    next_id: u64,
}

/// Appends one JSON object per execution. Ids continue from the number of
/// lines already in the file.
pub struct JsonlRecorder {
    path: PathBuf,
    state: Mutex<JsonlState>,
}

impl JsonlRecorder {
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or opened for append.
    pub async fn open(path: &Path) -> AppResult<Self> {
        let open_error = |err: std::io::Error| {
            AppError::persist(PersistError::OpenRecords {
                path: path.to_path_buf(),
                source: err,
            })
        };
        let existing = match tokio::fs::read_to_string(path).await {
            Ok(content) => content.lines().filter(|line| !line.trim().is_empty()).count(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => return Err(open_error(err)),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(open_error)?;
        let next_id = u64::try_from(existing).unwrap_or(u64::MAX).saturating_add(1);
        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(JsonlState { file, next_id }),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExecutionRecorder for JsonlRecorder {
    async fn record(&self, record: ExecutionRecord) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        let mut line = serde_json::to_vec(&StoredRecord {
            id,
            record: &record,
        })
        .map_err(|err| AppError::persist(PersistError::SerializeRecord { source: err }))?;
        line.push(b'\n');

        let write_error = |err: std::io::Error| AppError::persist(PersistError::WriteRecord { source: err });
        state.file.write_all(&line).await.map_err(write_error)?;
        state.file.flush().await.map_err(write_error)?;
        state.next_id = id.saturating_add(1);
        debug!("Recorded execution {} to {}", id, self.path.display());
        Ok(id)
    }
}

/// Discards records but still hands out increasing ids.
#[derive(Debug, Default)]
pub struct NoopRecorder {
    last_id: AtomicU64,
}

impl NoopRecorder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl ExecutionRecorder for NoopRecorder {
    async fn record(&self, _record: ExecutionRecord) -> AppResult<u64> {
        Ok(self.last_id.fetch_add(1, Ordering::SeqCst).saturating_add(1))
    }
}
