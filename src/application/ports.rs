use async_trait::async_trait;

use crate::case::TestCaseSpec;
use crate::error::AppResult;

use super::records::ExecutionRecord;

/// Read-only case lookup.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn get_case(&self, id: u64) -> AppResult<Option<TestCaseSpec>>;
}

/// Persists one execution and hands back its id.
#[async_trait]
pub trait ExecutionRecorder: Send + Sync {
    async fn record(&self, record: ExecutionRecord) -> AppResult<u64>;
}
