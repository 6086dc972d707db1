use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::fault::ToleranceResults;
use crate::metrics::LoadMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionKind {
    Functional,
    Performance,
    Robustness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failed,
}

impl ExecutionStatus {
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failed
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Success => f.write_str("success"),
            ExecutionStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Mode-specific payload of a record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordDetail {
    Functional {
        response: Value,
        error: Option<String>,
        response_time: f64,
    },
    Performance {
        concurrency: usize,
        duration: u64,
        ramp_up_config: Option<String>,
        metrics: Box<LoadMetrics>,
    },
    Robustness {
        fault_injection_config: String,
        tolerance_result: ToleranceResults,
        score: f64,
    },
}

/// One persisted execution; ids are assigned by the recorder.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub case_id: u64,
    pub kind: ExecutionKind,
    pub status: ExecutionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub log: Vec<String>,
    #[serde(flatten)]
    pub detail: RecordDetail,
}
