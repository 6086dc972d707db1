use serde::Serialize;
use serde_json::Value;

/// Result of one case execution, created once and never mutated by callers.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub log: Vec<String>,
    pub response: Value,
    pub error: Option<String>,
    /// Seconds from send to full body read.
    pub response_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip)]
    pub json_body: bool,
}

impl ExecutionOutcome {
    pub(super) const fn passed(
        response: Value,
        response_time: f64,
        status_code: u16,
        json_body: bool,
    ) -> Self {
        Self {
            success: true,
            log: Vec::new(),
            response,
            error: None,
            response_time,
            status_code: Some(status_code),
            json_body,
        }
    }

    pub(super) const fn failed(
        response: Value,
        error: String,
        response_time: f64,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            success: false,
            log: Vec::new(),
            response,
            error: Some(error),
            response_time,
            status_code,
            json_body: false,
        }
    }
}
