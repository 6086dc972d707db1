//! Orchestration over the engine: case lookup, execution records, and the
//! three run modes.
mod ports;
mod records;
mod service;


pub use ports::{CaseRepository, ExecutionRecorder};
pub use records::{ExecutionKind, ExecutionRecord, ExecutionStatus, RecordDetail};
pub use service::{
    CaseRunEntry, CaseRunSummary, CustomLoadRequest, CustomLoadRun, PerformanceRun,
    RobustnessRun, RunLimits, TestService,
};
