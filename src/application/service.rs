use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::case::TestCaseSpec;
use crate::config::EngineSettings;
use crate::error::{AppError, AppResult, CaseError, ValidationError};
use crate::executor::{CaseExecutor, ExecutionOutcome};
use crate::fault::{FaultInjector, ToleranceResults};
use crate::http::build_client;
use crate::load::{CustomTarget, LoadGenerator, LoadPlan, LoadSource, RampSchedule};
use crate::metrics::{HostProbe, LoadMetrics};

use super::ports::{CaseRepository, ExecutionRecorder};
use super::records::{ExecutionKind, ExecutionRecord, ExecutionStatus, RecordDetail};

/// Bounds applied to load runs.
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_concurrency: usize,
    /// Seconds.
    pub max_duration: u64,
    pub submit_interval: Duration,
}

impl RunLimits {
    #[must_use]
    pub const fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            max_duration: settings.max_duration_secs(),
            submit_interval: settings.submit_interval,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseRunEntry {
    pub case_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ExecutionOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseRunSummary {
    pub results: Vec<CaseRunEntry>,
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
}

impl CaseRunSummary {
    fn from_entries(results: Vec<CaseRunEntry>) -> Self {
        let success_count = results.iter().filter(|entry| entry.success).count();
        let total = results.len();
        Self {
            results,
            total,
            success_count,
            failed_count: total.saturating_sub(success_count),
        }
    }

    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed_count == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRun {
    pub execution_id: u64,
    pub status: ExecutionStatus,
    pub metrics: LoadMetrics,
    pub log: Vec<String>,
}

/// Ad-hoc load request; concurrency and duration are clamped, not rejected.
#[derive(Debug, Clone)]
pub struct CustomLoadRequest {
    pub target: CustomTarget,
    pub concurrency: usize,
    /// Seconds.
    pub duration: u64,
    pub ramp_up: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomLoadRun {
    pub metrics: LoadMetrics,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RobustnessRun {
    pub execution_id: u64,
    pub status: ExecutionStatus,
    pub score: f64,
    pub tolerance_result: ToleranceResults,
    pub log: Vec<String>,
}

/// Entry point for the three run modes. Collaborators are injected.
pub struct TestService {
    cases: Arc<dyn CaseRepository>,
    recorder: Arc<dyn ExecutionRecorder>,
    executor: CaseExecutor,
    load: LoadGenerator,
    faults: FaultInjector,
    limits: RunLimits,
}

impl TestService {
    #[must_use]
    pub fn new(
        cases: Arc<dyn CaseRepository>,
        recorder: Arc<dyn ExecutionRecorder>,
        executor: CaseExecutor,
        load: LoadGenerator,
        faults: FaultInjector,
        limits: RunLimits,
    ) -> Self {
        Self {
            cases,
            recorder,
            executor,
            load,
            faults,
            limits,
        }
    }

    /// Wires the engine from resolved settings around one shared client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_settings(
        settings: &EngineSettings,
        cases: Arc<dyn CaseRepository>,
        recorder: Arc<dyn ExecutionRecorder>,
        host: Arc<dyn HostProbe>,
    ) -> AppResult<Self> {
        let client = build_client(&settings.user_agent)?;
        let executor = CaseExecutor::new(client.clone(), settings.request_timeout);
        let load = LoadGenerator::new(executor.clone(), client, host);
        let faults = FaultInjector::new(
            executor.clone(),
            settings.rate_limit_window,
            settings.rate_limit_interval,
        );
        Ok(Self::new(
            cases,
            recorder,
            executor,
            load,
            faults,
            RunLimits::from_settings(settings),
        ))
    }

    /// Runs each case once, in order. Missing cases become failed entries.
    ///
    /// # Errors
    ///
    /// Returns an error when case lookup or record persistence fails.
    pub async fn run_cases(
        &self,
        case_ids: &[u64],
        parameters: Option<&Value>,
    ) -> AppResult<CaseRunSummary> {
        let mut results = Vec::with_capacity(case_ids.len());
        for &case_id in case_ids {
            let Some(case) = self.cases.get_case(case_id).await? else {
                warn!("Case {} not found", case_id);
                results.push(CaseRunEntry {
                    case_id,
                    execution_id: None,
                    status: None,
                    success: false,
                    error: Some(CaseError::NotFound { id: case_id }.to_string()),
                    result: None,
                });
                continue;
            };

            let start_time = Utc::now();
            let (success, outcome) = self.executor.execute(&case, parameters).await;
            let status = ExecutionStatus::from_success(success);
            info!("{} finished: {}", case.label(), status);

            let execution_id = self
                .recorder
                .record(ExecutionRecord {
                    case_id,
                    kind: ExecutionKind::Functional,
                    status,
                    start_time,
                    end_time: Utc::now(),
                    log: outcome.log.clone(),
                    detail: RecordDetail::Functional {
                        response: outcome.response.clone(),
                        error: outcome.error.clone(),
                        response_time: outcome.response_time,
                    },
                })
                .await?;

            results.push(CaseRunEntry {
                case_id,
                execution_id: Some(execution_id),
                status: Some(status),
                success,
                error: outcome.error.clone(),
                result: Some(outcome),
            });
        }
        Ok(CaseRunSummary::from_entries(results))
    }

    /// Load-tests a stored case.
    ///
    /// # Errors
    ///
    /// Returns an error when concurrency or duration fall outside the
    /// configured limits, the case is missing, or the record cannot be saved.
    pub async fn run_performance(
        &self,
        case_id: u64,
        concurrency: usize,
        duration: u64,
        ramp_up: Option<&str>,
    ) -> AppResult<PerformanceRun> {
        if concurrency == 0 || concurrency > self.limits.max_concurrency {
            return Err(AppError::validation(
                ValidationError::ConcurrencyOutOfRange {
                    value: concurrency,
                    max: self.limits.max_concurrency,
                },
            ));
        }
        if duration == 0 || duration > self.limits.max_duration {
            return Err(AppError::validation(ValidationError::DurationOutOfRange {
                value: duration,
                max: self.limits.max_duration,
            }));
        }
        let case = self.require_case(case_id).await?;

        let start_time = Utc::now();
        let plan = self.plan(concurrency, duration, ramp_up);
        let run = self.load.run(LoadSource::Case(Box::new(case)), &plan).await;
        let status = ExecutionStatus::from_success(run.metrics.requests > 0);

        let execution_id = self
            .recorder
            .record(ExecutionRecord {
                case_id,
                kind: ExecutionKind::Performance,
                status,
                start_time,
                end_time: Utc::now(),
                log: run.log.clone(),
                detail: RecordDetail::Performance {
                    concurrency,
                    duration,
                    ramp_up_config: ramp_up.map(str::to_owned),
                    metrics: Box::new(run.metrics.clone()),
                },
            })
            .await?;

        Ok(PerformanceRun {
            execution_id,
            status,
            metrics: run.metrics,
            log: run.log,
        })
    }

    /// Load-tests an ad-hoc target. Nothing is recorded.
    pub async fn run_performance_custom(&self, request: CustomLoadRequest) -> CustomLoadRun {
        let concurrency = request
            .concurrency
            .clamp(1, self.limits.max_concurrency.max(1));
        let duration = request.duration.clamp(1, self.limits.max_duration.max(1));
        if concurrency != request.concurrency || duration != request.duration {
            info!(
                "Custom load clamped to concurrency={}, duration={}s",
                concurrency, duration
            );
        }

        let plan = self.plan(concurrency, duration, request.ramp_up.as_deref());
        let run = self
            .load
            .run(LoadSource::custom(&request.target), &plan)
            .await;
        CustomLoadRun {
            metrics: run.metrics,
            log: run.log,
        }
    }

    /// Runs the configured faults against a stored case.
    ///
    /// # Errors
    ///
    /// Returns an error when the case is missing, the fault config is
    /// unusable (recorded as a failed execution first), or the record
    /// cannot be saved.
    pub async fn run_robustness(&self, case_id: u64, fault_config: &str) -> AppResult<RobustnessRun> {
        let case = self.require_case(case_id).await?;
        let start_time = Utc::now();

        let report = match self.faults.run(&case, fault_config).await {
            Ok(report) => report,
            Err(err) => {
                let message = format!("Config parsing error: {}", err);
                warn!("{}: {}", case.label(), message);
                self.recorder
                    .record(ExecutionRecord {
                        case_id,
                        kind: ExecutionKind::Robustness,
                        status: ExecutionStatus::Failed,
                        start_time,
                        end_time: Utc::now(),
                        log: vec![message],
                        detail: RecordDetail::Robustness {
                            fault_injection_config: fault_config.to_owned(),
                            tolerance_result: ToleranceResults::default(),
                            score: 0.0,
                        },
                    })
                    .await?;
                return Err(AppError::config(err));
            }
        };

        let status = ExecutionStatus::Success;
        let execution_id = self
            .recorder
            .record(ExecutionRecord {
                case_id,
                kind: ExecutionKind::Robustness,
                status,
                start_time,
                end_time: Utc::now(),
                log: report.log.clone(),
                detail: RecordDetail::Robustness {
                    fault_injection_config: fault_config.to_owned(),
                    tolerance_result: report.tolerance_result.clone(),
                    score: report.score,
                },
            })
            .await?;

        Ok(RobustnessRun {
            execution_id,
            status,
            score: report.score,
            tolerance_result: report.tolerance_result,
            log: report.log,
        })
    }

    async fn require_case(&self, case_id: u64) -> AppResult<TestCaseSpec> {
        self.cases
            .get_case(case_id)
            .await?
            .ok_or_else(|| AppError::case(CaseError::NotFound { id: case_id }))
    }

    fn plan(&self, concurrency: usize, duration: u64, ramp_up: Option<&str>) -> LoadPlan {
        LoadPlan {
            concurrency,
            duration: Duration::from_secs(duration),
            schedule: RampSchedule::resolve(ramp_up, concurrency),
            submit_interval: self.limits.submit_interval,
        }
    }
}
