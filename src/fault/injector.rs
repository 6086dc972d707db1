use std::time::Duration;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tokio::time::{Instant, sleep};
use tracing::info;

use crate::case::TestCaseSpec;
use crate::error::ConfigError;
use crate::executor::{CaseExecutor, ExecutionOutcome};

use super::mutate::{OVERSIZED_VALUE, SQL_INJECTION_PAYLOAD, overwrite_parameters, with_format_marker};
use super::score::robustness_score;
use super::types::{FaultType, parse_fault_config};

#[derive(Debug, Clone, Serialize)]
pub struct ToleranceResult {
    pub success: bool,
    #[serde(flatten)]
    pub detail: ToleranceDetail,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToleranceDetail {
    Execution {
        result: Box<ExecutionOutcome>,
    },
    Burst {
        requests: u64,
        errors: u64,
    },
    Format {
        result: Box<ExecutionOutcome>,
        json_response: bool,
    },
}

/// Per-fault results kept in the order the faults ran. Serializes as a map.
#[derive(Debug, Clone, Default)]
pub struct ToleranceResults(Vec<(FaultType, ToleranceResult)>);

impl ToleranceResults {
    /// Appends `result` for `fault`. Fault lists are deduplicated on parse.
    pub fn push(&mut self, fault: FaultType, result: ToleranceResult) {
        self.0.push((fault, result));
    }

    #[must_use]
    pub fn get(&self, fault: FaultType) -> Option<&ToleranceResult> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == fault)
            .map(|(_, result)| result)
    }

    #[must_use]
    pub fn faults(&self) -> Vec<FaultType> {
        self.0.iter().map(|(fault, _)| *fault).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (FaultType, ToleranceResult)> {
        self.0.iter()
    }
}

impl<'results> IntoIterator for &'results ToleranceResults {
    type Item = &'results (FaultType, ToleranceResult);
    type IntoIter = std::slice::Iter<'results, (FaultType, ToleranceResult)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ToleranceResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (fault, result) in &self.0 {
            map.serialize_entry(fault, result)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RobustnessReport {
    pub log: Vec<String>,
    pub tolerance_result: ToleranceResults,
    pub score: f64,
    pub passed: usize,
    pub total: usize,
}

pub struct FaultInjector {
    executor: CaseExecutor,
    rate_limit_window: Duration,
    rate_limit_interval: Duration,
}

impl FaultInjector {
    #[must_use]
    pub const fn new(
        executor: CaseExecutor,
        rate_limit_window: Duration,
        rate_limit_interval: Duration,
    ) -> Self {
        Self {
            executor,
            rate_limit_window,
            rate_limit_interval,
        }
    }

    /// Runs every configured fault against `case` in order and scores the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the fault configuration is unusable; no
    /// request is sent in that case.
    pub async fn run(
        &self,
        case: &TestCaseSpec,
        fault_config: &str,
    ) -> Result<RobustnessReport, ConfigError> {
        let faults = parse_fault_config(fault_config)?;
        let mut log = Vec::with_capacity(faults.len().saturating_add(2));
        let mut tolerance_result = ToleranceResults::default();
        let mut passed: usize = 0;

        for fault in &faults {
            log.push(format!("Testing {}...", fault));
            info!("{}: testing {}", case.label(), fault);
            let result = self.check(*fault, case).await;
            if result.success {
                passed = passed.saturating_add(1);
            }
            info!("{}: {} tolerant={}", case.label(), fault, result.success);
            tolerance_result.push(*fault, result);
        }

        let total = faults.len();
        let score = robustness_score(passed, total, &case.validate);
        log.push(format!(
            "Robustness test completed: {}/{} passed",
            passed, total
        ));
        log.push(format!("Final score: {:.2}", score));

        Ok(RobustnessReport {
            log,
            tolerance_result,
            score,
            passed,
            total,
        })
    }

    async fn check(&self, fault: FaultType, case: &TestCaseSpec) -> ToleranceResult {
        match fault {
            FaultType::ParameterOutOfBounds => {
                let mutated = overwrite_parameters(case, OVERSIZED_VALUE);
                let (success, outcome) = self.executor.execute(&mutated, None).await;
                ToleranceResult {
                    success,
                    detail: ToleranceDetail::Execution {
                        result: Box::new(outcome),
                    },
                }
            }
            FaultType::SqlInjection => {
                let mutated = overwrite_parameters(case, SQL_INJECTION_PAYLOAD);
                let (_, outcome) = self.executor.execute(&mutated, None).await;
                ToleranceResult {
                    success: !leaks_database_error(&outcome),
                    detail: ToleranceDetail::Execution {
                        result: Box::new(outcome),
                    },
                }
            }
            FaultType::RateLimit => self.burst(case).await,
            FaultType::InvalidResponseFormat => {
                let mutated = with_format_marker(case);
                let (_, outcome) = self.executor.execute(&mutated, None).await;
                let answered = outcome.status_code.is_some();
                let json_response = answered && outcome.json_body;
                ToleranceResult {
                    success: answered,
                    detail: ToleranceDetail::Format {
                        result: Box::new(outcome),
                        json_response,
                    },
                }
            }
        }
    }

    /// Repeats the unmodified case for the rate-limit window; tolerant
    /// while at most half of the attempts fail.
    async fn burst(&self, case: &TestCaseSpec) -> ToleranceResult {
        let started = Instant::now();
        let mut requests: u64 = 0;
        let mut errors: u64 = 0;
        while started.elapsed() < self.rate_limit_window {
            let (success, _) = self.executor.execute(case, None).await;
            requests = requests.saturating_add(1);
            if !success {
                errors = errors.saturating_add(1);
            }
            sleep(self.rate_limit_interval).await;
        }
        ToleranceResult {
            success: errors.saturating_mul(2) <= requests,
            detail: ToleranceDetail::Burst { requests, errors },
        }
    }
}

fn leaks_database_error(outcome: &ExecutionOutcome) -> bool {
    outcome.error.as_deref().is_some_and(|error| {
        let lowered = error.to_lowercase();
        lowered.contains("sql") || lowered.contains("database")
    })
}
