//! Single-case execution: hooks, substitution, request, timing, assertions.
mod hooks;
mod outcome;


use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::assertion::evaluate;
use crate::case::TestCaseSpec;
use crate::http::{RequestBody, RequestPlan, header_pairs, send};
use crate::template::{render_template, substitute};

pub use outcome::ExecutionOutcome;

/// Runs one case end to end. Never fails: transport errors and assertion
/// mismatches come back as an unsuccessful outcome.
#[derive(Debug, Clone)]
pub struct CaseExecutor {
    client: Client,
    default_timeout: Duration,
}

impl CaseExecutor {
    #[must_use]
    pub const fn new(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    /// Per-case `timeout` seconds win over the configured default.
    #[must_use]
    pub fn timeout_for(&self, case: &TestCaseSpec) -> Duration {
        case.timeout
            .filter(|secs| *secs > 0)
            .map_or(self.default_timeout, Duration::from_secs)
    }

    pub async fn execute(
        &self,
        case: &TestCaseSpec,
        parameters: Option<&Value>,
    ) -> (bool, ExecutionOutcome) {
        let mut log = Vec::new();
        hooks::run_setup(case, &mut log);
        let mut outcome = self.send_and_check(case, parameters, &mut log).await;
        hooks::run_teardown(case, &mut log);
        outcome.log = log;
        (outcome.success, outcome)
    }

    async fn send_and_check(
        &self,
        case: &TestCaseSpec,
        parameters: Option<&Value>,
        log: &mut Vec<String>,
    ) -> ExecutionOutcome {
        let plan = self.plan_request(case, parameters, log);
        log.push(format!("Sending {} request to {}", plan.method, plan.url));
        debug!("{}: {} {}", case.label(), plan.method, plan.url);

        let started = Instant::now();
        let result = send(&self.client, &plan).await;
        let response_time = started.elapsed().as_secs_f64();

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let message = err.to_string();
                warn!("{} failed: {}", case.label(), message);
                log.push(format!("Test failed: {}", message));
                return ExecutionOutcome::failed(Value::Null, message, response_time, None);
            }
        };

        let status = response.status();
        let json_body = response.json;
        if !case.validate.is_empty() {
            let verdict = evaluate(&response.body, &response.view, case.validate.directives());
            if !verdict.success {
                debug!("{} assertion failed: {}", case.label(), verdict.message);
                log.push(format!("Assertion failed: {}", verdict.message));
                let mut outcome = ExecutionOutcome::failed(
                    response.body,
                    verdict.message,
                    response_time,
                    Some(status),
                );
                outcome.json_body = json_body;
                return outcome;
            }
        }

        log.push(format!("Test passed! Response time: {:.2}s", response_time));
        ExecutionOutcome::passed(response.body, response_time, status, json_body)
    }

    fn plan_request(
        &self,
        case: &TestCaseSpec,
        parameters: Option<&Value>,
        log: &mut Vec<String>,
    ) -> RequestPlan {
        let mut url = case.url.clone();
        let mut body = case.body.clone();
        let mut headers = case.headers.clone();
        match parameters {
            Some(Value::Object(params)) => {
                url = render_template(&url, params);
                body = body.map(|text| render_template(&text, params));
                substitute_headers(&mut headers, params);
            }
            Some(other @ (Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_))) => {
                let message = format!("parameters must be a JSON object, got {}", other);
                warn!("{}: {}", case.label(), message);
                log.push(format!("Parameter parsing error: {}", message));
            }
            None => {}
        }

        RequestPlan {
            method: case.method,
            url,
            headers: header_pairs(&headers),
            body: RequestBody::from_text(body.as_deref()),
            timeout: self.timeout_for(case),
        }
    }
}

fn substitute_headers(headers: &mut Map<String, Value>, params: &Map<String, Value>) {
    for value in headers.values_mut() {
        substitute(value, params);
    }
}
