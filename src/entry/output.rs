use serde::Serialize;

use caseforge::application::{CaseRunSummary, CustomLoadRun, PerformanceRun, RobustnessRun};
use caseforge::args::OutputFormat;
use caseforge::error::AppResult;
use caseforge::metrics::LoadMetrics;

pub(super) fn emit<T>(
    format: OutputFormat,
    payload: &T,
    lines: fn(&T) -> Vec<String>,
) -> AppResult<()>
where
    T: Serialize,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(payload)?),
        OutputFormat::Text => {
            for line in lines(payload) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub(super) fn run_lines(summary: &CaseRunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &summary.results {
        let verdict = if entry.success { "PASS" } else { "FAIL" };
        let mut parts = vec![format!("Case {}: {}", entry.case_id, verdict)];
        if let Some(result) = entry.result.as_ref() {
            parts.push(format!("({:.2}s)", result.response_time));
        }
        if let Some(error) = entry.error.as_ref() {
            parts.push(format!("- {}", error));
        }
        if let Some(execution_id) = entry.execution_id {
            parts.push(format!("[execution {}]", execution_id));
        }
        lines.push(parts.join(" "));
        if let Some(result) = entry.result.as_ref() {
            lines.extend(result.log.iter().map(|line| format!("  {}", line)));
        }
    }
    lines.push(format!(
        "Total: {}, passed: {}, failed: {}",
        summary.total, summary.success_count, summary.failed_count
    ));
    lines
}

pub(super) fn performance_lines(run: &PerformanceRun) -> Vec<String> {
    let mut lines = vec![format!("Execution {}: {}", run.execution_id, run.status)];
    lines.extend(metrics_lines(&run.metrics));
    lines
}

pub(super) fn custom_lines(run: &CustomLoadRun) -> Vec<String> {
    metrics_lines(&run.metrics)
}

pub(super) fn robustness_lines(run: &RobustnessRun) -> Vec<String> {
    let mut lines = vec![
        format!("Execution {}: {}", run.execution_id, run.status),
        format!("Score: {:.2}", run.score),
    ];
    for (fault, result) in &run.tolerance_result {
        let verdict = if result.success {
            "tolerant"
        } else {
            "not tolerant"
        };
        lines.push(format!("  {}: {}", fault, verdict));
    }
    lines
}

fn metrics_lines(metrics: &LoadMetrics) -> Vec<String> {
    vec![
        format!(
            "Concurrency: {}, duration: {}s, elapsed: {:.2}s",
            metrics.concurrency, metrics.duration, metrics.elapsed
        ),
        format!(
            "Requests: {} (successful {}, failed {})",
            metrics.requests, metrics.successes, metrics.failures
        ),
        format!(
            "TPS: {:.2}, error rate: {:.2}%",
            metrics.tps, metrics.error_rate
        ),
        format!(
            "Response times: avg={:.3}s, min={:.3}s, max={:.3}s",
            metrics.avg_response_time, metrics.min_response_time, metrics.max_response_time
        ),
        format!(
            "Percentiles: p50={:.3}s, p90={:.3}s, p99={:.3}s",
            metrics.p50_response_time, metrics.p90_response_time, metrics.p99_response_time
        ),
        format!(
            "Host: cpu={:.1}%, memory={:.1}%, disk={:.1}%",
            metrics.server_metrics.cpu_percent,
            metrics.server_metrics.memory_percent,
            metrics.server_metrics.disk_percent
        ),
    ]
}
