use std::time::Duration;

use tracing::warn;

use super::histogram::LatencyHistogram;
use super::types::{HostSnapshot, LoadMetrics};

/// Outcome of one request task as seen by the load generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestSample {
    pub success: bool,
    /// Seconds; only successful samples contribute latency.
    pub response_time: f64,
}

impl RequestSample {
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            success: false,
            response_time: 0.0,
        }
    }
}

/// Owned by the driver loop; task results are merged into it as they are
/// joined, so it has a single writer.
#[derive(Debug)]
pub struct LoadAccumulator {
    requests: u64,
    successes: u64,
    failures: u64,
    response_times: Vec<f64>,
    max_response_time: f64,
    min_response_time: f64,
    histogram: Option<LatencyHistogram>,
}

impl Default for LoadAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadAccumulator {
    #[must_use]
    pub fn new() -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Percentiles disabled: {}", err);
                None
            }
        };
        Self {
            requests: 0,
            successes: 0,
            failures: 0,
            response_times: Vec::new(),
            max_response_time: 0.0,
            min_response_time: f64::INFINITY,
            histogram,
        }
    }

    pub fn record(&mut self, sample: RequestSample) {
        self.requests = self.requests.saturating_add(1);
        if !sample.success {
            self.failures = self.failures.saturating_add(1);
            return;
        }
        self.successes = self.successes.saturating_add(1);
        self.response_times.push(sample.response_time);
        self.max_response_time = self.max_response_time.max(sample.response_time);
        self.min_response_time = self.min_response_time.min(sample.response_time);
        if let Some(histogram) = self.histogram.as_mut()
            && let Err(err) = histogram.record_secs(sample.response_time)
        {
            warn!("{}", err);
        }
    }

    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    /// Consumes the accumulator into final metrics.
    #[must_use]
    pub fn finalize(
        self,
        elapsed: Duration,
        concurrency: usize,
        duration_secs: u64,
        server_metrics: HostSnapshot,
    ) -> LoadMetrics {
        let elapsed_secs = elapsed.as_secs_f64();
        let tps = if elapsed_secs > 0.0 {
            self.requests as f64 / elapsed_secs
        } else {
            0.0
        };
        let error_rate = if self.requests > 0 {
            self.failures as f64 / self.requests as f64 * 100.0
        } else {
            0.0
        };
        let (avg, max, min) = if self.response_times.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let total: f64 = self.response_times.iter().sum();
            (
                total / self.response_times.len() as f64,
                self.max_response_time,
                self.min_response_time,
            )
        };
        let (p50, p90, p99) = self
            .histogram
            .as_ref()
            .map_or((0.0, 0.0, 0.0), LatencyHistogram::percentiles_secs);

        LoadMetrics {
            concurrency,
            duration: duration_secs,
            elapsed: elapsed_secs,
            requests: self.requests,
            successes: self.successes,
            failures: self.failures,
            response_times: self.response_times,
            tps,
            qps: tps,
            error_rate,
            avg_response_time: avg,
            max_response_time: max,
            min_response_time: min,
            p50_response_time: p50,
            p90_response_time: p90,
            p99_response_time: p99,
            server_metrics,
        }
    }
}
