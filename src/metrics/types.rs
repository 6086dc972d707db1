use serde::Serialize;

/// Host resource usage sampled once after a load run drains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

/// Finalized load-run metrics. Only produced after every request task returned.
#[derive(Debug, Clone, Serialize)]
pub struct LoadMetrics {
    pub concurrency: usize,
    /// Requested run duration in seconds.
    pub duration: u64,
    /// Wall-clock seconds from first submission to the end of the drain.
    pub elapsed: f64,
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    /// Latencies of successful requests, in completion order.
    pub response_times: Vec<f64>,
    pub tps: f64,
    pub qps: f64,
    pub error_rate: f64,
    pub avg_response_time: f64,
    pub max_response_time: f64,
    pub min_response_time: f64,
    pub p50_response_time: f64,
    pub p90_response_time: f64,
    pub p99_response_time: f64,
    pub server_metrics: HostSnapshot,
}
