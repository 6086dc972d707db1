use std::time::Duration;

use super::{HostSnapshot, LatencyHistogram, LoadAccumulator, RequestSample};

fn sample(success: bool, response_time: f64) -> RequestSample {
    RequestSample {
        success,
        response_time,
    }
}

#[test]
fn finalize_derives_rates_and_extremes() -> Result<(), String> {
    let mut accumulator = LoadAccumulator::new();
    accumulator.record(sample(true, 0.2));
    accumulator.record(sample(true, 0.4));
    accumulator.record(sample(false, 9.0));
    accumulator.record(RequestSample::failure());

    let host = HostSnapshot {
        cpu_percent: 12.5,
        memory_percent: 40.0,
        disk_percent: 70.0,
    };
    let metrics = accumulator.finalize(Duration::from_secs(2), 5, 2, host);

    if metrics.requests != 4 || metrics.successes != 2 || metrics.failures != 2 {
        return Err(format!("Unexpected counts: {:?}", metrics));
    }
    if (metrics.tps - 2.0).abs() > 1e-9 || (metrics.qps - metrics.tps).abs() > 1e-12 {
        return Err(format!("Unexpected tps: {}", metrics.tps));
    }
    if (metrics.error_rate - 50.0).abs() > 1e-9 {
        return Err(format!("Unexpected error rate: {}", metrics.error_rate));
    }
    if (metrics.avg_response_time - 0.3).abs() > 1e-9
        || (metrics.max_response_time - 0.4).abs() > 1e-9
        || (metrics.min_response_time - 0.2).abs() > 1e-9
    {
        return Err(format!("Unexpected latency summary: {:?}", metrics));
    }
    if metrics.response_times.len() != 2 || metrics.server_metrics != host {
        return Err("Failed samples must not contribute latency".to_owned());
    }
    if metrics.p99_response_time < metrics.p50_response_time || metrics.p50_response_time <= 0.0 {
        return Err(format!("Unexpected percentiles: {:?}", metrics));
    }
    Ok(())
}

#[test]
fn empty_run_reports_zeros() -> Result<(), String> {
    let metrics = LoadAccumulator::new().finalize(
        Duration::from_secs(1),
        1,
        1,
        HostSnapshot::default(),
    );
    if metrics.requests != 0
        || metrics.error_rate != 0.0
        || metrics.min_response_time != 0.0
        || metrics.max_response_time != 0.0
        || metrics.avg_response_time != 0.0
    {
        return Err(format!("Unexpected metrics: {:?}", metrics));
    }
    Ok(())
}

#[test]
fn all_failures_keep_zero_latency() -> Result<(), String> {
    let mut accumulator = LoadAccumulator::new();
    for _ in 0..3 {
        accumulator.record(RequestSample::failure());
    }
    let metrics = accumulator.finalize(Duration::from_millis(500), 2, 1, HostSnapshot::default());
    if (metrics.error_rate - 100.0).abs() > 1e-9 || metrics.min_response_time != 0.0 {
        return Err(format!("Unexpected metrics: {:?}", metrics));
    }
    Ok(())
}

#[test]
fn histogram_percentiles_are_in_seconds() -> Result<(), String> {
    let mut histogram = LatencyHistogram::new()?;
    for _ in 0..100 {
        histogram.record_secs(0.05)?;
    }
    let (p50, p90, p99) = histogram.percentiles_secs();
    for value in [p50, p90, p99] {
        if (value - 0.05).abs() > 0.001 {
            return Err(format!("Unexpected percentile: {}", value));
        }
    }
    Ok(())
}
