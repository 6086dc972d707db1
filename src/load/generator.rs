use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{info, warn};

use crate::executor::CaseExecutor;
use crate::metrics::{HostProbe, LoadAccumulator, LoadMetrics, RequestSample};

use super::ramp::RampSchedule;
use super::source::LoadSource;

/// Shape of one load run.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub concurrency: usize,
    pub duration: Duration,
    pub schedule: RampSchedule,
    /// Pause between submissions in the driver loop.
    pub submit_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct LoadRun {
    pub metrics: LoadMetrics,
    pub log: Vec<String>,
}

pub struct LoadGenerator {
    executor: CaseExecutor,
    client: Client,
    host: Arc<dyn HostProbe>,
}

impl LoadGenerator {
    #[must_use]
    pub fn new(executor: CaseExecutor, client: Client, host: Arc<dyn HostProbe>) -> Self {
        Self {
            executor,
            client,
            host,
        }
    }

    /// Submits tasks until the deadline, then waits for every submitted
    /// task before metrics are finalized. Requests in flight at the
    /// deadline still complete and are counted.
    pub async fn run(&self, source: LoadSource, plan: &LoadPlan) -> LoadRun {
        info!(
            "{} started: concurrency={}, duration={}s",
            source.label(),
            plan.concurrency,
            plan.duration.as_secs()
        );
        let label = source.label();
        let source = Arc::new(source);
        let permits = Arc::new(Semaphore::new(plan.schedule.initial));
        let mut increments = plan.schedule.increments.iter().copied();
        let mut pending_step = increments.next();

        let started = Instant::now();
        let deadline = started.checked_add(plan.duration).unwrap_or(started);
        let mut next_step_at = started.checked_add(plan.schedule.interval).unwrap_or(started);
        let mut tasks = JoinSet::new();
        let mut accumulator = LoadAccumulator::new();

        while Instant::now() < deadline {
            while let Some(step) = pending_step
                && Instant::now() >= next_step_at
            {
                permits.add_permits(step);
                pending_step = increments.next();
                next_step_at = next_step_at
                    .checked_add(plan.schedule.interval)
                    .unwrap_or(next_step_at);
            }

            let permit = tokio::select! {
                () = sleep_until(deadline) => break,
                () = sleep_until(next_step_at), if pending_step.is_some() => continue,
                acquired = Arc::clone(&permits).acquire_owned() => match acquired {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let source = Arc::clone(&source);
            let executor = self.executor.clone();
            let client = self.client.clone();
            tasks.spawn(async move {
                let _permit = permit;
                source.run_once(&executor, &client).await
            });

            while let Some(joined) = tasks.try_join_next() {
                merge(&mut accumulator, joined);
            }
            sleep(plan.submit_interval).await;
        }

        while let Some(joined) = tasks.join_next().await {
            merge(&mut accumulator, joined);
        }
        let elapsed = started.elapsed();

        let server_metrics = self.host.snapshot().await;
        let metrics = accumulator.finalize(
            elapsed,
            plan.concurrency,
            plan.duration.as_secs(),
            server_metrics,
        );
        let log = summary_lines(label, &metrics);
        for line in &log {
            info!("{}", line);
        }
        LoadRun { metrics, log }
    }
}

fn merge(accumulator: &mut LoadAccumulator, joined: Result<RequestSample, JoinError>) {
    match joined {
        Ok(sample) => accumulator.record(sample),
        Err(err) => {
            warn!("Load task ended abnormally: {}", err);
            accumulator.record(RequestSample::failure());
        }
    }
}

fn summary_lines(label: &str, metrics: &LoadMetrics) -> Vec<String> {
    vec![
        format!(
            "{} completed: {} requests in {:.2}s",
            label, metrics.requests, metrics.elapsed
        ),
        format!(
            "TPS: {:.2}, Error rate: {:.2}%",
            metrics.tps, metrics.error_rate
        ),
        format!(
            "Response times: avg={:.2}s, max={:.2}s, min={:.2}s",
            metrics.avg_response_time, metrics.max_response_time, metrics.min_response_time
        ),
    ]
}
