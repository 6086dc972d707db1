use std::time::Duration;

use reqwest::Client;
use tokio::time::Instant;
use tracing::warn;

use crate::args::HttpMethod;
use crate::case::TestCaseSpec;
use crate::executor::CaseExecutor;
use crate::http::{RequestBody, RequestPlan, send_for_status};
use crate::metrics::RequestSample;

/// An ad-hoc target outside the case store.
#[derive(Debug, Clone)]
pub struct CustomTarget {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl CustomTarget {
    #[must_use]
    pub fn request_plan(&self) -> RequestPlan {
        RequestPlan {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: RequestBody::from_text(self.body.as_deref()),
            timeout: self.timeout,
        }
    }
}

/// What each load task sends.
#[derive(Debug, Clone)]
pub enum LoadSource {
    /// Full case execution including assertions.
    Case(Box<TestCaseSpec>),
    /// Raw request; success is a status in `[200, 400)`.
    Custom(RequestPlan),
}

impl LoadSource {
    #[must_use]
    pub fn custom(target: &CustomTarget) -> Self {
        LoadSource::Custom(target.request_plan())
    }

    pub(super) const fn label(&self) -> &'static str {
        match self {
            LoadSource::Case(_) => "Performance test",
            LoadSource::Custom(_) => "Custom performance test",
        }
    }

    pub(super) async fn run_once(&self, executor: &CaseExecutor, client: &Client) -> RequestSample {
        match self {
            LoadSource::Case(case) => {
                let (success, outcome) = executor.execute(case, None).await;
                RequestSample {
                    success,
                    response_time: outcome.response_time,
                }
            }
            LoadSource::Custom(plan) => {
                let request = match plan.build(client) {
                    Ok(request) => request,
                    Err(err) => {
                        warn!("Custom target request could not be built: {}", err);
                        return RequestSample::failure();
                    }
                };
                let started = Instant::now();
                match send_for_status(client, request, plan.timeout).await {
                    Ok(status) if (200..400).contains(&status) => RequestSample {
                        success: true,
                        response_time: started.elapsed().as_secs_f64(),
                    },
                    Ok(_) | Err(_) => RequestSample::failure(),
                }
            }
        }
    }
}
