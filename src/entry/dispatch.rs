use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use caseforge::adapters::{
    FileCaseRepository, InMemoryCaseRepository, JsonlRecorder, NoopRecorder,
};
use caseforge::application::{CaseRepository, CustomLoadRequest, ExecutionRecorder, TestService};
use caseforge::args::{CaseSelection, Command};
use caseforge::config::EngineSettings;
use caseforge::error::{AppError, AppResult, ValidationError};
use caseforge::load::CustomTarget;
use caseforge::metrics::SysinfoProbe;

use super::output;

pub(super) async fn execute(command: Command, settings: &EngineSettings) -> AppResult<()> {
    let recorder = open_recorder(settings).await?;
    let passed = match command {
        Command::Run(args) => {
            let parameters = parse_parameters(args.params.as_deref())?;
            let cases = case_repository(&args.selection, settings)?;
            let service = build_service(settings, cases, recorder)?;
            let summary = service.run_cases(&args.ids, parameters.as_ref()).await?;
            output::emit(settings.output, &summary, output::run_lines)?;
            summary.all_passed()
        }
        Command::Perf(args) => {
            let cases = case_repository(&args.selection, settings)?;
            let service = build_service(settings, cases, recorder)?;
            let run = service
                .run_performance(
                    args.id,
                    args.concurrency,
                    args.duration,
                    args.ramp_up.as_deref(),
                )
                .await?;
            output::emit(settings.output, &run, output::performance_lines)?;
            run.status.is_success()
        }
        Command::PerfCustom(args) => {
            let cases = Arc::new(InMemoryCaseRepository::default());
            let service = build_service(settings, cases, recorder)?;
            let timeout = args
                .timeout
                .filter(|secs| *secs > 0)
                .map_or(settings.request_timeout, Duration::from_secs);
            let run = service
                .run_performance_custom(CustomLoadRequest {
                    target: CustomTarget {
                        url: args.url,
                        method: args.method,
                        headers: args.headers,
                        body: args.data,
                        timeout,
                    },
                    concurrency: args.concurrency,
                    duration: args.duration,
                    ramp_up: args.ramp_up,
                })
                .await;
            output::emit(settings.output, &run, output::custom_lines)?;
            run.metrics.requests > 0
        }
        Command::Robustness(args) => {
            let cases = case_repository(&args.selection, settings)?;
            let service = build_service(settings, cases, recorder)?;
            let run = service.run_robustness(args.id, &args.faults).await?;
            output::emit(settings.output, &run, output::robustness_lines)?;
            run.status.is_success()
        }
    };

    if passed {
        Ok(())
    } else {
        Err(AppError::validation(ValidationError::CommandFailed))
    }
}

fn build_service(
    settings: &EngineSettings,
    cases: Arc<dyn CaseRepository>,
    recorder: Arc<dyn ExecutionRecorder>,
) -> AppResult<TestService> {
    TestService::from_settings(settings, cases, recorder, Arc::new(SysinfoProbe))
}

fn case_repository(
    selection: &CaseSelection,
    settings: &EngineSettings,
) -> AppResult<Arc<dyn CaseRepository>> {
    let path = selection
        .cases
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| settings.cases.clone())
        .ok_or_else(|| AppError::validation(ValidationError::MissingCaseFile))?;
    Ok(Arc::new(FileCaseRepository::open(&path)?))
}

async fn open_recorder(settings: &EngineSettings) -> AppResult<Arc<dyn ExecutionRecorder>> {
    match settings.records.as_ref() {
        Some(path) => {
            info!("Recording executions to {}", path.display());
            Ok(Arc::new(JsonlRecorder::open(path).await?))
        }
        None => Ok(Arc::new(NoopRecorder::new())),
    }
}

pub(super) fn parse_parameters(text: Option<&str>) -> AppResult<Option<Value>> {
    let Some(text) = text else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(text).map_err(|err| {
        AppError::validation(ValidationError::InvalidParameters {
            reason: err.to_string(),
        })
    })?;
    if value.is_object() {
        Ok(Some(value))
    } else {
        Err(AppError::validation(ValidationError::InvalidParameters {
            reason: format!("expected an object, got {}", value),
        }))
    }
}
