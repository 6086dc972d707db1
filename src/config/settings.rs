use std::path::PathBuf;
use std::time::Duration;

use crate::args::{DEFAULT_USER_AGENT, OutputFormat, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

const DEFAULT_MAX_CONCURRENCY: usize = 1000;
const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(3600);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SUBMIT_INTERVAL: Duration = Duration::from_millis(10);
const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(5);
const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(100);

/// Resolved engine limits and collaborator locations.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub max_concurrency: usize,
    pub max_duration: Duration,
    pub request_timeout: Duration,
    pub submit_interval: Duration,
    pub rate_limit_window: Duration,
    pub rate_limit_interval: Duration,
    pub user_agent: String,
    pub cases: Option<PathBuf>,
    pub records: Option<PathBuf>,
    pub output: OutputFormat,
    pub no_color: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_duration: DEFAULT_MAX_DURATION,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            submit_interval: DEFAULT_SUBMIT_INTERVAL,
            rate_limit_window: DEFAULT_RATE_LIMIT_WINDOW,
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cases: None,
            records: None,
            output: OutputFormat::Text,
            no_color: false,
        }
    }
}

impl EngineSettings {
    /// Layers a config file over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a limit is zero or a duration cannot be parsed.
    pub fn from_config(config: Option<&ConfigFile>) -> AppResult<Self> {
        let mut settings = Self::default();
        let Some(config) = config else {
            return Ok(settings);
        };

        if let Some(max_concurrency) = config.max_concurrency {
            settings.max_concurrency = PositiveUsize::try_from(max_concurrency)
                .map_err(|err| {
                    AppError::config(ConfigError::FieldMustBePositive {
                        field: "max_concurrency".to_owned(),
                        source: err,
                    })
                })?
                .get();
        }
        apply_duration(&mut settings.max_duration, config.max_duration.as_ref(), "max_duration")?;
        apply_duration(
            &mut settings.request_timeout,
            config.request_timeout.as_ref(),
            "request_timeout",
        )?;
        apply_duration(
            &mut settings.submit_interval,
            config.submit_interval.as_ref(),
            "submit_interval",
        )?;
        apply_duration(
            &mut settings.rate_limit_window,
            config.rate_limit_window.as_ref(),
            "rate_limit_window",
        )?;
        apply_duration(
            &mut settings.rate_limit_interval,
            config.rate_limit_interval.as_ref(),
            "rate_limit_interval",
        )?;
        if let Some(user_agent) = config.user_agent.as_ref() {
            settings.user_agent.clone_from(user_agent);
        }
        settings.cases = config.cases.as_ref().map(PathBuf::from);
        settings.records = config.records.as_ref().map(PathBuf::from);
        if let Some(output) = config.output {
            settings.output = output;
        }
        if let Some(no_color) = config.no_color {
            settings.no_color = no_color;
        }
        Ok(settings)
    }

    /// Whole seconds of the configured maximum run duration.
    #[must_use]
    pub const fn max_duration_secs(&self) -> u64 {
        self.max_duration.as_secs()
    }
}

fn apply_duration(
    target: &mut Duration,
    value: Option<&DurationValue>,
    field: &'static str,
) -> AppResult<()> {
    if let Some(value) = value {
        *target = value
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))?;
    }
    Ok(())
}
