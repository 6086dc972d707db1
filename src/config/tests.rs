use super::types::DurationValue;
use super::{EngineSettings, load_config_file};
use crate::args::OutputFormat;
use crate::error::{AppError, AppResult, ConfigError};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn parse_toml_config_overrides_limits() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("caseforge.toml");
    let content = r#"
max_concurrency = 50
max_duration = "10m"
request_timeout = 5
submit_interval = "25ms"
cases = "cases.json"
output = "json"
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    let settings = EngineSettings::from_config(Some(&config))?;
    if settings.max_concurrency != 50 {
        return Err(AppError::config("Unexpected max_concurrency"));
    }
    if settings.max_duration != Duration::from_secs(600) {
        return Err(AppError::config("Unexpected max_duration"));
    }
    if settings.request_timeout != Duration::from_secs(5) {
        return Err(AppError::config("Unexpected request_timeout"));
    }
    if settings.submit_interval != Duration::from_millis(25) {
        return Err(AppError::config("Unexpected submit_interval"));
    }
    if settings.cases.as_deref() != Some(std::path::Path::new("cases.json")) {
        return Err(AppError::config("Unexpected cases path"));
    }
    if settings.output != OutputFormat::Json {
        return Err(AppError::config("Unexpected output format"));
    }
    if settings.rate_limit_window != Duration::from_secs(5) {
        return Err(AppError::config("Expected default rate_limit_window"));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("caseforge.json");
    std::fs::write(
        &path,
        r#"{"rate_limit_window": "2s", "rate_limit_interval": "50ms", "user_agent": "probe/1"}"#,
    )?;

    let config = load_config_file(&path)?;
    let settings = EngineSettings::from_config(Some(&config))?;
    if settings.rate_limit_window != Duration::from_secs(2)
        || settings.rate_limit_interval != Duration::from_millis(50)
    {
        return Err(AppError::config("Unexpected rate limit settings"));
    }
    if settings.user_agent != "probe/1" {
        return Err(AppError::config("Unexpected user agent"));
    }
    if settings.max_concurrency != 1000 {
        return Err(AppError::config("Expected default max_concurrency"));
    }
    Ok(())
}

#[test]
fn defaults_without_config() -> AppResult<()> {
    let settings = EngineSettings::from_config(None)?;
    if settings.request_timeout != Duration::from_secs(30)
        || settings.max_duration_secs() != 3600
        || settings.max_concurrency != 1000
    {
        return Err(AppError::config("Unexpected defaults"));
    }
    Ok(())
}

#[test]
fn zero_limits_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("caseforge.toml");
    std::fs::write(&path, "max_concurrency = 0\n")?;
    let config = load_config_file(&path)?;
    match EngineSettings::from_config(Some(&config)) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. }))
            if field == "max_concurrency" =>
        {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected zero max_concurrency to fail")),
    }
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("caseforge.yaml");
    std::fs::write(&path, "max_concurrency: 1\n")?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected unsupported extension error")),
    }
}

#[test]
fn duration_value_rejects_zero() -> AppResult<()> {
    if DurationValue::Seconds(0).to_duration().is_ok() {
        return Err(AppError::config("Expected zero seconds to fail"));
    }
    let parsed = DurationValue::Text("1h".to_owned()).to_duration()?;
    if parsed != Duration::from_secs(3600) {
        return Err(AppError::config("Unexpected parsed duration"));
    }
    Ok(())
}
