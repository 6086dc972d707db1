use std::path::PathBuf;

use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config '{field}' must be >= 1: {source}")]
    FieldMustBePositive {
        field: String,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid duration for '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("Fault injection config is not valid JSON: {source}")]
    FaultConfigParse {
        #[source]
        source: serde_json::Error,
    },
    #[error("Fault injection config must list at least one fault type.")]
    FaultTypesEmpty,
    #[error("Invalid ramp-up config: {reason}")]
    InvalidRampUp { reason: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
