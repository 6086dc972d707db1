use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_value};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub max_concurrency: Option<usize>,
    pub max_duration: Option<DurationValue>,
    pub request_timeout: Option<DurationValue>,
    pub submit_interval: Option<DurationValue>,
    pub rate_limit_window: Option<DurationValue>,
    pub rate_limit_interval: Option<DurationValue>,
    pub user_agent: Option<String>,
    pub cases: Option<String>,
    pub records: Option<String>,
    pub output: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
