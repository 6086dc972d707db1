use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultType {
    ParameterOutOfBounds,
    SqlInjection,
    RateLimit,
    InvalidResponseFormat,
}

impl FaultType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FaultType::ParameterOutOfBounds => "parameter_out_of_bounds",
            FaultType::SqlInjection => "sql_injection",
            FaultType::RateLimit => "rate_limit",
            FaultType::InvalidResponseFormat => "invalid_response_format",
        }
    }
}

impl std::fmt::Display for FaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct FaultInjectionConfig {
    #[serde(default)]
    fault_types: Vec<FaultType>,
}

/// Parses `{"fault_types": [...]}` into the fault types to run, in the
/// given order with repeats dropped.
///
/// # Errors
///
/// Returns an error for invalid JSON, unknown fault names, or an empty list.
pub fn parse_fault_config(text: &str) -> Result<Vec<FaultType>, ConfigError> {
    let config: FaultInjectionConfig =
        serde_json::from_str(text).map_err(|err| ConfigError::FaultConfigParse { source: err })?;
    let mut faults: Vec<FaultType> = Vec::with_capacity(config.fault_types.len());
    for fault in config.fault_types {
        if !faults.contains(&fault) {
            faults.push(fault);
        }
    }
    if faults.is_empty() {
        return Err(ConfigError::FaultTypesEmpty);
    }
    Ok(faults)
}
