//! Fault injection: mutated case variants, tolerance checks and a 0-100 score.
mod injector;
mod mutate;
mod score;
mod types;


pub use injector::{
    FaultInjector, RobustnessReport, ToleranceDetail, ToleranceResult, ToleranceResults,
};
pub use mutate::{OVERSIZED_VALUE, SQL_INJECTION_PAYLOAD, overwrite_parameters, with_format_marker};
pub use score::robustness_score;
pub use types::{FaultType, parse_fault_config};
