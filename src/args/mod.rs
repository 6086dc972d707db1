//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{CaseSelection, Command, CustomArgs, EngineArgs, PerfArgs, RobustnessArgs, RunArgs};
pub use types::{HttpMethod, OutputFormat, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_duration_value;
