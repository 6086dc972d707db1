use clap::{Args, Parser, Subcommand};

use super::parsers::parse_header;
use super::types::{HttpMethod, OutputFormat};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "HTTP test-case engine: functional runs with assertions, load runs, and fault-injection robustness scoring."
)]
pub struct EngineArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (TOML or JSON)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Result output format
    #[arg(long = "output", short = 'o', value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Append execution records (JSON lines) to this file
    #[arg(long = "records", global = true)]
    pub records: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one or more stored cases once each
    Run(RunArgs),
    /// Load-test a stored case at fixed concurrency for a fixed duration
    Perf(PerfArgs),
    /// Load-test an ad-hoc target URL
    PerfCustom(CustomArgs),
    /// Inject faults into a stored case and score its tolerance
    Robustness(RobustnessArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CaseSelection {
    /// Case file (JSON or TOML) holding the stored cases
    #[arg(long = "cases")]
    pub cases: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub selection: CaseSelection,

    /// Case id to run (repeatable, runs in the given order)
    #[arg(long = "id", required = true, num_args = 1..)]
    pub ids: Vec<u64>,

    /// JSON object of {{name}} substitutions applied to url/headers/body
    #[arg(long = "params")]
    pub params: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PerfArgs {
    #[command(flatten)]
    pub selection: CaseSelection,

    /// Case id to drive
    #[arg(long = "id")]
    pub id: u64,

    /// Number of concurrent in-flight requests
    #[arg(long = "concurrency", short = 'c')]
    pub concurrency: usize,

    /// Run duration in seconds
    #[arg(long = "duration", short = 't')]
    pub duration: u64,

    /// Ramp-up JSON: initial_concurrency, target_concurrency, step_count, step_duration
    #[arg(long = "ramp-up")]
    pub ramp_up: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CustomArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: String,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body (sent as JSON when it parses as an object or array)
    #[arg(long, short)]
    pub data: Option<String>,

    /// Number of concurrent in-flight requests (clamped to max_concurrency)
    #[arg(long = "concurrency", short = 'c')]
    pub concurrency: usize,

    /// Run duration in seconds (clamped to max_duration)
    #[arg(long = "duration", short = 't')]
    pub duration: u64,

    /// Per-request timeout in seconds
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Ramp-up JSON: initial_concurrency, target_concurrency, step_count, step_duration
    #[arg(long = "ramp-up")]
    pub ramp_up: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RobustnessArgs {
    #[command(flatten)]
    pub selection: CaseSelection,

    /// Case id to mutate
    #[arg(long = "id")]
    pub id: u64,

    /// Fault injection JSON, e.g. {"fault_types": ["sql_injection"]}
    #[arg(long = "faults")]
    pub faults: String,
}
