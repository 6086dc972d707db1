mod dispatch;
mod output;


use std::path::PathBuf;

use clap::Parser;

use caseforge::args::EngineArgs;
use caseforge::config::types::ConfigFile;
use caseforge::config::{EngineSettings, load_config};
use caseforge::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let args = EngineArgs::parse();
    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, config.as_ref())?;

    crate::logger::init_logging(args.verbose, settings.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(dispatch::execute(args.command, &settings))
}

/// Config file over defaults, then global CLI flags over both.
fn resolve_settings(args: &EngineArgs, config: Option<&ConfigFile>) -> AppResult<EngineSettings> {
    let mut settings = EngineSettings::from_config(config)?;
    if let Some(output) = args.output {
        settings.output = output;
    }
    if args.no_color {
        settings.no_color = true;
    }
    if let Some(records) = args.records.as_ref() {
        settings.records = Some(PathBuf::from(records));
    }
    Ok(settings)
}
