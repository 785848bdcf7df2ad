//! Apply-reply command - run a daemon reply through the agent's reply
//! handling and print the resulting application state

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use relay_config::Config;
use relay_protocol::{App, AppStatus, process_reply};

/// Apply-reply command arguments
#[derive(Args, Debug)]
pub struct ApplyReplyArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Reply message file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

/// Run the apply-reply command
pub fn run(args: ApplyReplyArgs, config: &Config) -> Result<()> {
    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut app = App::new(config.app_info());
    let status = process_reply(&bytes, &mut app)
        .with_context(|| format!("failed to apply reply {}", args.input.display()))?;

    print!("{}", summarize(&app, status)?);
    Ok(())
}

/// Application state after a reply
pub fn summarize(app: &App, status: AppStatus) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "status: {status}")?;
    writeln!(out, "state: {}", app.state)?;
    writeln!(out, "agent_run_id: {}", app.agent_run_id.as_deref().unwrap_or("-"))?;
    writeln!(out, "entity_guid: {}", app.entity_guid.as_deref().unwrap_or("-"))?;

    let harvest = &app.harvest;
    writeln!(out, "connect_timestamp: {}", harvest.connect_timestamp)?;
    writeln!(out, "harvest_frequency: {}s", harvest.frequency.as_secs())?;
    writeln!(out, "sampling_target: {}", harvest.sampling_target)?;

    let limits = &app.limits;
    writeln!(
        out,
        "limits: analytics={} custom={} error={} span={} log={}",
        limits.analytics_events,
        limits.custom_events,
        limits.error_events,
        limits.span_events,
        limits.log_events
    )?;
    Ok(out)
}
