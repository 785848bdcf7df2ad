//! Relay - build and inspect agent/daemon command messages
//!
//! # Usage
//!
//! ```bash
//! # Encode the registration message for an application
//! relay register --config relay.toml --out app.bin
//!
//! # Print what a captured message contains
//! relay inspect app.bin
//!
//! # Apply a daemon reply to the configured application
//! relay apply-reply --config relay.toml reply.bin
//! ```

mod cmd;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_config::{Config, LogConfig, LogFormat, LogOutput};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Relay - agent/daemon command protocol tool
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an application registration message
    Register(cmd::register::RegisterArgs),

    /// Decode a message file and print its contents
    Inspect(cmd::inspect::InspectArgs),

    /// Apply a daemon reply to the configured application
    ApplyReply(cmd::apply_reply::ApplyReplyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Register(args) => {
            let config = load_config(&args.config)?;
            init_logging(&config.log, cli.log_level.as_deref())?;
            cmd::register::run(args, &config)
        }
        Command::Inspect(args) => {
            // Inspect needs no config; log to stderr at the requested level
            init_logging(&LogConfig::default(), cli.log_level.as_deref())?;
            cmd::inspect::run(args)
        }
        Command::ApplyReply(args) => {
            let config = load_config(&args.config)?;
            init_logging(&config.log, cli.log_level.as_deref())?;
            cmd::apply_reply::run(args, &config)
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::from_file(path).with_context(|| format!("failed to load config {}", path.display()))
}

/// Initialize the tracing subscriber for logging
///
/// A `--log-level` flag replaces the config's filter outright, so it may
/// carry full `EnvFilter` directives.
fn init_logging(log: &LogConfig, level_override: Option<&str>) -> Result<()> {
    let directive = match level_override {
        Some(level) => level.to_string(),
        None => log.filter_directive(),
    };
    let filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let writer = match &log.output {
        LogOutput::Stderr => BoxMakeWriter::new(io::stderr),
        LogOutput::Stdout => BoxMakeWriter::new(io::stdout),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false).with_writer(writer))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .init(),
    }

    Ok(())
}
