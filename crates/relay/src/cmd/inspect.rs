//! Inspect command - print the contents of a captured message
//!
//! # Usage
//!
//! ```bash
//! relay inspect app.bin
//! relay inspect reply.bin
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use relay_protocol::{AppReplyView, AppView, Message, MessageBody, SpanBatchView, TransactionView};
use tracing::debug;

/// Inspect command arguments
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Message file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

/// Run the inspect command
pub fn run(args: InspectArgs) -> Result<()> {
    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    debug!(path = %args.input.display(), size = bytes.len(), "read message");

    let report = describe(&bytes).with_context(|| format!("failed to decode {}", args.input.display()))?;
    print!("{report}");
    Ok(())
}

/// Human-readable description of a message
pub fn describe(bytes: &[u8]) -> Result<String> {
    let msg = Message::parse(bytes)?;

    let mut out = String::new();
    writeln!(out, "message: {} ({} bytes)", msg.body_type(), bytes.len())?;
    writeln!(out, "agent_run_id: {}", msg.agent_run_id().unwrap_or("-"))?;

    match msg.body() {
        MessageBody::None => writeln!(out, "(no body)")?,
        MessageBody::App(app) => describe_app(&mut out, &app)?,
        MessageBody::AppReply(reply) => describe_app_reply(&mut out, &reply)?,
        MessageBody::Transaction(txn) => describe_transaction(&mut out, &txn)?,
        MessageBody::SpanBatch(batch) => describe_span_batch(&mut out, &batch)?,
    }

    Ok(out)
}

fn describe_app(out: &mut String, app: &AppView<'_>) -> Result<()> {
    writeln!(out, "appname: {}", app.appname()?.unwrap_or("-"))?;
    writeln!(out, "license: {}", mask_license(app.license()?.unwrap_or("")))?;
    writeln!(
        out,
        "agent: {} {}",
        app.agent_language()?.unwrap_or("-"),
        app.agent_version()?.unwrap_or("-")
    )?;
    writeln!(out, "host: {}", app.host()?.unwrap_or("-"))?;
    writeln!(out, "high_security: {}", app.high_security().unwrap_or(false))?;
    if let Some(display_host) = app.display_host()? {
        writeln!(out, "display_host: {display_host}")?;
    }
    if let Some(labels) = app.labels()? {
        writeln!(out, "labels: {labels}")?;
    }
    if let Some(observer) = app.trace_observer_host()? {
        writeln!(
            out,
            "trace_observer: {}:{} (queue {})",
            observer,
            app.trace_observer_port().unwrap_or(0),
            app.span_queue_size().unwrap_or(0)
        )?;
    }
    writeln!(
        out,
        "max_samples_stored: span={} log={} custom={}",
        app.span_events_max_samples_stored().unwrap_or(0),
        app.log_events_max_samples_stored().unwrap_or(0),
        app.custom_events_max_samples_stored().unwrap_or(0)
    )?;
    Ok(())
}

fn describe_app_reply(out: &mut String, reply: &AppReplyView<'_>) -> Result<()> {
    writeln!(out, "status: {}", reply.status())?;
    writeln!(out, "connect_timestamp: {}", reply.connect_timestamp().unwrap_or(0))?;
    writeln!(out, "harvest_frequency: {}", reply.harvest_frequency().unwrap_or(0))?;
    writeln!(out, "sampling_target: {}", reply.sampling_target().unwrap_or(0))?;
    if let Some(payload) = reply.connect_reply()? {
        writeln!(out, "connect_reply: {}", String::from_utf8_lossy(payload))?;
    }
    if let Some(policies) = reply.security_policies()? {
        writeln!(out, "security_policies: {}", String::from_utf8_lossy(policies))?;
    }
    Ok(())
}

fn describe_transaction(out: &mut String, txn: &TransactionView<'_>) -> Result<()> {
    writeln!(out, "name: {}", txn.name()?.unwrap_or("-"))?;
    writeln!(out, "uri: {}", txn.uri()?.unwrap_or("-"))?;
    writeln!(out, "pid: {}", txn.pid().unwrap_or(0))?;
    writeln!(out, "sampling_priority: {}", txn.sampling_priority().unwrap_or(0.0))?;
    if let Some(id) = txn.synthetics_resource_id()? {
        writeln!(out, "synthetics_resource_id: {id}")?;
    }

    let metrics = txn.metrics()?;
    writeln!(out, "metrics: {}", metrics.len())?;
    for metric in &metrics {
        let name = metric.name()?.unwrap_or("-");
        match metric.data()? {
            Some(data) => writeln!(
                out,
                "  {name}: count={} total={} exclusive={} min={} max={} sos={} scoped={} forced={}",
                data.count,
                data.total,
                data.exclusive,
                data.min,
                data.max,
                data.sum_of_squares,
                data.scoped,
                data.forced
            )?,
            None => writeln!(out, "  {name}: (no data)")?,
        }
    }

    writeln!(out, "errors: {}", txn.errors()?.len())?;
    writeln!(out, "slowsqls: {}", txn.slowsqls()?.len())?;
    writeln!(out, "custom_events: {}", txn.custom_events()?.len())?;
    writeln!(out, "error_events: {}", txn.error_events()?.len())?;
    writeln!(out, "span_events: {}", txn.span_event_count()?)?;
    writeln!(out, "log_events: {}", txn.log_events()?.len())?;
    match txn.trace()? {
        Some(trace) => writeln!(
            out,
            "trace: guid={} duration={}",
            trace.guid()?.unwrap_or("-"),
            trace.duration().unwrap_or(0.0)
        )?,
        None => writeln!(out, "trace: -")?,
    }
    Ok(())
}

fn describe_span_batch(out: &mut String, batch: &SpanBatchView<'_>) -> Result<()> {
    writeln!(out, "count: {}", batch.count().unwrap_or(0))?;
    writeln!(out, "encoded: {} bytes", batch.encoded()?.map_or(0, <[u8]>::len))?;
    Ok(())
}

/// Keep the last four characters of a license key
fn mask_license(license: &str) -> String {
    let visible = license.char_indices().rev().nth(3).map_or(0, |(i, _)| i);
    format!("{}{}", "*".repeat(license[..visible].chars().count()), &license[visible..])
}
