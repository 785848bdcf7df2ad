//! Transaction payload encoding
//!
//! # Wire Format Layout
//!
//! Built back to front, so in the finished buffer the envelope comes first:
//! ```text
//! [root_offset:u32]
//! [Message vtable][Message table][agent_run_id]
//! [Transaction vtable][Transaction table][name][uri]...
//! [metrics vector][Metric 0]...[errors vector][Error 0]...
//! [span_events vector][Event 0]...[log_events vector][Event 0]...
//! ```
//!
//! Event-like collections (custom, error, span, log) are capped by the
//! application's limits. Callers keep them in priority order, so the cap
//! keeps the head of each collection.

use bytes::Bytes;
use tracing::debug;

use super::{add_opt_offset, prepend_opt_string};
use crate::LogEvent;
use crate::app::AppLimits;
use crate::builder::{FlatBuilder, WireOffset};
use crate::message::{Payload, finish_message};
use crate::schema::{error, event, metric, metric_data, slowsql, trace, transaction};
use crate::txn::{ErrorRecord, MetricRecord, SlowSqlRecord, TraceRecord, TxnRecord};

/// Build a transaction message
pub fn encode_transaction(agent_run_id: &str, txn: &TxnRecord, limits: &AppLimits) -> Bytes {
    let mut fb = FlatBuilder::with_capacity(estimate_size(txn));
    let table = prepend_transaction(&mut fb, txn, limits);
    finish_message(fb, Some(agent_run_id), Payload::Transaction(table))
}

/// Write a `Transaction` table with all of its nested collections
pub fn prepend_transaction(fb: &mut FlatBuilder, txn: &TxnRecord, limits: &AppLimits) -> WireOffset {
    let span_events = (!txn.span_events.is_empty())
        .then(|| prepend_span_events(fb, &txn.span_events, as_limit(limits.span_events)));
    let log_events = (!txn.log_events.is_empty())
        .then(|| prepend_log_events(fb, &txn.log_events, as_limit(limits.log_events)));
    let error_events = prepend_event_vector(
        fb,
        capped("error events", &txn.error_events, limits.error_events),
    );
    let custom_events = prepend_event_vector(
        fb,
        capped("custom events", &txn.custom_events, limits.custom_events),
    );
    let trace = txn.trace.as_ref().map(|t| prepend_trace(fb, t));
    let slowsqls = (!txn.slowsqls.is_empty()).then(|| prepend_slowsqls(fb, &txn.slowsqls));
    let errors = (!txn.errors.is_empty()).then(|| prepend_errors(fb, &txn.errors));
    let metrics = (!txn.metrics.is_empty()).then(|| prepend_metrics(fb, &txn.metrics));
    let txn_event = txn
        .txn_event
        .as_deref()
        .map(|json| prepend_event(fb, json.as_bytes()));
    let synthetics_resource_id = prepend_opt_string(fb, txn.synthetics_resource_id.as_deref());
    let uri = prepend_opt_string(fb, txn.request_uri.as_deref());
    let name = fb.create_string(&txn.name);

    fb.start_table(transaction::NUM_FIELDS);
    fb.add_f64(transaction::SAMPLING_PRIORITY, txn.sampling_priority, 0.0);
    fb.add_offset(transaction::NAME, name);
    add_opt_offset(fb, transaction::URI, uri);
    add_opt_offset(fb, transaction::SYNTHETICS_RESOURCE_ID, synthetics_resource_id);
    add_opt_offset(fb, transaction::TXN_EVENT, txn_event);
    add_opt_offset(fb, transaction::METRICS, metrics);
    add_opt_offset(fb, transaction::ERRORS, errors);
    add_opt_offset(fb, transaction::SLOW_SQLS, slowsqls);
    add_opt_offset(fb, transaction::CUSTOM_EVENTS, custom_events);
    add_opt_offset(fb, transaction::TRACE, trace);
    add_opt_offset(fb, transaction::ERROR_EVENTS, error_events);
    add_opt_offset(fb, transaction::SPAN_EVENTS, span_events);
    add_opt_offset(fb, transaction::LOG_EVENTS, log_events);
    fb.add_i32(transaction::PID, txn.pid, 0);

    fb.end_table()
}

// =============================================================================
// Span and log events
// =============================================================================

/// Write up to `limit` span events as a vector of `Event` tables
///
/// The events must already be in priority order; the first `limit` are kept.
/// A limit of 0 yields an empty vector, which decodes as zero spans.
pub fn prepend_span_events(fb: &mut FlatBuilder, span_events: &[String], limit: usize) -> WireOffset {
    if span_events.len() > limit {
        debug!(seen = span_events.len(), limit, "span events truncated");
    }

    let offsets: Vec<WireOffset> = span_events
        .iter()
        .take(limit)
        .map(|json| prepend_event(fb, json.as_bytes()))
        .collect();

    fb.create_vector_of_tables(&offsets)
}

/// Write up to `limit` log events as a vector of `Event` tables
///
/// Each event's data is its partial (bracket-free) JSON object.
pub fn prepend_log_events(fb: &mut FlatBuilder, log_events: &[LogEvent], limit: usize) -> WireOffset {
    if log_events.len() > limit {
        debug!(seen = log_events.len(), limit, "log events truncated");
    }

    let mut json = String::with_capacity(256);
    let offsets: Vec<WireOffset> = log_events
        .iter()
        .take(limit)
        .map(|log_event| {
            json.clear();
            log_event.write_json(&mut json, true);
            prepend_event(fb, json.as_bytes())
        })
        .collect();

    fb.create_vector_of_tables(&offsets)
}

// =============================================================================
// Metrics, errors, slow SQLs, trace
// =============================================================================

/// Write metrics as a vector of `Metric` tables
///
/// Each metric's values are copied verbatim into the fixed `MetricData` layout.
pub fn prepend_metrics(fb: &mut FlatBuilder, metrics: &[MetricRecord]) -> WireOffset {
    let offsets: Vec<WireOffset> = metrics
        .iter()
        .map(|m| {
            let name = fb.create_string(&m.name);
            fb.start_table(metric::NUM_FIELDS);
            fb.add_struct(metric::DATA, &m.data.to_bytes(), metric_data::ALIGN);
            fb.add_offset(metric::NAME, name);
            fb.end_table()
        })
        .collect();

    fb.create_vector_of_tables(&offsets)
}

fn prepend_errors(fb: &mut FlatBuilder, errors: &[ErrorRecord]) -> WireOffset {
    let offsets: Vec<WireOffset> = errors
        .iter()
        .map(|e| {
            let data = fb.create_bytes(e.data.as_bytes());
            fb.start_table(error::NUM_FIELDS);
            fb.add_offset(error::DATA, data);
            fb.add_i32(error::PRIORITY, e.priority, 0);
            fb.end_table()
        })
        .collect();

    fb.create_vector_of_tables(&offsets)
}

fn prepend_slowsqls(fb: &mut FlatBuilder, slowsqls: &[SlowSqlRecord]) -> WireOffset {
    let offsets: Vec<WireOffset> = slowsqls
        .iter()
        .map(|s| {
            let params = prepend_opt_string(fb, Some(&s.params));
            let query = prepend_opt_string(fb, Some(&s.query));
            let metric_name = prepend_opt_string(fb, Some(&s.metric));

            fb.start_table(slowsql::NUM_FIELDS);
            fb.add_u64(slowsql::TOTAL_MICROS, s.total_micros, 0);
            fb.add_u64(slowsql::MIN_MICROS, s.min_micros, 0);
            fb.add_u64(slowsql::MAX_MICROS, s.max_micros, 0);
            add_opt_offset(fb, slowsql::METRIC, metric_name);
            add_opt_offset(fb, slowsql::QUERY, query);
            add_opt_offset(fb, slowsql::PARAMS, params);
            fb.add_u32(slowsql::ID, s.id, 0);
            fb.add_i32(slowsql::COUNT, s.count, 0);
            fb.end_table()
        })
        .collect();

    fb.create_vector_of_tables(&offsets)
}

fn prepend_trace(fb: &mut FlatBuilder, t: &TraceRecord) -> WireOffset {
    let data = fb.create_bytes(t.data.as_bytes());
    let guid = prepend_opt_string(fb, Some(&t.guid));

    fb.start_table(trace::NUM_FIELDS);
    fb.add_f64(trace::TIMESTAMP, t.timestamp, 0.0);
    fb.add_f64(trace::DURATION, t.duration, 0.0);
    add_opt_offset(fb, trace::GUID, guid);
    fb.add_offset(trace::DATA, data);
    fb.add_bool(trace::FORCE_PERSIST, t.force_persist, false);
    fb.end_table()
}

// =============================================================================
// Events
// =============================================================================

/// Write one `Event` table holding pre-rendered JSON
fn prepend_event(fb: &mut FlatBuilder, data: &[u8]) -> WireOffset {
    let data = fb.create_bytes(data);
    fb.start_table(event::NUM_FIELDS);
    fb.add_offset(event::DATA, data);
    fb.end_table()
}

fn prepend_event_vector(fb: &mut FlatBuilder, events: &[String]) -> Option<WireOffset> {
    if events.is_empty() {
        return None;
    }

    let offsets: Vec<WireOffset> = events
        .iter()
        .map(|json| prepend_event(fb, json.as_bytes()))
        .collect();

    Some(fb.create_vector_of_tables(&offsets))
}

/// Keep the head of a collection within its limit
fn capped<'a>(kind: &'static str, events: &'a [String], limit: u64) -> &'a [String] {
    let limit = as_limit(limit);
    if events.len() > limit {
        debug!(kind, seen = events.len(), limit, "events truncated");
        &events[..limit]
    } else {
        events
    }
}

#[inline]
fn as_limit(limit: u64) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}

/// Rough initial buffer size so large transactions grow rarely
fn estimate_size(txn: &TxnRecord) -> usize {
    let events: usize = txn
        .span_events
        .iter()
        .chain(&txn.custom_events)
        .chain(&txn.error_events)
        .map(|e| e.len() + 16)
        .sum();

    1024 + txn.metrics.len() * 128
        + txn.log_events.len() * 256
        + txn.trace.as_ref().map_or(0, |t| t.data.len())
        + events
}
