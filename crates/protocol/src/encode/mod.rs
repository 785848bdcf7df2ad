//! Entity encoders
//!
//! Builds the messages the agent sends to the daemon (and, for tests and
//! tooling, the daemon's reply). Every encoder writes children first, then
//! the payload table, then wraps it in a `Message` envelope.
//!
//! # Usage
//!
//! ```ignore
//! use relay_protocol::encode::{encode_app_query, encode_transaction};
//!
//! let register = encode_app_query(None, "web-01", &app.info);
//! let txn = encode_transaction("run-1", &record, &app.limits);
//! ```
//!
//! Encoders never fail. Missing required inputs (license, app name) are a
//! caller bug and are written as given.

mod app;
mod app_reply;
mod span_batch;
mod transaction;

pub use app::{encode_app_query, prepend_app};
pub use app_reply::{AppReply, encode_app_reply};
pub use span_batch::encode_span_batch;
pub use transaction::{
    encode_transaction, prepend_log_events, prepend_metrics, prepend_span_events,
    prepend_transaction,
};

use crate::builder::{FlatBuilder, WireOffset};

/// Write a string only when it carries a value
///
/// Empty strings are treated like absent ones so they cost no space.
fn prepend_opt_string(fb: &mut FlatBuilder, value: Option<&str>) -> Option<WireOffset> {
    value.filter(|v| !v.is_empty()).map(|v| fb.create_string(v))
}

/// Add an offset field only when the child was written
#[inline]
fn add_opt_offset(fb: &mut FlatBuilder, field: usize, value: Option<WireOffset>) {
    if let Some(value) = value {
        fb.add_offset(field, value);
    }
}
