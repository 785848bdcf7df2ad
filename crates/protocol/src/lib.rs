//! Relay Protocol - FlatBuffers command protocol between agent and daemon
//!
//! This crate provides the wire layer the instrumentation agent uses to talk
//! to its local daemon:
//! - `FlatBuilder` / `FlatTable` - schema-blind table codec
//! - `check_message` / `is_valid_message` - gate for untrusted bytes
//! - `encode` - registration, transaction and span batch encoders
//! - `Message` - validated, zero-copy view of any message
//! - `reply` - applies the daemon's reply to an application record
//! - `LogEvent` - structured log line with a direct JSON writer
//!
//! # Design Principles
//!
//! - **Zero-copy decode**: views borrow the caller's buffer
//! - **Bounds-checked**: every read goes through a checked accessor
//! - **Schema as constants**: field indices live in [`schema`] only
//!
//! # FlatBuffers Integration
//!
//! Messages are built and parsed directly, without code generation. Field
//! numbering follows the daemon's `protocol.fbs`.

mod app;
mod builder;
mod decode;
pub mod encode;
mod error;
mod log_event;
mod message;
pub mod reply;
pub mod schema;
mod table;
mod txn;
mod validate;

pub use app::{
    App, AppInfo, AppLimits, AppState, DEFAULT_ANALYTIC_EVENTS, DEFAULT_CUSTOM_EVENTS,
    DEFAULT_ERROR_EVENTS, DEFAULT_HARVEST_FREQUENCY_SECS, DEFAULT_LOG_EVENTS,
    DEFAULT_SAMPLING_TARGET, DEFAULT_SPAN_EVENTS, HarvestTiming,
};
pub use builder::{FlatBuilder, WireOffset};
pub use decode::{
    AppReplyView, AppView, ErrorView, EventView, MetricView, SlowSqlView, SpanBatchView,
    TraceView, TransactionView,
};
pub use error::ProtocolError;
pub use log_event::{LogEvent, MAX_LOG_MESSAGE_LEN, TIME_DIVISOR_MS, write_json_array};
pub use message::{Message, MessageBody, Payload, finish_message};
pub use reply::{harvest_limit, process_reply};
pub use schema::{AppStatus, MessageBodyType};
pub use table::FlatTable;
pub use txn::{ErrorRecord, MetricData, MetricRecord, SlowSqlRecord, TraceRecord, TxnRecord};
pub use validate::{check_message, is_valid_message};

// Re-export bytes for convenience
pub use bytes::Bytes;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Smallest buffer that can hold a root offset plus an empty message (bytes)
pub const MIN_MESSAGE_SIZE: usize = 21;

// Test modules - only compiled during testing
#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod log_event_test;
#[cfg(test)]
mod message_test;
#[cfg(test)]
mod schema_test;
#[cfg(test)]
mod table_test;
