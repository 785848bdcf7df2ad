//! SpanBatch encoding
//!
//! Spans are encoded upstream; this only wraps the count and the bytes.

use bytes::Bytes;

use crate::builder::FlatBuilder;
use crate::message::{Payload, finish_message};
use crate::schema::span_batch;

/// Build a span batch message
pub fn encode_span_batch(agent_run_id: &str, count: u64, encoded: &[u8]) -> Bytes {
    let mut fb = FlatBuilder::with_capacity(128 + agent_run_id.len() + encoded.len());

    let encoded = fb.create_bytes(encoded);

    fb.start_table(span_batch::NUM_FIELDS);
    fb.add_u64(span_batch::COUNT, count, 0);
    fb.add_offset(span_batch::ENCODED, encoded);
    let table = fb.end_table();

    finish_message(fb, Some(agent_run_id), Payload::SpanBatch(table))
}
