//! Tests for the message envelope

use crate::app::AppInfo;
use crate::builder::FlatBuilder;
use crate::encode::{AppReply, encode_app_query, encode_app_reply, encode_span_batch};
use crate::error::ProtocolError;
use crate::message::{Message, MessageBody, Payload, finish_message};
use crate::schema::{AppStatus, MessageBodyType, message};

const RUN_ID: &str = "AQUAAAAAAAAAAQ-run-identifier";

#[test]
fn test_payload_body_type() {
    let mut fb = FlatBuilder::new();
    fb.start_table(1);
    let off = fb.end_table();

    assert_eq!(Payload::App(off).body_type(), MessageBodyType::App);
    assert_eq!(Payload::AppReply(off).body_type(), MessageBodyType::AppReply);
    assert_eq!(Payload::Transaction(off).body_type(), MessageBodyType::Transaction);
    assert_eq!(Payload::SpanBatch(off).body_type(), MessageBodyType::SpanBatch);
}

#[test]
fn test_parse_carries_agent_run_id() {
    let bytes = encode_span_batch(RUN_ID, 3, b"spans");
    let msg = Message::parse(&bytes).unwrap();

    assert_eq!(msg.agent_run_id(), Some(RUN_ID));
    assert_eq!(msg.body_type(), MessageBodyType::SpanBatch);
}

#[test]
fn test_first_connect_has_no_run_id() {
    let info = AppInfo::new("0123456789012345678901234567890123456789", "My App");
    let bytes = encode_app_query(None, "web-01", &info);
    let msg = Message::parse(&bytes).unwrap();

    assert_eq!(msg.agent_run_id(), None);
    assert!(matches!(msg.body(), MessageBody::App(_)));
}

#[test]
fn test_span_batch_roundtrip() {
    let bytes = encode_span_batch(RUN_ID, 42, b"\x00\x01encoded");
    let msg = Message::parse(&bytes).unwrap();
    let batch = msg.span_batch().unwrap();

    assert_eq!(batch.count(), Some(42));
    assert_eq!(batch.encoded().unwrap(), Some(&b"\x00\x01encoded"[..]));
}

#[test]
fn test_wrong_body_accessor_is_error() {
    let bytes = encode_app_reply(&AppReply::with_status(AppStatus::StillValid));
    let msg = Message::parse(&bytes).unwrap();

    assert!(msg.app_reply().is_ok());
    let err = msg.transaction().unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::UnexpectedBody {
            expected: MessageBodyType::Transaction,
            actual: MessageBodyType::AppReply,
        }
    ));
    assert!(!err.is_malformed());
    assert!(msg.app().is_err());
    assert!(msg.span_batch().is_err());
}

#[test]
fn test_untagged_message_has_no_body() {
    let mut fb = FlatBuilder::new();
    let run_id = fb.create_string(RUN_ID);
    fb.start_table(message::NUM_FIELDS);
    fb.add_offset(message::AGENT_RUN_ID, run_id);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let msg = Message::parse(&bytes).unwrap();
    assert_eq!(msg.body_type(), MessageBodyType::None);
    assert!(matches!(msg.body(), MessageBody::None));
    assert!(matches!(
        msg.app_reply(),
        Err(ProtocolError::UnexpectedBody { actual: MessageBodyType::None, .. })
    ));
}

#[test]
fn test_tag_without_data_is_missing_field() {
    let mut fb = FlatBuilder::new();
    let run_id = fb.create_string(RUN_ID);
    fb.start_table(message::NUM_FIELDS);
    fb.add_offset(message::AGENT_RUN_ID, run_id);
    fb.add_u8(message::DATA_TYPE, MessageBodyType::Transaction.as_u8(), 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    assert!(matches!(
        Message::parse(&bytes),
        Err(ProtocolError::MissingField("data"))
    ));
}

#[test]
fn test_unknown_tag_reads_as_none() {
    let mut fb = FlatBuilder::new();
    fb.start_table(1);
    let payload = fb.end_table();
    let run_id = fb.create_string(RUN_ID);
    fb.start_table(message::NUM_FIELDS);
    fb.add_offset(message::AGENT_RUN_ID, run_id);
    fb.add_offset(message::DATA, payload);
    fb.add_u8(message::DATA_TYPE, 200, 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let msg = Message::parse(&bytes).unwrap();
    assert_eq!(msg.body_type(), MessageBodyType::None);
}

#[test]
fn test_parse_rejects_short_buffer() {
    let err = Message::parse(&[0u8; 8]).unwrap_err();
    assert!(matches!(err, ProtocolError::MessageTooShort { .. }));
}

#[test]
fn test_finish_message_without_run_id() {
    let mut fb = FlatBuilder::new();
    fb.start_table(2);
    fb.add_u64(0, 7, 0);
    let table = fb.end_table();
    let bytes = finish_message(fb, None, Payload::SpanBatch(table));

    let msg = Message::parse(&bytes).unwrap();
    assert_eq!(msg.agent_run_id(), None);
    assert_eq!(msg.span_batch().unwrap().count(), Some(7));
}
