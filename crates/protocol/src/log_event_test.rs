//! Tests for structured log events

use crate::log_event::{LogEvent, MAX_LOG_MESSAGE_LEN, write_json_array};

fn partial(event: &LogEvent) -> String {
    let mut buf = String::new();
    event.write_json(&mut buf, true);
    buf
}

// =============================================================================
// Setters
// =============================================================================

#[test]
fn test_new_event_is_empty() {
    let event = LogEvent::new();
    assert_eq!(event.message(), None);
    assert_eq!(event.log_level(), None);
    assert_eq!(event.timestamp(), 0);
    assert_eq!(event.priority(), 0);
}

#[test]
fn test_setters_replace_previous_value() {
    let mut event = LogEvent::new();
    event.set_message("first");
    event.set_message("second");
    event.set_hostname("a");
    event.set_hostname("b");

    assert_eq!(event.message(), Some("second"));
    assert_eq!(event.hostname(), Some("b"));
}

#[test]
fn test_timestamp_truncates_to_milliseconds() {
    let mut event = LogEvent::new();

    event.set_timestamp(1_000);
    assert_eq!(event.timestamp(), 1);

    event.set_timestamp(1_999);
    assert_eq!(event.timestamp(), 1);

    event.set_timestamp(999);
    assert_eq!(event.timestamp(), 0);
}

#[test]
fn test_message_truncated_at_set_time() {
    let mut event = LogEvent::new();
    event.set_message(&"a".repeat(MAX_LOG_MESSAGE_LEN + 100));

    assert_eq!(event.message().map(str::len), Some(MAX_LOG_MESSAGE_LEN));
}

#[test]
fn test_message_truncation_respects_char_boundary() {
    // 'é' is two bytes; put one across the cut
    let mut message = "a".repeat(MAX_LOG_MESSAGE_LEN - 1);
    message.push('é');
    message.push_str("tail");

    let mut event = LogEvent::new();
    event.set_message(&message);

    let stored = event.message().unwrap();
    assert_eq!(stored.len(), MAX_LOG_MESSAGE_LEN - 1);
    assert!(stored.chars().all(|c| c == 'a'));
}

#[test]
fn test_message_at_limit_is_kept() {
    let message = "m".repeat(MAX_LOG_MESSAGE_LEN);
    let mut event = LogEvent::new();
    event.set_message(&message);
    assert_eq!(event.message(), Some(message.as_str()));
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn test_empty_message_serializes_as_null_string() {
    let mut event = LogEvent::new();
    event.set_message("");
    event.set_log_level("INFO");
    event.set_timestamp(1_000);

    assert_eq!(
        partial(&event),
        r#"{"message":"null","level":"INFO","timestamp":1}"#
    );
}

#[test]
fn test_unset_required_fields_serialize_as_null_string() {
    let event = LogEvent::new();
    assert_eq!(
        partial(&event),
        r#"{"message":"null","level":"null","timestamp":0}"#
    );
}

#[test]
fn test_all_fields_in_order() {
    let mut event = LogEvent::new();
    event.set_message("hello");
    event.set_log_level("ERROR");
    event.set_trace_id("trace-1");
    event.set_span_id("span-1");
    event.set_guid("guid-1");
    event.set_entity_name("My App");
    event.set_hostname("web-01");
    event.set_timestamp(1_700_000_000_000_000);

    assert_eq!(
        partial(&event),
        concat!(
            r#"{"message":"hello","level":"ERROR","trace.id":"trace-1","span.id":"span-1","#,
            r#""entity.guid":"guid-1","entity.name":"My App","hostname":"web-01","#,
            r#""timestamp":1700000000000}"#
        )
    );
}

#[test]
fn test_empty_optional_fields_are_skipped() {
    let mut event = LogEvent::new();
    event.set_message("hi");
    event.set_log_level("WARN");
    event.set_trace_id("");
    event.set_hostname("host");

    assert_eq!(
        partial(&event),
        r#"{"message":"hi","level":"WARN","hostname":"host","timestamp":0}"#
    );
}

#[test]
fn test_to_json_wraps_in_brackets() {
    let mut event = LogEvent::new();
    event.set_message("x");
    event.set_log_level("INFO");

    assert_eq!(
        event.to_json(),
        r#"[{"message":"x","level":"INFO","timestamp":0}]"#
    );
}

#[test]
fn test_write_json_appends() {
    let mut event = LogEvent::new();
    event.set_log_level("INFO");

    let mut buf = String::from("prefix:");
    event.write_json(&mut buf, true);
    assert!(buf.starts_with("prefix:{"));
}

#[test]
fn test_write_json_array_joins_partials() {
    let mut a = LogEvent::new();
    a.set_message("a");
    a.set_log_level("INFO");
    let mut b = LogEvent::new();
    b.set_message("b");
    b.set_log_level("DEBUG");

    let mut buf = String::new();
    write_json_array(&[a, b], &mut buf);

    assert_eq!(
        buf,
        concat!(
            r#"[{"message":"a","level":"INFO","timestamp":0},"#,
            r#"{"message":"b","level":"DEBUG","timestamp":0}]"#
        )
    );

    let mut empty = String::new();
    write_json_array(&[], &mut empty);
    assert_eq!(empty, "[]");
}

// =============================================================================
// Clone
// =============================================================================

#[test]
fn test_clone_is_independent() {
    let mut original = LogEvent::new();
    original.set_message("original");
    original.set_log_level("INFO");
    original.set_guid("guid");
    original.set_priority(7);

    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.set_message("changed");
    assert_eq!(original.message(), Some("original"));
    assert_eq!(copy.message(), Some("changed"));

    drop(original);
    assert_eq!(copy.guid(), Some("guid"));
    assert_eq!(copy.priority(), 7);
}
