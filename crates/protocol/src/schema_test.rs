//! Tests for schema constants and enums

use crate::schema::{AppStatus, MessageBodyType, app, metric_data, transaction};

// =============================================================================
// MessageBodyType
// =============================================================================

#[test]
fn test_body_type_wire_values() {
    assert_eq!(MessageBodyType::None.as_u8(), 0);
    assert_eq!(MessageBodyType::App.as_u8(), 1);
    assert_eq!(MessageBodyType::AppReply.as_u8(), 2);
    assert_eq!(MessageBodyType::Transaction.as_u8(), 3);
    assert_eq!(MessageBodyType::SpanBatch.as_u8(), 4);
}

#[test]
fn test_body_type_roundtrip_valid_values() {
    for value in 0..=4u8 {
        assert_eq!(MessageBodyType::from_u8(value).as_u8(), value);
    }
}

#[test]
fn test_body_type_unknown_values_are_none() {
    assert_eq!(MessageBodyType::from_u8(5), MessageBodyType::None);
    assert_eq!(MessageBodyType::from_u8(255), MessageBodyType::None);
}

#[test]
fn test_body_type_display() {
    assert_eq!(MessageBodyType::AppReply.to_string(), "app_reply");
    assert_eq!(format!("{}", MessageBodyType::SpanBatch), "span_batch");
}

// =============================================================================
// AppStatus
// =============================================================================

#[test]
fn test_app_status_wire_values() {
    assert_eq!(AppStatus::Unknown.as_u8(), 0);
    assert_eq!(AppStatus::Disconnected.as_u8(), 1);
    assert_eq!(AppStatus::InvalidLicense.as_u8(), 2);
    assert_eq!(AppStatus::Connected.as_u8(), 3);
    assert_eq!(AppStatus::StillValid.as_u8(), 4);
}

#[test]
fn test_app_status_unknown_values() {
    assert_eq!(AppStatus::from_u8(9), AppStatus::Unknown);
}

#[test]
fn test_app_status_terminal_states() {
    assert!(AppStatus::Connected.is_terminal());
    assert!(AppStatus::InvalidLicense.is_terminal());
    assert!(!AppStatus::StillValid.is_terminal());
    assert!(!AppStatus::Disconnected.is_terminal());
    assert!(!AppStatus::Unknown.is_terminal());
}

#[test]
fn test_app_status_display() {
    assert_eq!(AppStatus::InvalidLicense.to_string(), "invalid_license");
}

// =============================================================================
// Field indices
// =============================================================================

#[test]
fn test_app_field_indices() {
    assert_eq!(app::LICENSE, 0);
    assert_eq!(app::APPNAME, 1);
    assert_eq!(app::HOST, 12);
    assert_eq!(app::TRACE_OBSERVER_PORT, 14);
    assert_eq!(app::CUSTOM_EVENTS_MAX_SAMPLES_STORED, 19);
    assert_eq!(app::NUM_FIELDS, 20);
}

#[test]
fn test_transaction_field_indices() {
    assert_eq!(transaction::NAME, 0);
    assert_eq!(transaction::METRICS, 5);
    assert_eq!(transaction::SAMPLING_PRIORITY, 11);
    assert_eq!(transaction::SPAN_EVENTS, 12);
    assert_eq!(transaction::LOG_EVENTS, 13);
    assert_eq!(transaction::NUM_FIELDS, 14);
}

#[test]
fn test_metric_data_layout() {
    let offsets = [
        metric_data::COUNT,
        metric_data::TOTAL,
        metric_data::EXCLUSIVE,
        metric_data::MIN,
        metric_data::MAX,
        metric_data::SUM_OF_SQUARES,
    ];
    assert_eq!(offsets, [0, 8, 16, 24, 32, 40]);
    assert_eq!(metric_data::SCOPED, 48);
    assert_eq!(metric_data::FORCED, 49);
    assert_eq!(metric_data::SIZE % metric_data::ALIGN, 0);
}
