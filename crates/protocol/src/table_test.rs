//! Tests for the bounds-checked table reader

use crate::builder::FlatBuilder;
use crate::error::ProtocolError;
use crate::table::{FlatTable, read_u16, read_u32, read_u64};

/// Table with a string at 0, a u32 at 1 and a nested table at 2
fn sample_table() -> Vec<u8> {
    let mut fb = FlatBuilder::new();

    fb.start_table(1);
    fb.add_u16(0, 99, 0);
    let child = fb.end_table();

    let name = fb.create_string("hello");

    fb.start_table(4);
    fb.add_offset(0, name);
    fb.add_u32(1, 0, 1);
    fb.add_offset(2, child);
    let root = fb.end_table();
    fb.finish(root).to_vec()
}

// =============================================================================
// Read helpers
// =============================================================================

#[test]
fn test_read_u16() {
    let buf = [0x34, 0x12, 0x00];
    assert_eq!(read_u16(&buf, 0).unwrap(), 0x1234);
}

#[test]
fn test_read_u32() {
    let buf = [0x78, 0x56, 0x34, 0x12];
    assert_eq!(read_u32(&buf, 0).unwrap(), 0x1234_5678);
}

#[test]
fn test_read_u64() {
    let buf = 0x0102_0304_0506_0708u64.to_le_bytes();
    assert_eq!(read_u64(&buf, 0).unwrap(), 0x0102_0304_0506_0708);
}

#[test]
fn test_read_past_end_is_error() {
    let buf = [1, 2, 3];
    assert!(matches!(
        read_u32(&buf, 0),
        Err(ProtocolError::MessageTooShort { expected: 4, actual: 3 })
    ));
    assert!(read_u16(&buf, 2).is_err());
}

// =============================================================================
// Absent vs zero
// =============================================================================

#[test]
fn test_zero_value_is_present() {
    let buf = sample_table();
    let table = FlatTable::root(&buf).unwrap();

    // Default was 1, so a 0 is written and must read back as Some(0)
    assert_eq!(table.read_u32(1), Some(0));
}

#[test]
fn test_absent_field_is_none() {
    let buf = sample_table();
    let table = FlatTable::root(&buf).unwrap();

    assert!(!table.has_field(3));
    assert_eq!(table.read_u32(3), None);
    assert_eq!(table.read_string(3).unwrap(), None);
    assert!(table.read_table(3).unwrap().is_none());
    assert_eq!(table.read_vector_len(3).unwrap(), None);
}

#[test]
fn test_field_index_beyond_vtable_is_none() {
    let buf = sample_table();
    let table = FlatTable::root(&buf).unwrap();

    assert_eq!(table.read_u64(500), None);
    assert_eq!(table.read_bytes(500).unwrap(), None);
}

// =============================================================================
// Offsets
// =============================================================================

#[test]
fn test_read_string_and_nested_table() {
    let buf = sample_table();
    let table = FlatTable::root(&buf).unwrap();

    assert_eq!(table.read_string(0).unwrap(), Some("hello"));

    let child = table.read_table(2).unwrap().unwrap();
    assert_eq!(child.read_u16(0), Some(99));
    assert!(child.position() > table.position());
    assert_eq!(child.raw_bytes().len(), buf.len());
}

#[test]
fn test_invalid_utf8_string_is_error() {
    let mut fb = FlatBuilder::new();
    let bytes = fb.create_bytes(&[0xff, 0xfe]);
    fb.start_table(1);
    fb.add_offset(0, bytes);
    let root = fb.end_table();
    let buf = fb.finish(root);

    let table = FlatTable::root(&buf).unwrap();
    assert_eq!(table.read_bytes(0).unwrap(), Some(&[0xff, 0xfe][..]));
    assert!(matches!(
        table.read_string(0),
        Err(ProtocolError::InvalidFlatBuffer(_))
    ));
}

// =============================================================================
// Corrupt input
// =============================================================================

#[test]
fn test_table_offset_past_end_is_error() {
    let buf = [0u8; 8];
    assert!(FlatTable::parse(&buf, 6).is_err());
    assert!(FlatTable::parse(&buf, 100).is_err());
}

#[test]
fn test_vtable_underflow_is_error() {
    // soffset larger than the table position
    let mut buf = vec![0u8; 16];
    buf[8..12].copy_from_slice(&100i32.to_le_bytes());
    assert!(matches!(
        FlatTable::parse(&buf, 8),
        Err(ProtocolError::InvalidFlatBuffer(_))
    ));
}

#[test]
fn test_vtable_size_too_small_is_error() {
    // vtable at 0 declaring size 2
    let mut buf = vec![0u8; 16];
    buf[0..2].copy_from_slice(&2u16.to_le_bytes());
    buf[2..4].copy_from_slice(&4u16.to_le_bytes());
    buf[8..12].copy_from_slice(&8i32.to_le_bytes());
    assert!(FlatTable::parse(&buf, 8).is_err());
}

#[test]
fn test_table_size_past_end_is_error() {
    let mut buf = vec![0u8; 16];
    buf[0..2].copy_from_slice(&4u16.to_le_bytes());
    buf[2..4].copy_from_slice(&64u16.to_le_bytes());
    buf[8..12].copy_from_slice(&8i32.to_le_bytes());
    assert!(FlatTable::parse(&buf, 8).is_err());
}

#[test]
fn test_truncated_buffer_fails_offset_reads() {
    let buf = sample_table();
    let root = FlatTable::root(&buf).unwrap();
    let root_pos = root.position();

    // Cut the buffer right after the root table: the string lives past it
    let cut = &buf[..root_pos + 16];
    match FlatTable::root(cut) {
        Ok(table) => assert!(table.read_string(0).is_err()),
        Err(err) => assert!(err.is_malformed()),
    }
}

#[test]
fn test_vector_length_past_end_is_error() {
    let mut fb = FlatBuilder::new();
    let vector = fb.create_vector_of_tables(&[]);
    fb.start_table(1);
    fb.add_offset(0, vector);
    let root = fb.end_table();
    let mut buf = fb.finish(root).to_vec();

    // The empty vector is the last thing in the buffer; claim a huge length
    let len = buf.len();
    buf[len - 4..].copy_from_slice(&1_000_000u32.to_le_bytes());

    let table = FlatTable::root(&buf).unwrap();
    assert!(table.read_vector_of_tables(0).is_err());
}
