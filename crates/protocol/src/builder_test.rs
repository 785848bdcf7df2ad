//! Tests for the FlatBuffer table builder
//!
//! Byte-level checks pin the layout; the rest read back through `FlatTable`.

use crate::builder::FlatBuilder;
use crate::table::FlatTable;

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_single_u8_table_layout() {
    let mut fb = FlatBuilder::new();
    fb.start_table(2);
    fb.add_u8(0, 7, 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    #[rustfmt::skip]
    let expected: [u8; 20] = [
        12, 0, 0, 0,        // root offset -> table at 12
        0, 0,               // padding
        6, 0, 8, 0, 7, 0,   // vtable: size 6, table size 8, field 0 at +7
        6, 0, 0, 0,         // soffset: vtable is 6 bytes before the table
        0, 0, 0, 7,         // padding, then the u8
    ];
    assert_eq!(&bytes[..], &expected);
}

#[test]
fn test_finished_length_is_aligned() {
    let mut fb = FlatBuilder::new();
    let name = fb.create_string("abc");
    fb.start_table(2);
    fb.add_offset(0, name);
    fb.add_u64(1, 1, 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    assert_eq!(bytes.len() % 8, 0);
}

#[test]
fn test_string_is_nul_terminated() {
    let mut fb = FlatBuilder::new();
    let s = fb.create_string("hi");
    fb.start_table(1);
    fb.add_offset(0, s);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    let value = table.read_bytes(0).unwrap().unwrap();
    assert_eq!(value, b"hi");

    // A NUL follows the last string byte
    let end = bytes.len() - bytes.iter().rev().position(|&b| b == b'i').unwrap();
    assert_eq!(bytes[end], 0);
}

// =============================================================================
// Scalars and defaults
// =============================================================================

#[test]
fn test_scalar_equal_to_default_is_omitted() {
    let mut fb = FlatBuilder::new();
    fb.start_table(4);
    fb.add_u8(0, 0, 0);
    fb.add_u16(1, 5, 5);
    fb.add_i32(2, -1, -1);
    fb.add_u64(3, 9, 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert!(!table.has_field(0));
    assert!(!table.has_field(1));
    assert!(!table.has_field(2));
    assert_eq!(table.read_u64(3), Some(9));
}

#[test]
fn test_scalar_roundtrip_all_widths() {
    let mut fb = FlatBuilder::new();
    fb.start_table(8);
    fb.add_f64(0, 3.25, 0.0);
    fb.add_u64(1, u64::MAX, 0);
    fb.add_i32(2, -42, 0);
    fb.add_u32(3, 0xdead_beef, 0);
    fb.add_u16(4, 8080, 0);
    fb.add_u8(5, 200, 0);
    fb.add_i8(6, -3, 0);
    fb.add_bool(7, true, false);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert_eq!(table.read_f64(0), Some(3.25));
    assert_eq!(table.read_u64(1), Some(u64::MAX));
    assert_eq!(table.read_i32(2), Some(-42));
    assert_eq!(table.read_u32(3), Some(0xdead_beef));
    assert_eq!(table.read_u16(4), Some(8080));
    assert_eq!(table.read_u8(5), Some(200));
    assert_eq!(table.read_i8(6), Some(-3));
    assert_eq!(table.read_bool(7), Some(true));
}

#[test]
fn test_f64_negative_zero_differs_from_default() {
    let mut fb = FlatBuilder::new();
    fb.start_table(1);
    fb.add_f64(0, -0.0, 0.0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    let value = table.read_f64(0).unwrap();
    assert!(value.is_sign_negative());
}

#[test]
fn test_trailing_absent_fields_are_trimmed() {
    let mut fb = FlatBuilder::new();
    fb.start_table(10);
    fb.add_u8(1, 1, 0);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert_eq!(table.read_u8(1), Some(1));
    assert_eq!(table.read_u8(9), None);

    // vtable = size, table size, slots 0 and 1
    let root_offset = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let soffset = i32::from_le_bytes(bytes[root_offset..root_offset + 4].try_into().unwrap());
    let vtable = root_offset - soffset as usize;
    let vtable_size = u16::from_le_bytes(bytes[vtable..vtable + 2].try_into().unwrap());
    assert_eq!(vtable_size, 8);
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn test_nested_tables_in_vector_keep_order() {
    let mut fb = FlatBuilder::new();

    let children: Vec<_> = (1..=3u32)
        .map(|i| {
            fb.start_table(1);
            fb.add_u32(0, i, 0);
            fb.end_table()
        })
        .collect();
    let vector = fb.create_vector_of_tables(&children);

    fb.start_table(1);
    fb.add_offset(0, vector);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    let values: Vec<_> = table
        .read_vector_of_tables(0)
        .unwrap()
        .unwrap()
        .iter()
        .map(|t| t.read_u32(0))
        .collect();
    assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn test_empty_vector_of_tables() {
    let mut fb = FlatBuilder::new();
    let vector = fb.create_vector_of_tables(&[]);
    fb.start_table(1);
    fb.add_offset(0, vector);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert_eq!(table.read_vector_len(0).unwrap(), Some(0));
    assert!(table.read_vector_of_tables(0).unwrap().unwrap().is_empty());
}

#[test]
fn test_struct_is_stored_verbatim() {
    let payload: [u8; 16] = std::array::from_fn(|i| i as u8 + 1);

    let mut fb = FlatBuilder::new();
    fb.start_table(2);
    fb.add_struct(1, &payload, 8);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert_eq!(table.read_struct::<16>(1).unwrap(), Some(&payload));
    assert_eq!(table.read_struct::<16>(0).unwrap(), None);
}

#[test]
fn test_growth_preserves_content() {
    let long = "x".repeat(5000);

    let mut fb = FlatBuilder::with_capacity(16);
    let s = fb.create_string(&long);
    fb.start_table(1);
    fb.add_offset(0, s);
    let root = fb.end_table();
    let bytes = fb.finish(root);

    let table = FlatTable::root(&bytes).unwrap();
    assert_eq!(table.read_string(0).unwrap(), Some(long.as_str()));
}

#[test]
fn test_len_tracks_written_bytes() {
    let mut fb = FlatBuilder::default();
    assert!(fb.is_empty());

    fb.create_bytes(&[1, 2, 3, 4]);
    assert_eq!(fb.len(), 8);
}
