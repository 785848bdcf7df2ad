//! FlatBuffer table builder
//!
//! Builds messages back to front, the way FlatBuffers does: children are
//! written first and every build step returns a [`WireOffset`] that a parent
//! table can reference. Because the parent is written after its children,
//! all offsets on the wire point forward.
//!
//! # Wire Format
//!
//! ```text
//! [root offset:u32] -> [vtable][table][children...]
//!
//! vtable: [vtable_size:u16][table_size:u16][field offsets:u16...]
//! table:  [soffset:i32 (table - soffset = vtable)][inline fields...]
//! vector: [length:u32][elements...]
//! string: [length:u32][utf-8 bytes][0]
//! ```
//!
//! The builder is schema-blind: it stores scalars, strings, byte vectors,
//! structs and offsets under whatever slot index the caller passes. Slot
//! numbers live in [`crate::schema`].
//!
//! # Usage
//!
//! ```
//! use relay_protocol::FlatBuilder;
//!
//! let mut fb = FlatBuilder::new();
//! let name = fb.create_string("WebTransaction/index");
//! fb.start_table(2);
//! fb.add_offset(0, name);
//! fb.add_u64(1, 42, 0);
//! let root = fb.end_table();
//! let bytes = fb.finish(root);
//! assert!(bytes.len() > 4);
//! ```

use bytes::Bytes;

/// Default initial buffer size (1KB)
const DEFAULT_CAPACITY: usize = 1024;

/// Size of a uoffset/soffset/vector length on the wire
const SIZE_U32: usize = 4;

/// Handle to an object already written into a [`FlatBuilder`]
///
/// The value is the object's distance from the end of the buffer, which does
/// not change as more data is prepended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireOffset(u32);

impl WireOffset {
    /// Raw distance from the end of the buffer
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Back-to-front FlatBuffer builder
///
/// Owns its growable output buffer until [`FlatBuilder::finish`] hands the
/// completed message to the caller.
#[derive(Debug)]
pub struct FlatBuilder {
    /// Backing storage; written bytes occupy `buf[head..]`
    buf: Vec<u8>,
    head: usize,
    /// Largest alignment requested so far, applied to the root on finish
    min_align: usize,
    /// Field locations of the table under construction (0 = absent)
    fields: Vec<u32>,
    /// Used size when the current table was started
    table_start: Option<usize>,
}

impl FlatBuilder {
    /// Create a builder with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a builder with room for `capacity` bytes before growing
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(SIZE_U32 * 4);
        Self {
            buf: vec![0; capacity],
            head: capacity,
            min_align: 1,
            fields: Vec::new(),
            table_start: None,
        }
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - self.head
    }

    /// Check if nothing has been written yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Raw writes
    // =========================================================================

    /// Make room for `additional` bytes in front of the current head
    fn ensure(&mut self, additional: usize) {
        if self.head >= additional {
            return;
        }

        let used = self.len();
        let mut capacity = self.buf.len().max(DEFAULT_CAPACITY) * 2;
        while capacity < used + additional {
            capacity *= 2;
        }

        let mut grown = vec![0u8; capacity];
        grown[capacity - used..].copy_from_slice(&self.buf[self.head..]);
        self.head = capacity - used;
        self.buf = grown;
    }

    fn pad(&mut self, n: usize) {
        self.ensure(n);
        self.head -= n;
        self.buf[self.head..self.head + n].fill(0);
    }

    /// Pad so that after `additional` more bytes the buffer is aligned to `size`
    fn prep(&mut self, size: usize, additional: usize) {
        if size > self.min_align {
            self.min_align = size;
        }
        let padding = (self.len() + additional).wrapping_neg() & (size - 1);
        self.pad(padding);
    }

    fn prepend(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.head -= bytes.len();
        self.buf[self.head..self.head + bytes.len()].copy_from_slice(bytes);
    }

    /// Write a forward uoffset pointing at an already written object
    fn prepend_uoffset(&mut self, target: WireOffset) {
        self.prep(SIZE_U32, 0);
        let rel = (self.len() + SIZE_U32) as u32 - target.0;
        self.prepend(&rel.to_le_bytes());
    }

    // =========================================================================
    // Strings, vectors
    // =========================================================================

    /// Write a NUL-terminated, length-prefixed string
    pub fn create_string(&mut self, value: &str) -> WireOffset {
        debug_assert!(self.table_start.is_none(), "string created inside a table");
        self.prep(SIZE_U32, value.len() + 1);
        self.prepend(&[0]);
        self.prepend(value.as_bytes());
        self.prepend(&(value.len() as u32).to_le_bytes());
        WireOffset(self.len() as u32)
    }

    /// Write a length-prefixed byte vector
    pub fn create_bytes(&mut self, value: &[u8]) -> WireOffset {
        debug_assert!(self.table_start.is_none(), "vector created inside a table");
        self.prep(SIZE_U32, value.len());
        self.prepend(value);
        self.prepend(&(value.len() as u32).to_le_bytes());
        WireOffset(self.len() as u32)
    }

    /// Write a vector of offsets to tables, preserving the slice order
    pub fn create_vector_of_tables(&mut self, tables: &[WireOffset]) -> WireOffset {
        debug_assert!(self.table_start.is_none(), "vector created inside a table");
        self.prep(SIZE_U32, SIZE_U32 * tables.len());
        for &table in tables.iter().rev() {
            self.prepend_uoffset(table);
        }
        self.prepend(&(tables.len() as u32).to_le_bytes());
        WireOffset(self.len() as u32)
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Begin a table with `num_fields` vtable slots
    ///
    /// Strings, vectors and child tables must be created before this call.
    pub fn start_table(&mut self, num_fields: usize) {
        debug_assert!(self.table_start.is_none(), "nested table construction");
        self.fields.clear();
        self.fields.resize(num_fields, 0);
        self.table_start = Some(self.len());
    }

    /// Record the location of the value just written for `field`
    fn slot(&mut self, field: usize) {
        debug_assert!(field < self.fields.len(), "field {field} outside table");
        let location = self.len() as u32;
        if let Some(slot) = self.fields.get_mut(field) {
            *slot = location;
        }
    }

    /// Add a u8 field, omitted when equal to `default`
    pub fn add_u8(&mut self, field: usize, value: u8, default: u8) {
        if value == default {
            return;
        }
        self.prep(1, 0);
        self.prepend(&[value]);
        self.slot(field);
    }

    /// Add an i8 field, omitted when equal to `default`
    pub fn add_i8(&mut self, field: usize, value: i8, default: i8) {
        self.add_u8(field, value as u8, default as u8);
    }

    /// Add a bool field, omitted when equal to `default`
    pub fn add_bool(&mut self, field: usize, value: bool, default: bool) {
        self.add_u8(field, u8::from(value), u8::from(default));
    }

    /// Add a u16 field, omitted when equal to `default`
    pub fn add_u16(&mut self, field: usize, value: u16, default: u16) {
        if value == default {
            return;
        }
        self.prep(2, 0);
        self.prepend(&value.to_le_bytes());
        self.slot(field);
    }

    /// Add an i32 field, omitted when equal to `default`
    pub fn add_i32(&mut self, field: usize, value: i32, default: i32) {
        if value == default {
            return;
        }
        self.prep(4, 0);
        self.prepend(&value.to_le_bytes());
        self.slot(field);
    }

    /// Add a u32 field, omitted when equal to `default`
    pub fn add_u32(&mut self, field: usize, value: u32, default: u32) {
        if value == default {
            return;
        }
        self.prep(4, 0);
        self.prepend(&value.to_le_bytes());
        self.slot(field);
    }

    /// Add a u64 field, omitted when equal to `default`
    pub fn add_u64(&mut self, field: usize, value: u64, default: u64) {
        if value == default {
            return;
        }
        self.prep(8, 0);
        self.prepend(&value.to_le_bytes());
        self.slot(field);
    }

    /// Add an f64 field, omitted when bit-identical to `default`
    pub fn add_f64(&mut self, field: usize, value: f64, default: f64) {
        if value.to_bits() == default.to_bits() {
            return;
        }
        self.prep(8, 0);
        self.prepend(&value.to_le_bytes());
        self.slot(field);
    }

    /// Add an offset to a string, vector or table written earlier
    pub fn add_offset(&mut self, field: usize, value: WireOffset) {
        self.prepend_uoffset(value);
        self.slot(field);
    }

    /// Add an inline struct, stored verbatim at the given alignment
    pub fn add_struct(&mut self, field: usize, bytes: &[u8], align: usize) {
        self.prep(align, bytes.len());
        self.prepend(bytes);
        self.slot(field);
    }

    /// Finish the current table and write its vtable in front of it
    pub fn end_table(&mut self) -> WireOffset {
        let start = self.table_start.take().unwrap_or(self.len());

        // soffset placeholder, patched once the vtable position is known
        self.prep(SIZE_U32, 0);
        self.prepend(&0i32.to_le_bytes());
        let object_offset = self.len();

        // Trailing absent fields are trimmed from the vtable
        let present = self
            .fields
            .iter()
            .rposition(|&location| location != 0)
            .map_or(0, |last| last + 1);

        for i in (0..present).rev() {
            let voffset = match self.fields[i] {
                0 => 0u16,
                location => (object_offset - location as usize) as u16,
            };
            self.prepend(&voffset.to_le_bytes());
        }

        let table_size = (object_offset - start) as u16;
        self.prepend(&table_size.to_le_bytes());
        let vtable_size = ((present + 2) * 2) as u16;
        self.prepend(&vtable_size.to_le_bytes());
        let vtable_offset = self.len();

        let soffset = (vtable_offset - object_offset) as i32;
        let pos = self.buf.len() - object_offset;
        self.buf[pos..pos + SIZE_U32].copy_from_slice(&soffset.to_le_bytes());

        self.fields.clear();
        WireOffset(object_offset as u32)
    }

    /// Write the root offset and hand back the finished message
    pub fn finish(mut self, root: WireOffset) -> Bytes {
        debug_assert!(self.table_start.is_none(), "finish called inside a table");
        self.prep(self.min_align, SIZE_U32);
        self.prepend_uoffset(root);
        Bytes::from(self.buf.split_off(self.head))
    }
}

impl Default for FlatBuilder {
    fn default() -> Self {
        Self::new()
    }
}
