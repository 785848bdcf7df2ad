//! FlatBuffer table reader
//!
//! Schema-blind, bounds-checked access to a table inside a borrowed buffer.
//! Every read is checked against the buffer: invalid offsets return errors
//! rather than panicking or reading out of bounds.
//!
//! Scalars come back as `Option`, where `None` means the field is absent from
//! the vtable. Absent is not the same as zero; callers pick their own default.

use crate::{ProtocolError, Result};

/// Read-only view of one table in a FlatBuffer
#[derive(Debug, Clone, Copy)]
pub struct FlatTable<'a> {
    buf: &'a [u8],
    table_offset: usize,
    vtable_offset: usize,
    vtable_fields: usize,
    table_size: usize,
}

impl<'a> FlatTable<'a> {
    /// Parse the root table of a message
    ///
    /// Callers handling untrusted bytes should run
    /// [`crate::validate::check_message`] first.
    pub fn root(buf: &'a [u8]) -> Result<Self> {
        let root_offset = read_u32(buf, 0)? as usize;
        Self::parse(buf, root_offset)
    }

    /// Parse a table at the given offset
    pub fn parse(buf: &'a [u8], table_offset: usize) -> Result<Self> {
        if table_offset + 4 > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "table offset {} exceeds buffer length {}",
                table_offset,
                buf.len()
            )));
        }

        // FlatBuffers spec: vtable_location = table_location - soffset
        let vtable_soffset = read_i32(buf, table_offset)?;
        let vtable_offset = if vtable_soffset >= 0 {
            table_offset
                .checked_sub(vtable_soffset as usize)
                .ok_or_else(|| ProtocolError::invalid_flatbuffer("vtable offset underflow"))?
        } else {
            // Negative soffset means vtable is after table (rare but valid)
            table_offset + vtable_soffset.unsigned_abs() as usize
        };

        if vtable_offset + 4 > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer("vtable out of bounds"));
        }

        let vtable_size = read_u16(buf, vtable_offset)? as usize;
        if vtable_size < 4 || vtable_offset + vtable_size > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "invalid vtable size {} at offset {}",
                vtable_size, vtable_offset
            )));
        }

        let table_size = read_u16(buf, vtable_offset + 2)? as usize;
        if table_size < 4 || table_offset + table_size > buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "invalid table size {} at offset {}",
                table_size, table_offset
            )));
        }

        // vtable layout: [vtable_size:u16][table_size:u16][field_offsets:u16...]
        let vtable_fields = (vtable_size - 4) / 2;

        Ok(Self {
            buf,
            table_offset,
            vtable_offset,
            vtable_fields,
            table_size,
        })
    }

    /// Get the raw buffer this table lives in
    #[inline]
    pub fn raw_bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// Absolute position of this table within the buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.table_offset
    }

    /// Get field offset from vtable, or None if field not present
    fn field_offset(&self, field_index: usize) -> Option<usize> {
        if field_index >= self.vtable_fields {
            return None;
        }

        let slot_offset = self.vtable_offset + 4 + (field_index * 2);
        let field_offset = read_u16(self.buf, slot_offset).ok()? as usize;

        // 0 means absent; anything past the inline table is treated the same
        if field_offset == 0 || field_offset >= self.table_size {
            None
        } else {
            Some(self.table_offset + field_offset)
        }
    }

    /// Check whether a field is present
    #[inline]
    pub fn has_field(&self, field_index: usize) -> bool {
        self.field_offset(field_index).is_some()
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    /// Read u8 field
    pub fn read_u8(&self, field_index: usize) -> Option<u8> {
        self.field_offset(field_index)
            .and_then(|off| self.buf.get(off).copied())
    }

    /// Read i8 field
    pub fn read_i8(&self, field_index: usize) -> Option<i8> {
        self.read_u8(field_index).map(|v| v as i8)
    }

    /// Read bool field (any non-zero byte is true)
    pub fn read_bool(&self, field_index: usize) -> Option<bool> {
        self.read_u8(field_index).map(|v| v != 0)
    }

    /// Read u16 field
    pub fn read_u16(&self, field_index: usize) -> Option<u16> {
        self.field_offset(field_index)
            .and_then(|off| read_u16(self.buf, off).ok())
    }

    /// Read i32 field
    pub fn read_i32(&self, field_index: usize) -> Option<i32> {
        self.field_offset(field_index)
            .and_then(|off| read_i32(self.buf, off).ok())
    }

    /// Read u32 field
    pub fn read_u32(&self, field_index: usize) -> Option<u32> {
        self.field_offset(field_index)
            .and_then(|off| read_u32(self.buf, off).ok())
    }

    /// Read u64 field
    pub fn read_u64(&self, field_index: usize) -> Option<u64> {
        self.field_offset(field_index)
            .and_then(|off| read_u64(self.buf, off).ok())
    }

    /// Read f64 (double) field
    pub fn read_f64(&self, field_index: usize) -> Option<f64> {
        self.field_offset(field_index)
            .and_then(|off| read_f64(self.buf, off).ok())
    }

    /// Read an inline struct of `N` bytes
    pub fn read_struct<const N: usize>(&self, field_index: usize) -> Result<Option<&'a [u8; N]>> {
        let Some(offset) = self.field_offset(field_index) else {
            return Ok(None);
        };

        let bytes = slice_at(self.buf, offset, N)?;
        bytes
            .try_into()
            .map(Some)
            .map_err(|_| ProtocolError::invalid_flatbuffer("struct length mismatch"))
    }

    // =========================================================================
    // Offsets: strings, vectors, tables
    // =========================================================================

    /// Follow the uoffset stored in a field to its absolute target
    fn follow(&self, field_index: usize) -> Result<Option<usize>> {
        let Some(field_offset) = self.field_offset(field_index) else {
            return Ok(None);
        };

        let rel = read_u32(self.buf, field_offset)? as usize;
        let target = field_offset + rel;
        if target + 4 > self.buf.len() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "offset target {} exceeds buffer length {}",
                target,
                self.buf.len()
            )));
        }

        Ok(Some(target))
    }

    /// Read bytes vector
    pub fn read_bytes(&self, field_index: usize) -> Result<Option<&'a [u8]>> {
        let Some(vector_offset) = self.follow(field_index)? else {
            return Ok(None);
        };

        let length = read_u32(self.buf, vector_offset)? as usize;
        slice_at(self.buf, vector_offset + 4, length).map(Some)
    }

    /// Read string field
    pub fn read_string(&self, field_index: usize) -> Result<Option<&'a str>> {
        let Some(bytes) = self.read_bytes(field_index)? else {
            return Ok(None);
        };

        std::str::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ProtocolError::invalid_flatbuffer("invalid UTF-8 string"))
    }

    /// Read nested table field
    pub fn read_table(&self, field_index: usize) -> Result<Option<FlatTable<'a>>> {
        let Some(table_offset) = self.follow(field_index)? else {
            return Ok(None);
        };

        FlatTable::parse(self.buf, table_offset).map(Some)
    }

    /// Read the element count of a vector field without touching elements
    pub fn read_vector_len(&self, field_index: usize) -> Result<Option<usize>> {
        let Some(vector_offset) = self.follow(field_index)? else {
            return Ok(None);
        };

        read_u32(self.buf, vector_offset).map(|len| Some(len as usize))
    }

    /// Read vector of tables
    pub fn read_vector_of_tables(&self, field_index: usize) -> Result<Option<Vec<FlatTable<'a>>>> {
        let Some(vector_offset) = self.follow(field_index)? else {
            return Ok(None);
        };

        let length = read_u32(self.buf, vector_offset)? as usize;
        let data_start = vector_offset + 4;

        // Each element is a 4-byte offset to a table
        slice_at(self.buf, data_start, length.saturating_mul(4))?;

        let mut tables = Vec::with_capacity(length);

        for i in 0..length {
            let elem_offset_pos = data_start + i * 4;
            let elem_rel = read_u32(self.buf, elem_offset_pos)? as usize;
            let table = FlatTable::parse(self.buf, elem_offset_pos + elem_rel)?;
            tables.push(table);
        }

        Ok(Some(tables))
    }
}

// =============================================================================
// Read Helpers
// =============================================================================

/// Borrow `len` bytes at `offset`, or fail if they extend past the buffer
#[inline]
fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or_else(|| {
            ProtocolError::invalid_flatbuffer(format!(
                "data extends past buffer: {} + {} > {}",
                offset,
                len,
                buf.len()
            ))
        })
}

#[inline]
fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    buf.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| ProtocolError::too_short(offset + N, buf.len()))
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    read_array(buf, offset).map(u16::from_le_bytes)
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    read_array(buf, offset).map(u32::from_le_bytes)
}

#[inline]
pub(crate) fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    read_array(buf, offset).map(i32::from_le_bytes)
}

#[inline]
pub(crate) fn read_u64(buf: &[u8], offset: usize) -> Result<u64> {
    read_array(buf, offset).map(u64::from_le_bytes)
}

#[inline]
pub(crate) fn read_f64(buf: &[u8], offset: usize) -> Result<f64> {
    read_array(buf, offset).map(f64::from_le_bytes)
}
