//! Message validation
//!
//! The only gate between untrusted daemon bytes and [`FlatTable`]. Every
//! decode path runs [`check_message`] before reading a single field.
//!
//! # Checks
//!
//! 1. Size bound: at least [`MIN_MESSAGE_SIZE`] bytes (root offset plus the
//!    smallest possible empty message)
//! 2. Root offset: must leave room for that minimum trailing structure, i.e.
//!    `root_offset <= len - MIN_MESSAGE_SIZE`
//!
//! Neither check parses the message; structural problems beyond these are
//! caught by the bounds-checked accessors.
//!
//! [`FlatTable`]: crate::FlatTable

use tracing::debug;

use crate::table::read_u32;
use crate::{MIN_MESSAGE_SIZE, ProtocolError, Result};

/// Validate a raw message buffer, reporting why it was rejected
///
/// # Errors
///
/// - [`ProtocolError::MessageTooShort`] if the buffer is under the minimum size
/// - [`ProtocolError::InvalidRootOffset`] if the root offset leaves no room
///   for the smallest valid table
pub fn check_message(buf: &[u8]) -> Result<()> {
    if buf.len() < MIN_MESSAGE_SIZE {
        debug!(len = buf.len(), min = MIN_MESSAGE_SIZE, "message too small");
        return Err(ProtocolError::too_short(MIN_MESSAGE_SIZE, buf.len()));
    }

    let root_offset = read_u32(buf, 0)? as usize;

    if root_offset > buf.len() - MIN_MESSAGE_SIZE {
        debug!(root_offset, len = buf.len(), "message root offset is too large");
        return Err(ProtocolError::invalid_root_offset(root_offset, buf.len()));
    }

    Ok(())
}

/// Check whether a raw message buffer may be decoded
///
/// Never partially parses; returns `false` for anything [`check_message`]
/// rejects.
#[inline]
pub fn is_valid_message(buf: &[u8]) -> bool {
    check_message(buf).is_ok()
}
