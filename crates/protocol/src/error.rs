//! Protocol error types
//!
//! Errors that can occur when validating or decoding messages exchanged with
//! the daemon. Encoding never fails: builders only write into growable memory.

use thiserror::Error;

use crate::schema::MessageBodyType;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Message is too short to contain the root offset and an empty message
    #[error("message too short: expected at least {expected} bytes, got {actual}")]
    MessageTooShort { expected: usize, actual: usize },

    /// Root offset points outside the usable part of the buffer
    #[error("root offset {offset} is out of range for a {len} byte message")]
    InvalidRootOffset { offset: usize, len: usize },

    /// Invalid FlatBuffer structure (vtable, vector or string out of bounds)
    #[error("invalid flatbuffer: {0}")]
    InvalidFlatBuffer(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Message body is not the type the caller asked for
    #[error("unexpected message body: expected {expected}, got {actual}")]
    UnexpectedBody {
        expected: MessageBodyType,
        actual: MessageBodyType,
    },

    /// The connect reply blob is not valid JSON
    #[error("invalid connect reply: {0}")]
    InvalidConnectReply(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Create a message too short error
    #[inline]
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::MessageTooShort { expected, actual }
    }

    /// Create an invalid root offset error
    #[inline]
    pub fn invalid_root_offset(offset: usize, len: usize) -> Self {
        Self::InvalidRootOffset { offset, len }
    }

    /// Create an invalid flatbuffer error
    #[inline]
    pub fn invalid_flatbuffer(msg: impl Into<String>) -> Self {
        Self::InvalidFlatBuffer(msg.into())
    }

    /// Create a missing field error
    #[inline]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Create an unexpected body error
    #[inline]
    pub fn unexpected_body(expected: MessageBodyType, actual: MessageBodyType) -> Self {
        Self::UnexpectedBody { expected, actual }
    }

    /// Check if this error means the bytes themselves are malformed
    ///
    /// Malformed input should be dropped by the transport. The remaining
    /// errors describe well-formed messages with unusable content.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MessageTooShort { .. } | Self::InvalidRootOffset { .. } | Self::InvalidFlatBuffer(_)
        )
    }
}
