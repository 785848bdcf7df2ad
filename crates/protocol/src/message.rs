//! Message envelope
//!
//! Every message exchanged with the daemon is a `Message` table:
//!
//! ```text
//! table Message {
//!     agent_run_id:string (id: 0);   // absent before the app is connected
//!     data_type:MessageBody (id: 1); // union selector
//!     data:table (id: 2);            // App | AppReply | Transaction | SpanBatch
//! }
//! ```
//!
//! On the wire the payload is an integer tag plus an untyped offset. Here it
//! is a sum type on both sides, so a message always carries exactly one
//! payload of the type its tag names.

use bytes::Bytes;

use crate::builder::{FlatBuilder, WireOffset};
use crate::decode::{AppReplyView, AppView, SpanBatchView, TransactionView};
use crate::schema::{MessageBodyType, message};
use crate::table::FlatTable;
use crate::validate::check_message;
use crate::{ProtocolError, Result};

/// A finished payload table, tagged with its body type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    App(WireOffset),
    AppReply(WireOffset),
    Transaction(WireOffset),
    SpanBatch(WireOffset),
}

impl Payload {
    /// Union selector written to `data_type`
    #[inline]
    pub const fn body_type(self) -> MessageBodyType {
        match self {
            Self::App(_) => MessageBodyType::App,
            Self::AppReply(_) => MessageBodyType::AppReply,
            Self::Transaction(_) => MessageBodyType::Transaction,
            Self::SpanBatch(_) => MessageBodyType::SpanBatch,
        }
    }

    #[inline]
    const fn offset(self) -> WireOffset {
        match self {
            Self::App(off) | Self::AppReply(off) | Self::Transaction(off) | Self::SpanBatch(off) => off,
        }
    }
}

/// Wrap a payload in a `Message` table and finish the buffer
pub fn finish_message(mut fb: FlatBuilder, agent_run_id: Option<&str>, payload: Payload) -> Bytes {
    let run_id = agent_run_id.map(|id| fb.create_string(id));

    fb.start_table(message::NUM_FIELDS);
    fb.add_offset(message::DATA, payload.offset());
    if let Some(run_id) = run_id {
        fb.add_offset(message::AGENT_RUN_ID, run_id);
    }
    fb.add_u8(
        message::DATA_TYPE,
        payload.body_type().as_u8(),
        MessageBodyType::None.as_u8(),
    );
    let root = fb.end_table();

    fb.finish(root)
}

/// Decoded message payload
#[derive(Debug, Clone, Copy)]
pub enum MessageBody<'a> {
    None,
    App(AppView<'a>),
    AppReply(AppReplyView<'a>),
    Transaction(TransactionView<'a>),
    SpanBatch(SpanBatchView<'a>),
}

impl MessageBody<'_> {
    /// Union selector of this payload
    #[inline]
    pub const fn body_type(&self) -> MessageBodyType {
        match self {
            Self::None => MessageBodyType::None,
            Self::App(_) => MessageBodyType::App,
            Self::AppReply(_) => MessageBodyType::AppReply,
            Self::Transaction(_) => MessageBodyType::Transaction,
            Self::SpanBatch(_) => MessageBodyType::SpanBatch,
        }
    }
}

/// Zero-copy view of a validated message
///
/// # Example
///
/// ```ignore
/// let msg = Message::parse(&bytes)?;
/// if let MessageBody::AppReply(reply) = msg.body() {
///     println!("status: {}", reply.status());
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    agent_run_id: Option<&'a str>,
    body: MessageBody<'a>,
}

impl<'a> Message<'a> {
    /// Validate and parse a message
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer fails validation, the root table is
    /// malformed, or the tag names a payload that is missing.
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        check_message(buf)?;

        let root = FlatTable::root(buf)?;
        let agent_run_id = root.read_string(message::AGENT_RUN_ID)?;
        let body_type = MessageBodyType::from_u8(
            root.read_u8(message::DATA_TYPE)
                .unwrap_or(MessageBodyType::None.as_u8()),
        );

        let body = match body_type {
            MessageBodyType::None => MessageBody::None,
            tagged => {
                let data = root
                    .read_table(message::DATA)?
                    .ok_or(ProtocolError::missing_field("data"))?;
                match tagged {
                    MessageBodyType::App => MessageBody::App(AppView::new(data)),
                    MessageBodyType::AppReply => MessageBody::AppReply(AppReplyView::new(data)),
                    MessageBodyType::Transaction => {
                        MessageBody::Transaction(TransactionView::new(data))
                    }
                    MessageBodyType::SpanBatch => MessageBody::SpanBatch(SpanBatchView::new(data)),
                    MessageBodyType::None => MessageBody::None,
                }
            }
        };

        Ok(Self { agent_run_id, body })
    }

    /// Agent run id, absent before the application is connected
    #[inline]
    pub fn agent_run_id(&self) -> Option<&'a str> {
        self.agent_run_id
    }

    #[inline]
    pub fn body(&self) -> MessageBody<'a> {
        self.body
    }

    #[inline]
    pub fn body_type(&self) -> MessageBodyType {
        self.body.body_type()
    }

    /// Get the App payload, or an error naming the actual body type
    pub fn app(&self) -> Result<AppView<'a>> {
        match self.body {
            MessageBody::App(app) => Ok(app),
            other => Err(ProtocolError::unexpected_body(MessageBodyType::App, other.body_type())),
        }
    }

    /// Get the AppReply payload, or an error naming the actual body type
    pub fn app_reply(&self) -> Result<AppReplyView<'a>> {
        match self.body {
            MessageBody::AppReply(reply) => Ok(reply),
            other => Err(ProtocolError::unexpected_body(
                MessageBodyType::AppReply,
                other.body_type(),
            )),
        }
    }

    /// Get the Transaction payload, or an error naming the actual body type
    pub fn transaction(&self) -> Result<TransactionView<'a>> {
        match self.body {
            MessageBody::Transaction(txn) => Ok(txn),
            other => Err(ProtocolError::unexpected_body(
                MessageBodyType::Transaction,
                other.body_type(),
            )),
        }
    }

    /// Get the SpanBatch payload, or an error naming the actual body type
    pub fn span_batch(&self) -> Result<SpanBatchView<'a>> {
        match self.body {
            MessageBody::SpanBatch(batch) => Ok(batch),
            other => Err(ProtocolError::unexpected_body(
                MessageBodyType::SpanBatch,
                other.body_type(),
            )),
        }
    }
}
