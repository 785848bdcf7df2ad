//! Typed views over decoded payload tables
//!
//! Each view wraps a [`FlatTable`] and names its fields after the schema.
//! Views borrow the caller's buffer; nothing is copied until a caller asks
//! for an owned value.
//!
//! # Module Structure
//!
//! - `app` - registration request (`App`)
//! - `app_reply` - daemon reply (`AppReply`)
//! - `transaction` - transaction payload and its nested tables
//! - `span_batch` - pre-encoded span batches
//!
//! # Usage
//!
//! ```ignore
//! use relay_protocol::{Message, MessageBody};
//!
//! let msg = Message::parse(&bytes)?;
//! match msg.body() {
//!     MessageBody::Transaction(txn) => {
//!         for metric in txn.metrics()? {
//!             println!("{}: {:?}", metric.name()?.unwrap_or("-"), metric.data()?);
//!         }
//!     }
//!     MessageBody::AppReply(reply) => println!("status {}", reply.status()),
//!     _ => {}
//! }
//! ```
//!
//! [`FlatTable`]: crate::FlatTable

mod app;
mod app_reply;
mod span_batch;
mod transaction;

pub use app::AppView;
pub use app_reply::AppReplyView;
pub use span_batch::SpanBatchView;
pub use transaction::{ErrorView, EventView, MetricView, SlowSqlView, TraceView, TransactionView};

use crate::Result;
use crate::table::FlatTable;

/// Read a vector of tables, treating an absent vector as empty
fn tables_or_empty<'a>(table: &FlatTable<'a>, field_index: usize) -> Result<Vec<FlatTable<'a>>> {
    Ok(table.read_vector_of_tables(field_index)?.unwrap_or_default())
}
