//! AppReply view
//!
//! # Schema Reference (protocol.fbs)
//!
//! ```text
//! table AppReply {
//!     status:AppStatus (id: 0);
//!     connect_reply:[ubyte] (id: 1);     // collector connect response, JSON
//!     security_policies:[ubyte] (id: 2); // JSON
//!     connect_timestamp:uint64 (id: 3);
//!     harvest_frequency:uint16 (id: 4);
//!     sampling_target:uint16 (id: 5);
//! }
//! ```

use crate::Result;
use crate::schema::{AppStatus, app_reply};
use crate::table::FlatTable;

/// View of an `AppReply` table
#[derive(Debug, Clone, Copy)]
pub struct AppReplyView<'a> {
    table: FlatTable<'a>,
}

impl<'a> AppReplyView<'a> {
    pub(crate) fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    /// Application status; absent or unrecognized values read as `Unknown`
    pub fn status(&self) -> AppStatus {
        self.table
            .read_u8(app_reply::STATUS)
            .map_or(AppStatus::Unknown, AppStatus::from_u8)
    }

    pub fn connect_reply(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(app_reply::CONNECT_REPLY)
    }

    pub fn security_policies(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(app_reply::SECURITY_POLICIES)
    }

    pub fn connect_timestamp(&self) -> Option<u64> {
        self.table.read_u64(app_reply::CONNECT_TIMESTAMP)
    }

    /// Seconds between harvests
    pub fn harvest_frequency(&self) -> Option<u16> {
        self.table.read_u16(app_reply::HARVEST_FREQUENCY)
    }

    pub fn sampling_target(&self) -> Option<u16> {
        self.table.read_u16(app_reply::SAMPLING_TARGET)
    }
}
