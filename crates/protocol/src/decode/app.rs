//! App (registration request) view
//!
//! # Schema Reference (protocol.fbs)
//!
//! ```text
//! table App {
//!     license:string (id: 0);
//!     appname:string (id: 1);
//!     agent_language:string (id: 2);
//!     agent_version:string (id: 3);
//!     high_security:bool (id: 4);
//!     redirect_collector:string (id: 5);
//!     environment:string (id: 6);            // JSON
//!     settings:string (id: 7);               // JSON
//!     labels:string (id: 8);                 // JSON
//!     display_host:string (id: 9);
//!     security_policy_token:string (id: 10);
//!     supported_security_policies:string (id: 11); // JSON
//!     host:string (id: 12);
//!     trace_observer_host:string (id: 13);
//!     trace_observer_port:uint16 (id: 14);
//!     span_queue_size:uint64 (id: 15);
//!     span_events_max_samples_stored:uint64 (id: 16);
//!     metadata:string (id: 17);              // JSON
//!     log_events_max_samples_stored:uint64 (id: 18);
//!     custom_events_max_samples_stored:uint64 (id: 19);
//! }
//! ```

use crate::Result;
use crate::schema::app;
use crate::table::FlatTable;

/// View of an `App` table
#[derive(Debug, Clone, Copy)]
pub struct AppView<'a> {
    table: FlatTable<'a>,
}

impl<'a> AppView<'a> {
    pub(crate) fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    /// Underlying table
    #[inline]
    pub fn table(&self) -> FlatTable<'a> {
        self.table
    }

    pub fn license(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::LICENSE)
    }

    pub fn appname(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::APPNAME)
    }

    pub fn agent_language(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::AGENT_LANGUAGE)
    }

    pub fn agent_version(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::AGENT_VERSION)
    }

    pub fn high_security(&self) -> Option<bool> {
        self.table.read_bool(app::HIGH_SECURITY)
    }

    pub fn redirect_collector(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::REDIRECT_COLLECTOR)
    }

    pub fn environment(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::ENVIRONMENT)
    }

    pub fn settings(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::SETTINGS)
    }

    pub fn labels(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::LABELS)
    }

    pub fn display_host(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::DISPLAY_HOST)
    }

    pub fn security_policy_token(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::SECURITY_POLICY_TOKEN)
    }

    pub fn supported_security_policies(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::SUPPORTED_SECURITY_POLICIES)
    }

    /// System host name of the agent
    pub fn host(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::HOST)
    }

    pub fn trace_observer_host(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::TRACE_OBSERVER_HOST)
    }

    pub fn trace_observer_port(&self) -> Option<u16> {
        self.table.read_u16(app::TRACE_OBSERVER_PORT)
    }

    pub fn span_queue_size(&self) -> Option<u64> {
        self.table.read_u64(app::SPAN_QUEUE_SIZE)
    }

    pub fn span_events_max_samples_stored(&self) -> Option<u64> {
        self.table.read_u64(app::SPAN_EVENTS_MAX_SAMPLES_STORED)
    }

    pub fn metadata(&self) -> Result<Option<&'a str>> {
        self.table.read_string(app::METADATA)
    }

    pub fn log_events_max_samples_stored(&self) -> Option<u64> {
        self.table.read_u64(app::LOG_EVENTS_MAX_SAMPLES_STORED)
    }

    pub fn custom_events_max_samples_stored(&self) -> Option<u64> {
        self.table.read_u64(app::CUSTOM_EVENTS_MAX_SAMPLES_STORED)
    }
}
