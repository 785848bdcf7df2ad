//! Schema constants for the agent/daemon protocol
//!
//! Field indices are vtable slot numbers and are part of the wire contract
//! with the daemon (`protocol.fbs`). They must never be renumbered; new fields
//! are only ever appended.

/// Message body union selector (matches `union MessageBody`)
///
/// NOTE: These values are used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageBodyType {
    None = 0,
    App = 1,
    AppReply = 2,
    Transaction = 3,
    SpanBatch = 4,
}

impl MessageBodyType {
    /// Parse body type from raw byte value
    ///
    /// Unknown values map to `None` so that newer daemons cannot make an
    /// older agent misinterpret a payload.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::App,
            2 => Self::AppReply,
            3 => Self::Transaction,
            4 => Self::SpanBatch,
            _ => Self::None,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the string name of this body type
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::App => "app",
            Self::AppReply => "app_reply",
            Self::Transaction => "transaction",
            Self::SpanBatch => "span_batch",
        }
    }
}

impl std::fmt::Display for MessageBodyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application status reported by the daemon (matches `enum AppStatus`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AppStatus {
    Unknown = 0,
    Disconnected = 1,
    InvalidLicense = 2,
    Connected = 3,
    StillValid = 4,
}

impl AppStatus {
    /// Parse status from raw byte value
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Disconnected,
            2 => Self::InvalidLicense,
            3 => Self::Connected,
            4 => Self::StillValid,
            _ => Self::Unknown,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Terminal states need no follow-up registration
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Connected | Self::InvalidLicense)
    }

    /// Get the string name of this status
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Disconnected => "disconnected",
            Self::InvalidLicense => "invalid_license",
            Self::Connected => "connected",
            Self::StillValid => "still_valid",
        }
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// table Message
pub mod message {
    pub const AGENT_RUN_ID: usize = 0;
    pub const DATA_TYPE: usize = 1;
    pub const DATA: usize = 2;
    pub const NUM_FIELDS: usize = 3;
}

/// table App
pub mod app {
    pub const LICENSE: usize = 0;
    pub const APPNAME: usize = 1;
    pub const AGENT_LANGUAGE: usize = 2;
    pub const AGENT_VERSION: usize = 3;
    pub const HIGH_SECURITY: usize = 4;
    pub const REDIRECT_COLLECTOR: usize = 5;
    pub const ENVIRONMENT: usize = 6;
    pub const SETTINGS: usize = 7;
    pub const LABELS: usize = 8;
    pub const DISPLAY_HOST: usize = 9;
    pub const SECURITY_POLICY_TOKEN: usize = 10;
    pub const SUPPORTED_SECURITY_POLICIES: usize = 11;
    pub const HOST: usize = 12;
    pub const TRACE_OBSERVER_HOST: usize = 13;
    pub const TRACE_OBSERVER_PORT: usize = 14;
    pub const SPAN_QUEUE_SIZE: usize = 15;
    pub const SPAN_EVENTS_MAX_SAMPLES_STORED: usize = 16;
    pub const METADATA: usize = 17;
    pub const LOG_EVENTS_MAX_SAMPLES_STORED: usize = 18;
    pub const CUSTOM_EVENTS_MAX_SAMPLES_STORED: usize = 19;
    pub const NUM_FIELDS: usize = 20;
}

/// table AppReply
pub mod app_reply {
    pub const STATUS: usize = 0;
    pub const CONNECT_REPLY: usize = 1;
    pub const SECURITY_POLICIES: usize = 2;
    pub const CONNECT_TIMESTAMP: usize = 3;
    pub const HARVEST_FREQUENCY: usize = 4;
    pub const SAMPLING_TARGET: usize = 5;
    pub const NUM_FIELDS: usize = 6;
}

/// table Transaction
pub mod transaction {
    pub const NAME: usize = 0;
    pub const URI: usize = 1;
    pub const SYNTHETICS_RESOURCE_ID: usize = 2;
    pub const PID: usize = 3;
    pub const TXN_EVENT: usize = 4;
    pub const METRICS: usize = 5;
    pub const ERRORS: usize = 6;
    pub const SLOW_SQLS: usize = 7;
    pub const CUSTOM_EVENTS: usize = 8;
    pub const TRACE: usize = 9;
    pub const ERROR_EVENTS: usize = 10;
    pub const SAMPLING_PRIORITY: usize = 11;
    pub const SPAN_EVENTS: usize = 12;
    pub const LOG_EVENTS: usize = 13;
    pub const NUM_FIELDS: usize = 14;
}

/// table Event
pub mod event {
    pub const DATA: usize = 0;
    pub const NUM_FIELDS: usize = 1;
}

/// table Error
pub mod error {
    pub const PRIORITY: usize = 0;
    pub const DATA: usize = 1;
    pub const NUM_FIELDS: usize = 2;
}

/// table Metric
pub mod metric {
    pub const NAME: usize = 0;
    pub const DATA: usize = 1;
    pub const NUM_FIELDS: usize = 2;
}

/// struct MetricData (byte offsets, not slots)
pub mod metric_data {
    pub const COUNT: usize = 0;
    pub const TOTAL: usize = 8;
    pub const EXCLUSIVE: usize = 16;
    pub const MIN: usize = 24;
    pub const MAX: usize = 32;
    pub const SUM_OF_SQUARES: usize = 40;
    pub const SCOPED: usize = 48;
    pub const FORCED: usize = 49;
    /// Struct size including trailing padding to its 8-byte alignment
    pub const SIZE: usize = 56;
    pub const ALIGN: usize = 8;
}

/// table SlowSQL
pub mod slowsql {
    pub const ID: usize = 0;
    pub const COUNT: usize = 1;
    pub const TOTAL_MICROS: usize = 2;
    pub const MIN_MICROS: usize = 3;
    pub const MAX_MICROS: usize = 4;
    pub const METRIC: usize = 5;
    pub const QUERY: usize = 6;
    pub const PARAMS: usize = 7;
    pub const NUM_FIELDS: usize = 8;
}

/// table Trace
pub mod trace {
    pub const TIMESTAMP: usize = 0;
    pub const DURATION: usize = 1;
    pub const GUID: usize = 2;
    pub const FORCE_PERSIST: usize = 3;
    pub const DATA: usize = 4;
    pub const NUM_FIELDS: usize = 5;
}

/// table SpanBatch
pub mod span_batch {
    pub const COUNT: usize = 0;
    pub const ENCODED: usize = 1;
    pub const NUM_FIELDS: usize = 2;
}
