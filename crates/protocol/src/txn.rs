//! Transaction records handed to the encoder
//!
//! These are already-collected values: the encoder lays them out on the wire
//! without reordering, sampling or recomputing anything. Event payloads
//! (transaction event, custom events, error events, span events) arrive as
//! pre-rendered JSON.

use crate::LogEvent;
use crate::schema::metric_data;

/// Fixed-layout metric values (`struct MetricData`)
///
/// The byte layout is part of the wire contract and never shifts:
///
/// ```text
/// @0  count          f64
/// @8  total          f64
/// @16 exclusive      f64
/// @24 min            f64
/// @32 max            f64
/// @40 sum_of_squares f64
/// @48 scoped         u8
/// @49 forced         u8
/// @50 padding to 56
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricData {
    pub count: f64,
    pub total: f64,
    pub exclusive: f64,
    pub min: f64,
    pub max: f64,
    pub sum_of_squares: f64,
    pub scoped: bool,
    pub forced: bool,
}

impl MetricData {
    /// Serialize to the fixed wire layout
    pub fn to_bytes(&self) -> [u8; metric_data::SIZE] {
        let mut bytes = [0u8; metric_data::SIZE];
        for (offset, value) in [
            (metric_data::COUNT, self.count),
            (metric_data::TOTAL, self.total),
            (metric_data::EXCLUSIVE, self.exclusive),
            (metric_data::MIN, self.min),
            (metric_data::MAX, self.max),
            (metric_data::SUM_OF_SQUARES, self.sum_of_squares),
        ] {
            bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        }
        bytes[metric_data::SCOPED] = u8::from(self.scoped);
        bytes[metric_data::FORCED] = u8::from(self.forced);
        bytes
    }

    /// Deserialize from the fixed wire layout
    pub fn from_bytes(bytes: &[u8; metric_data::SIZE]) -> Self {
        let f64_at = |offset: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[offset..offset + 8]);
            f64::from_le_bytes(raw)
        };

        Self {
            count: f64_at(metric_data::COUNT),
            total: f64_at(metric_data::TOTAL),
            exclusive: f64_at(metric_data::EXCLUSIVE),
            min: f64_at(metric_data::MIN),
            max: f64_at(metric_data::MAX),
            sum_of_squares: f64_at(metric_data::SUM_OF_SQUARES),
            scoped: bytes[metric_data::SCOPED] != 0,
            forced: bytes[metric_data::FORCED] != 0,
        }
    }
}

/// A named metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub data: MetricData,
}

/// A traced error: priority plus its JSON rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub priority: i32,
    pub data: String,
}

/// A slow SQL record, durations in microseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlowSqlRecord {
    pub id: u32,
    pub count: i32,
    pub total_micros: u64,
    pub min_micros: u64,
    pub max_micros: u64,
    pub metric: String,
    pub query: String,
    pub params: String,
}

/// A transaction trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceRecord {
    /// Start time (milliseconds since epoch)
    pub timestamp: f64,
    /// Duration (milliseconds)
    pub duration: f64,
    pub guid: String,
    pub force_persist: bool,
    /// Pre-encoded trace JSON
    pub data: String,
}

/// A completed transaction, ready to encode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxnRecord {
    pub name: String,
    pub request_uri: Option<String>,
    pub synthetics_resource_id: Option<String>,
    pub pid: i32,
    /// Transaction analytics event JSON, if one is to be sent
    pub txn_event: Option<String>,
    pub metrics: Vec<MetricRecord>,
    pub errors: Vec<ErrorRecord>,
    pub slowsqls: Vec<SlowSqlRecord>,
    pub custom_events: Vec<String>,
    pub trace: Option<TraceRecord>,
    pub error_events: Vec<String>,
    pub sampling_priority: f64,
    /// Span event JSON, highest priority first
    pub span_events: Vec<String>,
    /// Log events, highest priority first
    pub log_events: Vec<LogEvent>,
}
