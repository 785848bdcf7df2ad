//! Transaction payload views
//!
//! # Schema Reference (protocol.fbs)
//!
//! ```text
//! table Transaction {
//!     name:string (id: 0);
//!     uri:string (id: 1);
//!     synthetics_resource_id:string (id: 2);
//!     pid:int (id: 3);
//!     txn_event:Event (id: 4);
//!     metrics:[Metric] (id: 5);
//!     errors:[Error] (id: 6);
//!     slow_sqls:[SlowSQL] (id: 7);
//!     custom_events:[Event] (id: 8);
//!     trace:Trace (id: 9);
//!     error_events:[Event] (id: 10);
//!     sampling_priority:double (id: 11);
//!     span_events:[Event] (id: 12);
//!     log_events:[Event] (id: 13);
//! }
//! table Event { data:[ubyte] (id: 0); }
//! table Error { priority:int (id: 0); data:[ubyte] (id: 1); }
//! table Metric { name:string (id: 0); data:MetricData (id: 1); }
//! table SlowSQL {
//!     id:uint (id: 0); count:int (id: 1);
//!     total_micros:ulong (id: 2); min_micros:ulong (id: 3); max_micros:ulong (id: 4);
//!     metric:string (id: 5); query:string (id: 6); params:string (id: 7);
//! }
//! table Trace {
//!     timestamp:double (id: 0); duration:double (id: 1); guid:string (id: 2);
//!     force_persist:bool (id: 3); data:[ubyte] (id: 4);
//! }
//! ```

use super::tables_or_empty;
use crate::Result;
use crate::schema::{error, event, metric, metric_data, slowsql, trace, transaction};
use crate::table::FlatTable;
use crate::txn::MetricData;

// =============================================================================
// Transaction
// =============================================================================

/// View of a `Transaction` table
#[derive(Debug, Clone, Copy)]
pub struct TransactionView<'a> {
    table: FlatTable<'a>,
}

impl<'a> TransactionView<'a> {
    pub(crate) fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    /// Underlying table
    #[inline]
    pub fn table(&self) -> FlatTable<'a> {
        self.table
    }

    pub fn name(&self) -> Result<Option<&'a str>> {
        self.table.read_string(transaction::NAME)
    }

    pub fn uri(&self) -> Result<Option<&'a str>> {
        self.table.read_string(transaction::URI)
    }

    pub fn synthetics_resource_id(&self) -> Result<Option<&'a str>> {
        self.table.read_string(transaction::SYNTHETICS_RESOURCE_ID)
    }

    pub fn pid(&self) -> Option<i32> {
        self.table.read_i32(transaction::PID)
    }

    pub fn txn_event(&self) -> Result<Option<EventView<'a>>> {
        Ok(self
            .table
            .read_table(transaction::TXN_EVENT)?
            .map(EventView::new))
    }

    pub fn metrics(&self) -> Result<Vec<MetricView<'a>>> {
        Ok(tables_or_empty(&self.table, transaction::METRICS)?
            .into_iter()
            .map(MetricView::new)
            .collect())
    }

    pub fn errors(&self) -> Result<Vec<ErrorView<'a>>> {
        Ok(tables_or_empty(&self.table, transaction::ERRORS)?
            .into_iter()
            .map(ErrorView::new)
            .collect())
    }

    pub fn slowsqls(&self) -> Result<Vec<SlowSqlView<'a>>> {
        Ok(tables_or_empty(&self.table, transaction::SLOW_SQLS)?
            .into_iter()
            .map(SlowSqlView::new)
            .collect())
    }

    pub fn custom_events(&self) -> Result<Vec<EventView<'a>>> {
        self.events(transaction::CUSTOM_EVENTS)
    }

    pub fn trace(&self) -> Result<Option<TraceView<'a>>> {
        Ok(self.table.read_table(transaction::TRACE)?.map(TraceView::new))
    }

    pub fn error_events(&self) -> Result<Vec<EventView<'a>>> {
        self.events(transaction::ERROR_EVENTS)
    }

    pub fn sampling_priority(&self) -> Option<f64> {
        self.table.read_f64(transaction::SAMPLING_PRIORITY)
    }

    pub fn span_events(&self) -> Result<Vec<EventView<'a>>> {
        self.events(transaction::SPAN_EVENTS)
    }

    /// Number of encoded span events, without visiting them
    pub fn span_event_count(&self) -> Result<usize> {
        Ok(self
            .table
            .read_vector_len(transaction::SPAN_EVENTS)?
            .unwrap_or(0))
    }

    pub fn log_events(&self) -> Result<Vec<EventView<'a>>> {
        self.events(transaction::LOG_EVENTS)
    }

    fn events(&self, field_index: usize) -> Result<Vec<EventView<'a>>> {
        Ok(tables_or_empty(&self.table, field_index)?
            .into_iter()
            .map(EventView::new)
            .collect())
    }
}

// =============================================================================
// Nested tables
// =============================================================================

/// View of an `Event` table (pre-rendered JSON)
#[derive(Debug, Clone, Copy)]
pub struct EventView<'a> {
    table: FlatTable<'a>,
}

impl<'a> EventView<'a> {
    fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn data(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(event::DATA)
    }
}

/// View of an `Error` table
#[derive(Debug, Clone, Copy)]
pub struct ErrorView<'a> {
    table: FlatTable<'a>,
}

impl<'a> ErrorView<'a> {
    fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn priority(&self) -> Option<i32> {
        self.table.read_i32(error::PRIORITY)
    }

    pub fn data(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(error::DATA)
    }
}

/// View of a `Metric` table
#[derive(Debug, Clone, Copy)]
pub struct MetricView<'a> {
    table: FlatTable<'a>,
}

impl<'a> MetricView<'a> {
    fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn name(&self) -> Result<Option<&'a str>> {
        self.table.read_string(metric::NAME)
    }

    /// Fixed-layout metric values
    pub fn data(&self) -> Result<Option<MetricData>> {
        Ok(self
            .table
            .read_struct::<{ metric_data::SIZE }>(metric::DATA)?
            .map(MetricData::from_bytes))
    }
}

/// View of a `SlowSQL` table
#[derive(Debug, Clone, Copy)]
pub struct SlowSqlView<'a> {
    table: FlatTable<'a>,
}

impl<'a> SlowSqlView<'a> {
    fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn id(&self) -> Option<u32> {
        self.table.read_u32(slowsql::ID)
    }

    pub fn count(&self) -> Option<i32> {
        self.table.read_i32(slowsql::COUNT)
    }

    pub fn total_micros(&self) -> Option<u64> {
        self.table.read_u64(slowsql::TOTAL_MICROS)
    }

    pub fn min_micros(&self) -> Option<u64> {
        self.table.read_u64(slowsql::MIN_MICROS)
    }

    pub fn max_micros(&self) -> Option<u64> {
        self.table.read_u64(slowsql::MAX_MICROS)
    }

    pub fn metric(&self) -> Result<Option<&'a str>> {
        self.table.read_string(slowsql::METRIC)
    }

    pub fn query(&self) -> Result<Option<&'a str>> {
        self.table.read_string(slowsql::QUERY)
    }

    pub fn params(&self) -> Result<Option<&'a str>> {
        self.table.read_string(slowsql::PARAMS)
    }
}

/// View of a `Trace` table
#[derive(Debug, Clone, Copy)]
pub struct TraceView<'a> {
    table: FlatTable<'a>,
}

impl<'a> TraceView<'a> {
    fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn timestamp(&self) -> Option<f64> {
        self.table.read_f64(trace::TIMESTAMP)
    }

    pub fn duration(&self) -> Option<f64> {
        self.table.read_f64(trace::DURATION)
    }

    pub fn guid(&self) -> Result<Option<&'a str>> {
        self.table.read_string(trace::GUID)
    }

    pub fn force_persist(&self) -> Option<bool> {
        self.table.read_bool(trace::FORCE_PERSIST)
    }

    pub fn data(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(trace::DATA)
    }
}
