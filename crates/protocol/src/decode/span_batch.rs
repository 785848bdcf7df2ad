//! SpanBatch view

use crate::Result;
use crate::schema::span_batch;
use crate::table::FlatTable;

/// View of a `SpanBatch` table: a span count plus spans encoded upstream
#[derive(Debug, Clone, Copy)]
pub struct SpanBatchView<'a> {
    table: FlatTable<'a>,
}

impl<'a> SpanBatchView<'a> {
    pub(crate) fn new(table: FlatTable<'a>) -> Self {
        Self { table }
    }

    pub fn count(&self) -> Option<u64> {
        self.table.read_u64(span_batch::COUNT)
    }

    pub fn encoded(&self) -> Result<Option<&'a [u8]>> {
        self.table.read_bytes(span_batch::ENCODED)
    }
}
