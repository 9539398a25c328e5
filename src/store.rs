//! The loaded dataset.

use std::sync::Arc;

use crate::processing::year_extent;
use crate::types::{Record, YearRange};

/// Immutable, shared record storage.
///
/// Cloning a store is cheap; every clone sees the same records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[Record]>,
    extent: Option<YearRange>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let extent = year_extent(&records, |r| r.accession_year);
        Self {
            records: records.into(),
            extent,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest accession year, `None` for an empty store.
    pub fn year_extent(&self) -> Option<YearRange> {
        self.extent
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
