use std::sync::Arc;

use crate::{QaRecord, ResultSet};

/// Holder for the latest analysis results.
///
/// Writes swap the whole snapshot; readers get an `Arc` clone, so a reader
/// never observes a half-replaced sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultStore {
    records: ResultSet,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `records` as the new snapshot and returns it.
    pub fn replace(&mut self, records: Vec<QaRecord>) -> ResultSet {
        self.records = Arc::from(records);
        self.records.clone()
    }

    pub fn clear(&mut self) {
        self.records = Arc::from(Vec::new());
    }

    pub fn current(&self) -> ResultSet {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
