use jobtrack_model::Application;

use super::RecordStore;
use crate::error::StoreResult;

/// A store held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    records: Vec<Application>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Application>) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn records(&self) -> &[Application] {
        &self.records
    }

    fn insert(&mut self, record: Application) -> StoreResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.records.clear();
        Ok(())
    }
}
