pub mod demo;
pub mod json_file;

pub use demo::{demo_records, seed_if_empty};
pub use json_file::JsonFileScanStore;

use crate::model::{RiskLevel, ScanRecord};
use anyhow::Result;

/// Write-once scan history. Listings are newest first by timestamp.
pub trait ScanStore {
    fn append(&mut self, record: ScanRecord) -> Result<()>;

    fn list(&self) -> Result<Vec<ScanRecord>>;

    fn get(&self, id: &str) -> Result<Option<ScanRecord>>;

    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryScanStore {
    records: Vec<ScanRecord>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records in any order.
    pub fn from_records(records: Vec<ScanRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Build from a listing that is already newest first, such as a saved
    /// history. Equal timestamps keep their given order.
    pub fn from_newest_first(mut records: Vec<ScanRecord>) -> Self {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { records }
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&mut self, record: ScanRecord) {
        // Ties go in front of older appends.
        let position = self
            .records
            .iter()
            .position(|existing| existing.timestamp <= record.timestamp)
            .unwrap_or(self.records.len());
        self.records.insert(position, record);
    }
}

impl ScanStore for MemoryScanStore {
    fn append(&mut self, record: ScanRecord) -> Result<()> {
        log::debug!("Storing scan {} ({})", record.id, record.risk_level());
        self.insert(record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScanRecord>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> Result<Option<ScanRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn clear(&mut self) -> Result<()> {
        log::debug!("Clearing {} stored scans", self.records.len());
        self.records.clear();
        Ok(())
    }
}

/// Risk filter plus free-text search over subject and sender fields.
#[derive(Debug, Default, Clone)]
pub struct ScanQuery {
    pub risk_level: Option<RiskLevel>,
    pub search: Option<String>,
}

impl ScanQuery {
    pub fn matches(&self, record: &ScanRecord) -> bool {
        if let Some(level) = self.risk_level {
            if record.risk_level() != level {
                return false;
            }
        }

        match self.search.as_deref() {
            Some(search) if !search.is_empty() => {
                let query = search.to_lowercase();
                record.subject.to_lowercase().contains(&query)
                    || record.sender.to_lowercase().contains(&query)
                    || record.sender_name.to_lowercase().contains(&query)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, records: &'a [ScanRecord]) -> Vec<&'a ScanRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
