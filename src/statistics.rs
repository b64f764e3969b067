use crate::model::{RiskLevel, ScanRecord};
use serde::{Deserialize, Serialize};

/// Counts by risk level over a scan history. Derived on demand, never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub safe: usize,
}

impl Stats {
    /// Share of safe scans as a rounded percentage; 0 for an empty history.
    pub fn safe_rate(&self) -> u32 {
        let total = self.total.max(1) as f64;
        ((self.safe as f64 / total) * 100.0).round() as u32
    }

    fn record(&mut self, level: RiskLevel) {
        self.total += 1;
        match level {
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Safe => self.safe += 1,
        }
    }
}

pub fn summarize<'a, I>(records: I) -> Stats
where
    I: IntoIterator<Item = &'a ScanRecord>,
{
    let mut stats = Stats::default();
    for record in records {
        stats.record(record.risk_level());
    }
    stats
}

/// The first `limit` entries of a newest-first listing.
pub fn recent(records: &[ScanRecord], limit: usize) -> &[ScanRecord] {
    &records[..records.len().min(limit)]
}
