use super::{MemoryScanStore, ScanStore};
use crate::model::ScanRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Scan history persisted as a JSON array, rewritten after every change.
#[derive(Debug)]
pub struct JsonFileScanStore {
    path: PathBuf,
    inner: MemoryScanStore,
}

impl JsonFileScanStore {
    /// Open the store at `path`; a missing file starts an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scan store: {}", path.display()))?;
            let records: Vec<ScanRecord> = if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Corrupt scan store: {}", path.display()))?
            };
            log::debug!("Loaded {} scans from {}", records.len(), path.display());
            MemoryScanStore::from_newest_first(records)
        } else {
            log::warn!(
                "Scan store {} not found, starting with empty history",
                path.display()
            );
            MemoryScanStore::new()
        };

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `next` to disk, then make it the live state. On a failed write
    /// the previous state stays in place.
    fn commit(&mut self, next: MemoryScanStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(next.records())?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write scan store: {}", self.path.display()))?;
        self.inner = next;
        Ok(())
    }
}

impl ScanStore for JsonFileScanStore {
    fn append(&mut self, record: ScanRecord) -> Result<()> {
        let mut next = self.inner.clone();
        next.append(record)?;
        self.commit(next)
    }

    fn list(&self) -> Result<Vec<ScanRecord>> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> Result<Option<ScanRecord>> {
        self.inner.get(id)
    }

    fn clear(&mut self) -> Result<()> {
        let mut next = self.inner.clone();
        next.clear()?;
        self.commit(next)
    }
}
