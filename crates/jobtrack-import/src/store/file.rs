use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jobtrack_model::Application;
use tracing::debug;

use super::RecordStore;
use crate::error::{StoreError, StoreResult};

/// A store kept as a pretty-printed JSON array on disk.
///
/// Changes stay in memory until [`flush`](RecordStore::flush), which writes
/// a sibling temporary file and renames it over the store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<Application>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Format {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), records = records.len(), "opened record store");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileStore {
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

    fn flush(&mut self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.records).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;
        let temp = self.temp_path();
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&temp, json).map_err(io_error)?;
        fs::rename(&temp, &self.path).map_err(io_error)?;
        debug!(path = %self.path.display(), records = self.records.len(), "flushed record store");
        Ok(())
    }
}
