//! Mapping Repository for persisting and reusing reviewed mappings.
//!
//! A user who has reviewed and corrected a mapping for one export format
//! can save it under a name and re-apply it to later files of that format.
//!
//! # Storage Format
//!
//! Each mapping is a pretty-printed JSON file named `{name}.json` inside the
//! repository directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use jobtrack_model::FieldMapping;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MappingError, Result};

const MAPPING_FORMAT_VERSION: &str = "1.0";

/// A named mapping with repository metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMapping {
    pub name: String,
    pub mappings: Vec<FieldMapping>,
    pub saved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    MAPPING_FORMAT_VERSION.to_string()
}

impl StoredMapping {
    pub fn new(name: impl Into<String>, mappings: Vec<FieldMapping>) -> Self {
        Self {
            name: name.into(),
            mappings,
            saved_at: Utc::now(),
            description: None,
            version: default_version(),
        }
    }

    /// Add a description to this stored mapping.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Directory-backed store of named mappings.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    /// Opens a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| MappingError::RepositoryIo {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a mapping, replacing any mapping with the same name.
    pub fn save(&self, stored: &StoredMapping) -> Result<PathBuf> {
        let path = self.mapping_path(&stored.name);
        let json = serde_json::to_string_pretty(stored).map_err(|source| {
            MappingError::RepositoryFormat {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| MappingError::RepositoryIo {
            path: path.clone(),
            source,
        })?;
        debug!(name = %stored.name, path = %path.display(), "saved mapping");
        Ok(path)
    }

    /// Loads a mapping by name; `None` when it was never saved.
    pub fn load(&self, name: &str) -> Result<Option<StoredMapping>> {
        let path = self.mapping_path(name);
        if !path.exists() {
            return Ok(None);
        }
        read_stored(&path).map(Some)
    }

    /// Names of all saved mappings, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|source| MappingError::RepositoryIo {
            path: self.base_dir.clone(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| MappingError::RepositoryIo {
                path: self.base_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes a saved mapping. Returns false when it did not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.mapping_path(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| MappingError::RepositoryIo { path, source })?;
        Ok(true)
    }

    fn mapping_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_name(name)))
    }
}

fn read_stored(path: &Path) -> Result<StoredMapping> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| MappingError::RepositoryFormat {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| MappingError::RepositoryIo {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingFile {
    Stored(StoredMapping),
    Bare(Vec<FieldMapping>),
}

/// Reads mappings from a JSON file outside any repository.
///
/// Accepts either a saved [`StoredMapping`] document or a bare array of
/// `{ "sourceColumn", "targetField" }` entries.
pub fn load_mapping_file(path: &Path) -> Result<Vec<FieldMapping>> {
    let content = read_file(path)?;
    let parsed: MappingFile =
        serde_json::from_str(&content).map_err(|source| MappingError::RepositoryFormat {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match parsed {
        MappingFile::Stored(stored) => stored.mappings,
        MappingFile::Bare(mappings) => mappings,
    })
}

/// Keeps file names portable: anything but ASCII alphanumerics, `-` and `_`
/// becomes `_`.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "mapping".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_name("LinkedIn export"), "LinkedIn_export");
        assert_eq!(sanitize_name("../etc"), "___etc");
        assert_eq!(sanitize_name("  "), "mapping");
    }
}
