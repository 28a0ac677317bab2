//! Reading the files a command works on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use jobtrack_import::{DuplicatePolicy, JsonFileStore, ReconcileOptions, RecordStore, SourceKind};
use jobtrack_map::load_mapping_file;
use jobtrack_model::{Application, FieldMapping};
use jobtrack_validate::ValidationOptions;
use tracing::debug;

/// An import file read into memory.
#[derive(Debug, Clone)]
pub struct ImportInput {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub content: String,
}

/// Reads `path` and settles its format: `format` if given, then the file
/// extension, then the content.
pub fn read_input(path: &Path, format: Option<SourceKind>) -> Result<ImportInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read import file {}", path.display()))?;
    let kind = format.unwrap_or_else(|| SourceKind::detect(path, &content));
    debug!(path = %path.display(), format = %kind, bytes = content.len(), "read import file");
    Ok(ImportInput {
        path: path.to_path_buf(),
        kind,
        content,
    })
}

/// Records already in the store at `path`; none when no store is given.
pub fn read_existing(path: Option<&Path>) -> Result<Vec<Application>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let store = JsonFileStore::open(path)
        .with_context(|| format!("open record store {}", path.display()))?;
    Ok(store.records().to_vec())
}

/// Loads an explicit column mapping, if one was given.
pub fn read_mapping(path: Option<&Path>) -> Result<Option<Vec<FieldMapping>>> {
    path.map(|path| {
        load_mapping_file(path).with_context(|| format!("load mapping {}", path.display()))
    })
    .transpose()
}

/// Reconciliation settings from command-line switches.
pub fn reconcile_options(strict_optional: bool, fuzzy_threshold: Option<f64>) -> ReconcileOptions {
    let validation = if strict_optional {
        ValidationOptions::strict()
    } else {
        ValidationOptions::default()
    };
    let duplicates = fuzzy_threshold.map_or(DuplicatePolicy::Exact, DuplicatePolicy::fuzzy);
    ReconcileOptions::new(Utc::now())
        .with_validation(validation)
        .with_duplicate_policy(duplicates)
}
