//! Step-by-step orchestration of one import.
//!
//! ```text
//! Upload -> MappingSelection (CSV only) -> ModeSelection -> Preview -> Committing -> Complete
//! ```
//!
//! The session holds the uploaded content between steps so a user can go
//! back, change the mapping or mode, and preview again before committing.

use std::fmt;

use jobtrack_ingest::CsvDocument;
use jobtrack_map::{auto_detect, resolve_mapping};
use jobtrack_model::{Application, FieldMapping, ImportMode};
use serde::Serialize;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::options::ReconcileOptions;
use crate::reconcile::{ImportReport, reconcile};
use crate::source::SourceKind;
use crate::store::{CommitSummary, RecordStore, commit};

/// Where an [`ImportSession`] currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStage {
    Upload,
    MappingSelection,
    ModeSelection,
    Preview,
    Committing,
    Complete,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::MappingSelection => "mapping-selection",
            Self::ModeSelection => "mode-selection",
            Self::Preview => "preview",
            Self::Committing => "committing",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one user-driven import.
#[derive(Debug, Clone)]
pub struct ImportSession {
    stage: ImportStage,
    source: Option<SourceKind>,
    content: String,
    headers: Vec<String>,
    mapping: Option<Vec<FieldMapping>>,
    mode: ImportMode,
    report: Option<ImportReport>,
    summary: Option<CommitSummary>,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self {
            stage: ImportStage::Upload,
            source: None,
            content: String::new(),
            headers: Vec::new(),
            mapping: None,
            mode: ImportMode::default(),
            report: None,
            summary: None,
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn source(&self) -> Option<SourceKind> {
        self.source
    }

    /// CSV header, empty for JSON.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The mapping proposed or selected for a CSV upload.
    pub fn mapping(&self) -> Option<&[FieldMapping]> {
        self.mapping.as_deref()
    }

    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    pub fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    pub fn summary(&self) -> Option<&CommitSummary> {
        self.summary.as_ref()
    }

    /// Accepts file content. CSV moves on to mapping selection with an
    /// auto-detected mapping proposed; JSON goes straight to mode selection.
    ///
    /// # Errors
    ///
    /// Fails outside the upload stage, or when CSV content has no header.
    pub fn upload(&mut self, kind: SourceKind, content: impl Into<String>) -> SessionResult<()> {
        self.expect_stage(ImportStage::Upload, "upload a file")?;
        let content = content.into();
        if kind.needs_mapping() {
            let document = CsvDocument::from_content(&content)?;
            self.mapping = Some(auto_detect(&document.headers));
            self.headers = document.headers;
            self.advance(ImportStage::MappingSelection);
        } else {
            self.advance(ImportStage::ModeSelection);
        }
        self.source = Some(kind);
        self.content = content;
        Ok(())
    }

    /// Confirms the proposed mapping (`None`) or replaces it.
    ///
    /// # Errors
    ///
    /// Fails outside mapping selection, or when `mapping` does not fit the
    /// header.
    pub fn select_mapping(&mut self, mapping: Option<Vec<FieldMapping>>) -> SessionResult<()> {
        self.expect_stage(ImportStage::MappingSelection, "select a mapping")?;
        if let Some(explicit) = mapping {
            self.mapping = Some(resolve_mapping(&self.headers, Some(&explicit))?);
        }
        self.advance(ImportStage::ModeSelection);
        Ok(())
    }

    /// Picks merge or replace and reconciles against `existing`.
    ///
    /// Duplicates are always computed against the pre-import records, also
    /// for replace, so the preview shows what would be overwritten.
    ///
    /// # Errors
    ///
    /// Fails outside mode selection.
    pub fn select_mode(
        &mut self,
        mode: ImportMode,
        existing: &[Application],
        options: &ReconcileOptions,
    ) -> SessionResult<&ImportReport> {
        self.expect_stage(ImportStage::ModeSelection, "select an import mode")?;
        let kind = self.source.unwrap_or(SourceKind::Json);
        let report = reconcile(
            kind,
            &self.content,
            existing,
            self.mapping.as_deref(),
            options,
        );
        self.mode = mode;
        self.advance(ImportStage::Preview);
        Ok(self.report.insert(report))
    }

    /// Goes back one step from preview or mode selection.
    ///
    /// # Errors
    ///
    /// Fails from any other stage.
    pub fn back(&mut self) -> SessionResult<()> {
        match self.stage {
            ImportStage::Preview => {
                self.report = None;
                self.advance(ImportStage::ModeSelection);
            }
            ImportStage::ModeSelection if self.source.is_some_and(|s| s.needs_mapping()) => {
                self.advance(ImportStage::MappingSelection);
            }
            stage => {
                return Err(SessionError::OutOfOrder {
                    action: "go back",
                    stage,
                });
            }
        }
        Ok(())
    }

    /// Commits the previewed records into `store`.
    ///
    /// On failure the session returns to preview and the store keeps
    /// whatever the failed commit left.
    ///
    /// # Errors
    ///
    /// Fails outside preview, or with the commit's [`StoreError`](crate::StoreError).
    pub fn commit<S>(&mut self, store: &mut S) -> SessionResult<&CommitSummary>
    where
        S: RecordStore + ?Sized,
    {
        self.expect_stage(ImportStage::Preview, "commit")?;
        let Some(report) = self.report.take() else {
            return Err(SessionError::OutOfOrder {
                action: "commit",
                stage: self.stage,
            });
        };
        self.advance(ImportStage::Committing);
        let outcome = commit(store, report.preview(), self.mode);
        self.report = Some(report);
        match outcome {
            Ok(summary) => {
                self.advance(ImportStage::Complete);
                Ok(self.summary.insert(summary))
            }
            Err(err) => {
                self.advance(ImportStage::Preview);
                Err(err.into())
            }
        }
    }

    /// Starts over, discarding everything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn expect_stage(&self, expected: ImportStage, action: &'static str) -> SessionResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SessionError::OutOfOrder {
                action,
                stage: self.stage,
            })
        }
    }

    fn advance(&mut self, next: ImportStage) {
        debug!(from = %self.stage, to = %next, "import stage changed");
        self.stage = next;
    }
}
