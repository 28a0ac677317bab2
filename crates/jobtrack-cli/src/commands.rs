//! Command handlers. Each returns an outcome for the printers in the binary.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use jobtrack_import::{
    CommitSummary, ImportReport, ImportSession, ImportStage, JsonFileStore, RecordStore,
    SourceKind, reconcile,
};
use jobtrack_ingest::CsvDocument;
use jobtrack_map::{MappingRepository, MappingSummary, StoredMapping, auto_detect};
use jobtrack_model::{FieldMapping, ImportMode};
use serde_json::Value;
use tracing::{Level, info, info_span, trace, warn};

use crate::cli::{DetectArgs, ImportArgs, MappingsArgs, PreviewArgs, SourceArgs};
use crate::input::{ImportInput, read_existing, read_input, read_mapping, reconcile_options};
use crate::logging::redact_value;

pub struct DetectOutcome {
    pub headers: Vec<String>,
    pub mapping: Vec<FieldMapping>,
    pub summary: MappingSummary,
    pub saved_to: Option<PathBuf>,
}

pub struct PreviewOutcome {
    pub kind: SourceKind,
    pub report: ImportReport,
}

pub struct ImportOutcome {
    pub kind: SourceKind,
    pub mode: ImportMode,
    pub report: ImportReport,
    /// `None` for a dry run or a rejected payload.
    pub commit: Option<CommitSummary>,
}

pub struct MappingsOutcome {
    pub names: Vec<String>,
    pub deleted: Option<(String, bool)>,
}

pub fn run_detect(args: &DetectArgs) -> Result<DetectOutcome> {
    let span = info_span!("detect", file = %args.file.display());
    let _guard = span.enter();

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("read CSV file {}", args.file.display()))?;
    let document = CsvDocument::from_content(&content)
        .with_context(|| format!("read CSV header of {}", args.file.display()))?;
    let mapping = auto_detect(&document.headers);
    let summary = MappingSummary::from_mapping(&mapping);
    if !summary.is_complete() {
        warn!(missing = ?summary.missing_required, "required fields were not detected");
    }

    let saved_to = match &args.save {
        Some(name) => {
            let repository = MappingRepository::new(&args.mapping_dir)
                .context("open mapping directory")?;
            let stored = StoredMapping::new(name.clone(), mapping.clone())
                .with_description(format!("Detected from {}", args.file.display()));
            let path = repository
                .save(&stored)
                .with_context(|| format!("save mapping '{name}'"))?;
            info!(name = %name, path = %path.display(), "saved detected mapping");
            Some(path)
        }
        None => None,
    };

    Ok(DetectOutcome {
        headers: document.headers,
        mapping,
        summary,
        saved_to,
    })
}

pub fn run_mappings(args: &MappingsArgs) -> Result<MappingsOutcome> {
    let repository =
        MappingRepository::new(&args.mapping_dir).context("open mapping directory")?;
    let deleted = match &args.delete {
        Some(name) => {
            let removed = repository
                .delete(name)
                .with_context(|| format!("delete mapping '{name}'"))?;
            Some((name.clone(), removed))
        }
        None => None,
    };
    let names = repository.list().context("list saved mappings")?;
    Ok(MappingsOutcome { names, deleted })
}

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewOutcome> {
    let input = read_source(&args.source)?;
    let span = info_span!("preview", file = %input.path.display(), format = %input.kind);
    let _guard = span.enter();

    let existing = read_existing(args.existing.as_deref())?;
    let mapping = read_source_mapping(&args.source, input.kind)?;
    let options = reconcile_options(args.source.strict_optional, args.source.fuzzy_duplicates);
    let report = reconcile(
        input.kind,
        &input.content,
        &existing,
        mapping.as_deref(),
        &options,
    );
    trace_rejected(&report);
    Ok(PreviewOutcome {
        kind: input.kind,
        report,
    })
}

pub fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let input = read_source(&args.source)?;
    let mode = ImportMode::from(args.mode);
    let span = info_span!(
        "import",
        file = %input.path.display(),
        format = %input.kind,
        mode = %mode
    );
    let _guard = span.enter();

    let mut store = JsonFileStore::open(&args.store)
        .with_context(|| format!("open record store {}", args.store.display()))?;
    let mapping = read_source_mapping(&args.source, input.kind)?;
    let options = reconcile_options(args.source.strict_optional, args.source.fuzzy_duplicates);

    let mut session = ImportSession::new();
    session
        .upload(input.kind, input.content)
        .with_context(|| format!("read {}", input.path.display()))?;
    if session.stage() == ImportStage::MappingSelection {
        session.select_mapping(mapping).context("apply column mapping")?;
    }
    let report = session
        .select_mode(mode, store.records(), &options)
        .context("reconcile import")?
        .clone();
    trace_rejected(&report);

    if args.dry_run || !report.preview().valid {
        return Ok(ImportOutcome {
            kind: input.kind,
            mode,
            report,
            commit: None,
        });
    }
    let commit = *session
        .commit(&mut store)
        .with_context(|| format!("commit into {}", args.store.display()))?;
    Ok(ImportOutcome {
        kind: input.kind,
        mode,
        report,
        commit: Some(commit),
    })
}

fn read_source(args: &SourceArgs) -> Result<ImportInput> {
    read_input(&args.file, args.format.map(SourceKind::from))
}

fn read_source_mapping(
    args: &SourceArgs,
    kind: SourceKind,
) -> Result<Option<Vec<FieldMapping>>> {
    let mapping = read_mapping(args.mapping.as_deref())?;
    if mapping.is_some() && !kind.needs_mapping() {
        warn!("--mapping only applies to CSV input and is ignored");
        return Ok(None);
    }
    Ok(mapping)
}

fn trace_rejected(report: &ImportReport) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    for invalid in &report.preview().invalid_records {
        let data = Value::Object(invalid.data.clone()).to_string();
        trace!(
            index = invalid.index,
            data = redact_value(&data),
            errors = ?invalid.errors,
            "rejected record"
        );
    }
}
