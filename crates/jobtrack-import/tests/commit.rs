use chrono::{TimeZone, Utc};
use jobtrack_import::{
    JsonFileStore, MemoryStore, ReconcileOptions, RecordStore, StoreError, commit, reconcile_json,
};
use jobtrack_model::{Application, ApplicationStatus, ImportMode, ImportPreview};

fn options() -> ReconcileOptions {
    ReconcileOptions::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
}

fn seeded_store() -> MemoryStore {
    MemoryStore::with_records(vec![
        Application::new("old-1", "Acme", "Engineer", ApplicationStatus::Applied, options().now),
        Application::new("old-2", "Globex", "Analyst", ApplicationStatus::Rejected, options().now),
    ])
}

const BATCH: &str = r#"[
    {"id": "new-1", "companyName": "Initech", "position": "Developer", "status": "applied"},
    {"companyName": "Acme", "position": "Engineer", "status": "offer"},
    {"companyName": "Hooli"}
]"#;

#[test]
fn merge_adds_valid_records_and_skips_duplicates() {
    let mut store = seeded_store();
    let preview = reconcile_json(BATCH, store.records(), &options());
    let summary = commit(&mut store, &preview, ImportMode::Merge).unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.skipped_duplicates, 1);
    assert_eq!(summary.skipped_invalid, 1);
    let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["old-1", "old-2", "new-1"]);
    assert_eq!(store.records()[0].status, ApplicationStatus::Applied);
}

#[test]
fn replace_clears_then_inserts_valid_records() {
    let mut store = seeded_store();
    let preview = reconcile_json(BATCH, store.records(), &options());
    let summary = commit(&mut store, &preview, ImportMode::Replace).unwrap();

    assert_eq!(summary.removed, 2);
    assert_eq!(summary.inserted, 1);
    let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1"]);
}

#[test]
fn rejected_preview_is_not_committed() {
    let mut store = seeded_store();
    let preview = ImportPreview::failed(vec!["Invalid JSON: EOF".to_string()]);
    let err = commit(&mut store, &preview, ImportMode::Replace).unwrap_err();
    assert!(matches!(err, StoreError::PreviewRejected));
    assert_eq!(store.records().len(), 2);
}

#[test]
fn id_conflict_leaves_store_untouched() {
    let mut store = seeded_store();
    let content = r#"[
        {"id": "fresh", "companyName": "Initech", "position": "Developer", "status": "applied"},
        {"id": "old-2", "companyName": "Umbrella", "position": "Chemist", "status": "applied"}
    ]"#;
    let preview = reconcile_json(content, store.records(), &options());
    let err = commit(&mut store, &preview, ImportMode::Merge).unwrap_err();
    assert!(matches!(err, StoreError::IdConflict(ref id) if id == "old-2"));
    assert_eq!(store.records().len(), 2);

    let replaced = commit(&mut store, &preview, ImportMode::Replace).unwrap();
    assert_eq!(replaced.inserted, 2);
}

#[test]
fn repeated_ids_within_a_batch_conflict() {
    let mut store = MemoryStore::new();
    let content = r#"[
        {"id": "same", "companyName": "A", "position": "B", "status": "applied"},
        {"id": "same", "companyName": "C", "position": "D", "status": "applied"}
    ]"#;
    let preview = reconcile_json(content, store.records(), &options());
    assert!(matches!(
        commit(&mut store, &preview, ImportMode::Replace),
        Err(StoreError::IdConflict(_))
    ));
    assert!(store.records().is_empty());
}

#[test]
fn file_store_persists_commits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("applications.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    assert!(store.records().is_empty());
    let preview = reconcile_json(BATCH, store.records(), &options());
    commit(&mut store, &preview, ImportMode::Merge).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.records().len(), 2);
    assert_eq!(reopened.records()[0].id, "new-1");
    assert_eq!(reopened.records(), store.records());

    let second = reconcile_json(BATCH, reopened.records(), &options());
    assert_eq!(second.duplicates.len(), 2);
}

#[test]
fn file_store_reports_corrupt_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("applications.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Format { .. })));
}
