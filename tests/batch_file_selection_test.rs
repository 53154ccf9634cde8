//! Tests for picking a spreadsheet through the path prompt
//!
//! Only `.xlsx` and `.xls` are accepted; anything else shows the inline error
//! and leaves the current file and results as they were.

use qrtui::app::actions::file_candidate;
use qrtui::logic::validation::{SpreadsheetKind, ValidationError, INVALID_FILE_MESSAGE};
use qrtui::model::BatchModel;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(dir: &TempDir, name: &str, len: usize) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![b'x'; len]).unwrap();
    path
}

/// Test: both spreadsheet extensions are accepted with name, size and kind
#[test]
fn test_accepts_xlsx_and_xls() {
    let dir = tempfile::tempdir().unwrap();
    let mut batch = BatchModel::new();

    let xlsx = file_candidate(&fixture(&dir, "urls.xlsx", 3072)).unwrap();
    batch.select_file(xlsx).unwrap();
    let file = batch.file.as_ref().unwrap();
    assert_eq!(file.name, "urls.xlsx");
    assert_eq!(file.size, 3072);
    assert_eq!(file.kind, SpreadsheetKind::Xlsx);

    let xls = file_candidate(&fixture(&dir, "LEGACY.XLS", 10)).unwrap();
    batch.select_file(xls).unwrap();
    assert_eq!(batch.file.as_ref().unwrap().kind, SpreadsheetKind::Xls);
    assert!(batch.error.is_none());
}

/// Test: other file types are rejected and the previous file survives
#[test]
fn test_rejects_other_types() {
    let dir = tempfile::tempdir().unwrap();
    let mut batch = BatchModel::new();
    batch
        .select_file(file_candidate(&fixture(&dir, "urls.xlsx", 100)).unwrap())
        .unwrap();

    for name in ["urls.csv", "urls.ods", "notes.txt", "noextension"] {
        let candidate = file_candidate(&fixture(&dir, name, 10)).unwrap();
        let err = batch.select_file(candidate).unwrap_err();
        assert!(
            matches!(err, ValidationError::UnsupportedFileType { .. }),
            "{} should be rejected",
            name
        );
        assert_eq!(batch.error.as_deref(), Some(INVALID_FILE_MESSAGE));
        assert_eq!(batch.file.as_ref().unwrap().name, "urls.xlsx");
    }
}

/// Test: accepting a file after a rejection clears the banner
#[test]
fn test_valid_file_clears_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut batch = BatchModel::new();

    let csv = file_candidate(&fixture(&dir, "urls.csv", 10)).unwrap();
    assert!(batch.select_file(csv).is_err());
    assert!(batch.file.is_none());
    assert!(batch.error.is_some());

    let xlsx = file_candidate(&fixture(&dir, "urls.xlsx", 10)).unwrap();
    batch.select_file(xlsx).unwrap();
    assert!(batch.error.is_none());
    assert!(batch.can_generate());
}

/// Test: a path that does not exist is reported inline
#[test]
fn test_missing_path_is_reported() {
    let mut batch = BatchModel::new();
    match file_candidate(std::path::Path::new("/nonexistent/dir/urls.xlsx")) {
        Ok(_) => panic!("missing file should not produce a candidate"),
        Err(err) => batch.reject_unreadable(err),
    }

    let message = batch.error.as_deref().unwrap();
    assert!(message.starts_with("Cannot read /nonexistent/dir/urls.xlsx"), "{}", message);
    assert!(batch.file.is_none());
}
