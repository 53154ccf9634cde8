//! Client-side input validation
//!
//! Everything here runs before a request is built: the URL field only has to
//! be non-empty after trimming, and an upload must carry one of the two
//! spreadsheet MIME types.

use std::path::Path;

/// MIME type of `.xlsx` workbooks
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type of legacy `.xls` workbooks
pub const XLS_MIME: &str = "application/vnd.ms-excel";

/// Inline message shown when a non-spreadsheet file is picked
pub const INVALID_FILE_MESSAGE: &str = "Please select a valid Excel file (.xlsx or .xls)";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("{}", INVALID_FILE_MESSAGE)]
    UnsupportedFileType { mime_type: String },

    #[error("Cannot read {path}: {reason}")]
    UnreadableFile { path: String, reason: String },
}

/// The two accepted spreadsheet flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetKind {
    Xlsx,
    Xls,
}

impl SpreadsheetKind {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            XLSX_MIME => Some(SpreadsheetKind::Xlsx),
            XLS_MIME => Some(SpreadsheetKind::Xls),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SpreadsheetKind::Xlsx => XLSX_MIME,
            SpreadsheetKind::Xls => XLS_MIME,
        }
    }
}

/// Trim the URL field and reject it when nothing is left
pub fn validate_url_input(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyUrl)
    } else {
        Ok(trimmed)
    }
}

/// Accept only the two spreadsheet MIME strings
pub fn validate_spreadsheet_mime(mime_type: &str) -> Result<SpreadsheetKind, ValidationError> {
    SpreadsheetKind::from_mime(mime_type).ok_or_else(|| ValidationError::UnsupportedFileType {
        mime_type: mime_type.to_string(),
    })
}

/// Guess a MIME type from the file extension, the way a browser file picker
/// reports it
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("xlsx") => XLSX_MIME,
        Some("xls") => XLS_MIME,
        Some("csv") => "text/csv",
        Some("ods") => "application/vnd.oasis.opendocument.spreadsheet",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
