//! Shared types for the Model
//!
//! These types are used across the sub-models and represent the view-model
//! side of a generated QR code plus the per-action lifecycle.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::QrCode;
use crate::logic::validation::SpreadsheetKind;

/// One generated QR code as shown in the UI
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrItem {
    pub id: String,
    pub url: String,
    pub qr_image_url: Option<String>,
    /// 1-based position within a batch, `None` for single results
    pub idx: Option<usize>,
    pub filename: String,
}

/// Items are shared between a workflow, the root result set and the
/// selection; the selection points at the same allocation as the list entry.
pub type SharedItem = Arc<QrItem>;

impl QrItem {
    pub fn from_code(code: QrCode, idx: Option<usize>, filename: String) -> Self {
        Self {
            id: code.id,
            url: code.url,
            qr_image_url: code.qr_image_url,
            idx,
            filename,
        }
    }

    /// Heading used by the preview pane: batch position, else the id
    pub fn label(&self) -> String {
        match self.idx {
            Some(idx) => format!("QR Code #{}", idx),
            None => format!("QR Code #{}", self.id),
        }
    }
}

/// Which workflow produced a result set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Single,
    Batch,
}

/// Result set emitted by a workflow after a successful generate
#[derive(Clone, Debug)]
pub struct GeneratedSet {
    pub origin: Origin,
    pub items: Vec<SharedItem>,
}

/// Lifecycle of one user-triggered request: idle → pending → idle | failed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending)
    }

    /// Enter `Pending`; returns false (and changes nothing) if already pending
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = ActionState::Pending;
        true
    }

    pub fn succeed(&mut self) {
        *self = ActionState::Idle;
    }

    pub fn fail(&mut self, message: String) {
        *self = ActionState::Failed(message);
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies a download control; each one carries its own pending state
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DownloadControl {
    /// Download button under the single-URL result
    SingleCard,
    /// Download button in the preview pane
    Preview,
    /// Per-item download in the batch grid, keyed by item id
    GridItem(String),
    /// "Download all" for the current batch
    BatchArchive,
}

/// A spreadsheet that passed the file-type check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: SpreadsheetKind,
}

/// What the file picker hands over: the path plus the MIME type it reports
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(id: &str) -> QrCode {
        QrCode {
            id: id.to_string(),
            url: "https://example.com".to_string(),
            qr_image_url: Some("http://localhost:8000/media/q.png".to_string()),
            download_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_label_prefers_index() {
        let item = QrItem::from_code(code("qrcode_1"), Some(3), "qr-code-3.png".into());
        assert_eq!(item.label(), "QR Code #3");

        let single = QrItem::from_code(code("qrcode_1"), None, "qr-code-1.png".into());
        assert_eq!(single.label(), "QR Code #qrcode_1");
    }

    #[test]
    fn test_action_state_lifecycle() {
        let mut state = ActionState::default();
        assert!(state.begin());
        assert!(state.is_pending());

        // Second trigger while pending is inert
        assert!(!state.begin());
        assert!(state.is_pending());

        state.fail("boom".to_string());
        assert_eq!(state.error(), Some("boom"));

        // A failed action can be retried by the user
        assert!(state.begin());
        state.succeed();
        assert_eq!(state, ActionState::Idle);
        assert_eq!(state.error(), None);
    }
}
