//! Batch (spreadsheet upload) workflow model
//!
//! Holds the picked file, the path prompt that stands in for a file picker,
//! the generated grid and the pending state of every action in this tab.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{ActionState, FileCandidate, Origin, QrItem, SelectedFile, SharedItem};
use crate::api::Batch;
use crate::logic::filenames;
use crate::logic::grid::{self, Direction};
use crate::logic::validation::{self, ValidationError};
use crate::messages::Msg;

#[derive(Clone, Debug, Default)]
pub struct BatchModel {
    /// Text typed into the path prompt
    pub path_input: String,

    /// Whether keystrokes go into the path prompt
    pub editing_path: bool,

    /// Spreadsheet that passed validation
    pub file: Option<SelectedFile>,

    /// Id returned by the backend, needed for "download all"
    pub batch_id: Option<String>,

    pub items: Vec<SharedItem>,

    /// Inline banner: file-type rejection or a failed upload
    pub error: Option<String>,

    pub generate: ActionState,

    pub download_all: ActionState,

    /// Per-item download state, keyed by item id
    pub item_downloads: HashMap<String, ActionState>,

    /// Highlighted grid cell
    pub cursor: Option<usize>,

    /// Bumped whenever the file changes so late responses can be recognised
    pub upload_generation: u64,
}

impl BatchModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a file picked in the prompt.
    ///
    /// Rejected types leave the current file and results untouched and set
    /// the inline error. Accepted files replace the selection and clear any
    /// previous results and error.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        let kind = match validation::validate_spreadsheet_mime(&candidate.mime_type) {
            Ok(kind) => kind,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.file = Some(SelectedFile {
            path: candidate.path,
            name: candidate.name,
            size: candidate.size,
            kind,
        });
        self.error = None;
        self.clear_results();
        self.editing_path = false;
        // An upload still in flight belongs to the old file
        self.generate = ActionState::Idle;
        self.upload_generation += 1;
        Ok(())
    }

    /// Report a path that could not be read at all
    pub fn reject_unreadable(&mut self, err: ValidationError) {
        self.error = Some(err.to_string());
    }

    /// Back to the empty picker: no file, no results, no error, empty prompt
    pub fn reset(&mut self) {
        self.file = None;
        self.clear_results();
        self.error = None;
        self.path_input.clear();
        self.editing_path = false;
        self.generate = ActionState::Idle;
        self.upload_generation += 1;
    }

    fn clear_results(&mut self) {
        self.items.clear();
        self.batch_id = None;
        self.cursor = None;
        self.item_downloads.clear();
        self.download_all = ActionState::Idle;
    }

    /// Generate is offered while a file is picked and nothing was generated yet
    pub fn can_generate(&self) -> bool {
        self.file.is_some() && self.items.is_empty() && !self.generate.is_pending()
    }

    /// Mark the upload pending and hand back what to send plus the generation
    /// token the response must match. `None` when the trigger is inert.
    pub fn begin_generate(&mut self) -> Option<(SelectedFile, u64)> {
        if !self.can_generate() {
            return None;
        }
        let file = self.file.clone()?;
        self.generate.begin();
        self.error = None;
        Some((file, self.upload_generation))
    }

    /// Whether a response tagged with `generation` still belongs to the
    /// current file
    pub fn is_current(&self, generation: u64) -> bool {
        self.file.is_some() && generation == self.upload_generation
    }

    /// Decorate items with their 1-based index and filename, store them and
    /// produce the "generated" message
    pub fn complete_generate(&mut self, batch: Batch) -> Msg {
        self.generate.succeed();

        self.items = batch
            .items
            .into_iter()
            .enumerate()
            .map(|(i, code)| {
                let idx = i + 1;
                Arc::new(QrItem::from_code(code, Some(idx), filenames::batch_item_filename(idx)))
            })
            .collect();
        self.batch_id = Some(batch.id);
        self.item_downloads.clear();
        self.cursor = if self.items.is_empty() { None } else { Some(0) };

        Msg::generated(Origin::Batch, self.items.clone())
    }

    pub fn fail_generate(&mut self, message: String) {
        self.error = Some(message.clone());
        self.generate.fail(message);
    }

    pub fn highlighted(&self) -> Option<&SharedItem> {
        self.cursor.and_then(|idx| self.items.get(idx))
    }

    /// "Click" on the highlighted grid cell
    pub fn select_highlighted(&self) -> Option<Msg> {
        self.highlighted().cloned().map(Msg::selected)
    }

    pub fn move_cursor(&mut self, direction: Direction, columns: usize) {
        self.cursor = grid::move_cursor(self.cursor, self.items.len(), columns, direction);
    }

    pub fn item_download_state(&self, id: &str) -> &ActionState {
        static IDLE: ActionState = ActionState::Idle;
        self.item_downloads.get(id).unwrap_or(&IDLE)
    }

    pub fn item_download_state_mut(&mut self, id: &str) -> &mut ActionState {
        self.item_downloads.entry(id.to_string()).or_default()
    }

    pub fn find_item(&self, id: &str) -> Option<&SharedItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
