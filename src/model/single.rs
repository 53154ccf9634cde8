//! Single-URL workflow model
//!
//! Owns the URL field, the last generated item and the pending state of the
//! generate and download actions.

use std::sync::Arc;

use super::types::{ActionState, Origin, QrItem, SharedItem};
use crate::api::QrCode;
use crate::logic::filenames;
use crate::logic::validation::{self, ValidationError};
use crate::messages::Msg;

#[derive(Clone, Debug, Default)]
pub struct SingleModel {
    /// Raw contents of the URL field
    pub url_input: String,

    /// Whether keystrokes go into the URL field
    pub editing: bool,

    /// Last successful result (with its client-side filename)
    pub generated: Option<SharedItem>,

    pub generate: ActionState,

    pub download: ActionState,
}

impl SingleModel {
    pub fn new() -> Self {
        Self {
            editing: true,
            ..Default::default()
        }
    }

    /// Generate is offered only for a non-blank URL and when nothing is in flight
    pub fn can_generate(&self) -> bool {
        !self.generate.is_pending() && validation::validate_url_input(&self.url_input).is_ok()
    }

    /// Validate the field and mark the request pending.
    ///
    /// Returns the trimmed URL to send. `Ok(None)` means a request is already
    /// pending and the trigger is inert.
    pub fn begin_generate(&mut self) -> Result<Option<String>, ValidationError> {
        let url = validation::validate_url_input(&self.url_input)?.to_string();
        if !self.generate.begin() {
            return Ok(None);
        }
        Ok(Some(url))
    }

    /// Store the backend result and produce the "generated" message
    pub fn complete_generate(&mut self, code: QrCode, timestamp_ms: i64) -> Msg {
        self.generate.succeed();

        let item = Arc::new(QrItem::from_code(
            code,
            None,
            filenames::single_filename(timestamp_ms),
        ));
        self.generated = Some(item.clone());

        Msg::generated(Origin::Single, vec![item])
    }

    /// Keep the previous result, surface the error under the form
    pub fn fail_generate(&mut self, message: String) {
        self.generate.fail(message);
    }

    /// "Click" on the generated card
    pub fn select_generated(&self) -> Option<Msg> {
        self.generated.clone().map(Msg::selected)
    }

    pub fn push_char(&mut self, c: char) {
        self.url_input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.url_input.pop();
    }

    pub fn clear_input(&mut self) {
        self.url_input.clear();
    }
}
