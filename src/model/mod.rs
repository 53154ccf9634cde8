//! Pure Application Model
//!
//! This module defines the cloneable state for the application. The Model is
//! organized into focused sub-models:
//!
//! - **SingleModel**: single-URL form, its result and action states
//! - **BatchModel**: spreadsheet picker, result grid and action states
//! - **UiModel**: active tab, toasts, render feedback
//!
//! The root itself owns what the two workflows share: the last generated
//! result set and the item shown in the preview pane. Workflows report to it
//! through `Msg` values; no I/O happens here.

pub mod batch;
pub mod single;
pub mod types;
pub mod ui;

pub use batch::BatchModel;
pub use single::SingleModel;
pub use types::*;
pub use ui::{Tab, UiModel};

use std::collections::HashMap;

use crate::messages::Msg;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub single: SingleModel,

    pub batch: BatchModel,

    pub ui: UiModel,

    /// Last generated result set, tagged by the workflow that produced it
    pub generated: Option<GeneratedSet>,

    /// Item shown in the preview pane
    pub selected: Option<SharedItem>,

    /// Download control of the preview pane
    pub preview_download: ActionState,

    /// Ticket of the request each pending download control waits on
    download_tickets: HashMap<DownloadControl, u64>,

    next_ticket: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            single: SingleModel::new(),
            batch: BatchModel::new(),
            ui: UiModel::new(),
            generated: None,
            selected: None,
            preview_download: ActionState::Idle,
            download_tickets: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Root reaction to workflow messages.
    ///
    /// `Generated` replaces the result set and auto-selects its first item;
    /// `Selected` only moves the selection.
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Generated(set) => {
                if let Some(first) = set.items.first() {
                    self.select(first.clone());
                }
                self.generated = Some(set);
            }
            Msg::Selected(item) => self.select(item),
        }
    }

    fn select(&mut self, item: SharedItem) {
        let changed = self
            .selected
            .as_ref()
            .map_or(true, |current| current.id != item.id);
        if changed {
            // The preview button belongs to whatever is on screen
            self.preview_download = ActionState::Idle;
            self.download_tickets.remove(&DownloadControl::Preview);
        }
        self.selected = Some(item);
    }

    /// Item a download control acts on
    pub fn download_target(&self, control: &DownloadControl) -> Option<SharedItem> {
        match control {
            DownloadControl::SingleCard => self.single.generated.clone(),
            DownloadControl::Preview => self.selected.clone(),
            DownloadControl::GridItem(id) => self.batch.find_item(id).cloned(),
            DownloadControl::BatchArchive => None,
        }
    }

    /// Pending/error state of a download control
    pub fn download_state(&self, control: &DownloadControl) -> &ActionState {
        match control {
            DownloadControl::SingleCard => &self.single.download,
            DownloadControl::Preview => &self.preview_download,
            DownloadControl::GridItem(id) => self.batch.item_download_state(id),
            DownloadControl::BatchArchive => &self.batch.download_all,
        }
    }

    pub fn download_state_mut(&mut self, control: &DownloadControl) -> &mut ActionState {
        match control {
            DownloadControl::SingleCard => &mut self.single.download,
            DownloadControl::Preview => &mut self.preview_download,
            DownloadControl::GridItem(id) => self.batch.item_download_state_mut(id),
            DownloadControl::BatchArchive => &mut self.batch.download_all,
        }
    }

    /// Mark a download control pending and hand out the ticket its response
    /// must carry. `None` while the control is already pending.
    pub fn begin_download(&mut self, control: &DownloadControl) -> Option<u64> {
        if !self.download_state_mut(control).begin() {
            return None;
        }
        self.next_ticket += 1;
        self.download_tickets.insert(control.clone(), self.next_ticket);
        Some(self.next_ticket)
    }

    /// Settle a download control with the outcome of request `ticket`.
    ///
    /// Returns false, leaving the control alone, when the control was retired
    /// or has since started another request.
    pub fn finish_download(
        &mut self,
        control: &DownloadControl,
        ticket: u64,
        outcome: Result<(), String>,
    ) -> bool {
        if self.download_tickets.get(control) != Some(&ticket)
            || !self.download_state(control).is_pending()
        {
            return false;
        }
        self.download_tickets.remove(control);

        let state = self.download_state_mut(control);
        match outcome {
            Ok(()) => state.succeed(),
            Err(message) => state.fail(message),
        }
        true
    }

    /// Whether a text field currently captures keystrokes
    pub fn is_editing(&self) -> bool {
        match self.ui.active_tab {
            Tab::Single => self.single.editing,
            Tab::Batch => self.batch.editing_path,
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn item(id: &str, idx: Option<usize>) -> SharedItem {
        Arc::new(QrItem {
            id: id.to_string(),
            url: format!("https://{}.example", id),
            qr_image_url: None,
            idx,
            filename: format!("qr-code-{}.png", id),
        })
    }

    #[test]
    fn test_model_creation() {
        let model = Model::new();
        assert!(model.generated.is_none());
        assert!(model.selected.is_none());
        assert!(model.single.editing);
        assert!(model.is_editing());
    }

    #[test]
    fn test_generated_auto_selects_first() {
        let mut model = Model::new();
        let items = vec![item("a", Some(1)), item("b", Some(2))];
        model.update(Msg::generated(Origin::Batch, items.clone()));

        assert!(Arc::ptr_eq(model.selected.as_ref().unwrap(), &items[0]));
        assert_eq!(model.generated.as_ref().unwrap().origin, Origin::Batch);
    }

    #[test]
    fn test_empty_generated_keeps_selection() {
        let mut model = Model::new();
        let first = item("a", None);
        model.update(Msg::generated(Origin::Single, vec![first.clone()]));
        model.update(Msg::generated(Origin::Batch, vec![]));

        assert!(Arc::ptr_eq(model.selected.as_ref().unwrap(), &first));
        assert!(model.generated.as_ref().unwrap().items.is_empty());
    }

    #[test]
    fn test_selected_does_not_touch_result_set() {
        let mut model = Model::new();
        let items = vec![item("a", Some(1)), item("b", Some(2))];
        model.update(Msg::generated(Origin::Batch, items.clone()));

        model.update(Msg::selected(items[1].clone()));
        assert!(Arc::ptr_eq(model.selected.as_ref().unwrap(), &items[1]));
        let set = model.generated.as_ref().unwrap();
        assert_eq!(set.items.len(), 2);
        assert!(Arc::ptr_eq(&set.items[0], &items[0]));
    }

    #[test]
    fn test_preview_download_resets_on_new_selection() {
        let mut model = Model::new();
        let a = item("a", None);
        model.update(Msg::selected(a.clone()));
        model.preview_download.begin();

        // Re-selecting the same item keeps the pending download
        model.update(Msg::selected(a));
        assert!(model.preview_download.is_pending());

        model.update(Msg::selected(item("b", None)));
        assert_eq!(model.preview_download, ActionState::Idle);
    }

    #[test]
    fn test_download_state_routing() {
        let mut model = Model::new();
        assert!(model.download_state_mut(&DownloadControl::SingleCard).begin());
        assert!(model.single.download.is_pending());
        assert!(!model.preview_download.is_pending());

        assert!(model.download_state_mut(&DownloadControl::BatchArchive).begin());
        assert!(model.batch.download_all.is_pending());

        let grid = DownloadControl::GridItem("q1".to_string());
        assert!(model.download_state_mut(&grid).begin());
        assert!(model.download_state(&grid).is_pending());
        assert!(!model.download_state(&DownloadControl::GridItem("q2".to_string())).is_pending());
    }

    #[test]
    fn test_download_ticket_settles_its_control() {
        let mut model = Model::new();
        let ticket = model.begin_download(&DownloadControl::SingleCard).unwrap();
        assert_eq!(model.begin_download(&DownloadControl::SingleCard), None);

        assert!(model.finish_download(&DownloadControl::SingleCard, ticket, Err("boom".into())));
        assert_eq!(model.single.download.error(), Some("boom"));

        // Already settled
        assert!(!model.finish_download(&DownloadControl::SingleCard, ticket, Ok(())));
    }

    #[test]
    fn test_stale_preview_ticket_ignored_after_selection_change() {
        let mut model = Model::new();
        model.update(Msg::selected(item("a", None)));
        let first = model.begin_download(&DownloadControl::Preview).unwrap();

        model.update(Msg::selected(item("b", None)));
        let second = model.begin_download(&DownloadControl::Preview).unwrap();

        assert!(!model.finish_download(&DownloadControl::Preview, first, Ok(())));
        assert!(model.preview_download.is_pending(), "b's download is still running");

        assert!(model.finish_download(&DownloadControl::Preview, second, Ok(())));
        assert_eq!(model.preview_download, ActionState::Idle);
    }

    #[test]
    fn test_stale_grid_ticket_ignored_after_reset() {
        let mut model = Model::new();
        let control = DownloadControl::GridItem("q1".to_string());
        let first = model.begin_download(&control).unwrap();

        // Reset then a new batch that reuses the id
        model.batch.reset();
        assert!(!model.finish_download(&control, first, Ok(())));
        let second = model.begin_download(&control).unwrap();

        assert!(!model.finish_download(&control, first, Err("late".into())));
        assert!(model.download_state(&control).is_pending());
        assert!(model.finish_download(&control, second, Ok(())));
    }

    #[test]
    fn test_is_editing_follows_tab() {
        let mut model = Model::new();
        model.ui.active_tab = Tab::Batch;
        assert!(!model.is_editing());
        model.batch.editing_path = true;
        assert!(model.is_editing());
    }
}
