//! UI Model
//!
//! This sub-model contains state that belongs to the screen rather than to a
//! workflow: the active tab, toasts, and values the renderer feeds back.

use std::time::Instant;

/// Generator tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Single,
    Batch,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Single => "Single URL",
            Tab::Batch => "Batch Excel",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Single => 0,
            Tab::Batch => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UiModel {
    pub active_tab: Tab,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Columns used by the last rendered batch grid (drives arrow keys)
    pub grid_columns: usize,

    /// Whether the help overlay is visible
    pub show_help: bool,

    /// Whether app should quit
    pub should_quit: bool,
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::Single,
            toast_message: None,
            grid_columns: 2,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = crate::logic::ui::next_tab(self.active_tab);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_model_creation() {
        let model = UiModel::new();
        assert_eq!(model.active_tab, Tab::Single);
        assert!(model.toast_message.is_none());
        assert!(!model.should_quit);
    }

    #[test]
    fn test_toast() {
        let mut model = UiModel::new();
        model.show_toast("Saved qr-code-1.png".to_string());
        assert!(model.toast_message.is_some());
        assert!(!model.should_dismiss_toast());

        model.dismiss_toast();
        assert!(model.toast_message.is_none());
        assert!(!model.should_dismiss_toast());
    }

    #[test]
    fn test_next_tab() {
        let mut model = UiModel::new();
        model.next_tab();
        assert_eq!(model.active_tab, Tab::Batch);
        model.next_tab();
        assert_eq!(model.active_tab, Tab::Single);
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(Tab::Single.title(), "Single URL");
        assert_eq!(Tab::Batch.title(), "Batch Excel");
        assert_eq!(Tab::Batch.index(), 1);
    }
}
