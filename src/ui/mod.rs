// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (tabs, workflow, preview, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - tabs: Renders the workflow tab bar
// - single: Renders the single-URL form and its result card
// - batch: Renders the spreadsheet picker and the result grid
// - item_card: Renders one QR result card with its download control
// - preview: Renders the preview pane (image, URL, filename, download)
// - alert: Renders inline error banners
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar
// - dialogs: Renders the help overlay
// - toast: Renders toast notifications (brief pop-up messages)

pub mod alert;
pub mod batch;
pub mod dialogs;
pub mod item_card;
pub mod layout;
pub mod legend;
pub mod preview;
pub mod render;
pub mod single;
pub mod status_bar;
pub mod tabs;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
