//! UI state transition logic
//!
//! Pure functions for tab cycling, toast lifetime and text fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::Tab;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 2500;

/// Cycle to the next tab: Single → Batch → Single
///
/// # Examples
/// ```
/// use qrtui::model::Tab;
/// use qrtui::logic::ui::next_tab;
///
/// assert_eq!(next_tab(Tab::Single), Tab::Batch);
/// assert_eq!(next_tab(Tab::Batch), Tab::Single);
/// ```
pub fn next_tab(current: Tab) -> Tab {
    match current {
        Tab::Single => Tab::Batch,
        Tab::Batch => Tab::Single,
    }
}

pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Cut `text` to at most `max_width` terminal cells, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// File size badge, `{size/1024:.1} KB`
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
