use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the preview pane goes under the workflow instead of
/// beside it
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Tab bar
    pub tabs_area: Rect,
    /// Active workflow (single form or batch picker + grid)
    pub workflow_area: Rect,
    /// Preview pane
    pub preview_area: Rect,
    /// Hotkey legend (full width)
    pub legend_area: Rect,
    /// Bottom status bar
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    // Tabs (top) + content + legend + status bar (bottom)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tab bar
            Constraint::Min(6),                // Workflow + preview
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    let content_area = main_chunks[1];

    let content_chunks = if content_area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(content_area)
    };

    LayoutInfo {
        tabs_area: main_chunks[0],
        workflow_area: content_chunks[0],
        preview_area: content_chunks[1],
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_puts_preview_beside_workflow() {
        let layout = calculate_layout(Rect::new(0, 0, 120, 40), 3);
        assert_eq!(layout.workflow_area.y, layout.preview_area.y);
        assert!(layout.preview_area.x > layout.workflow_area.x);
        assert_eq!(layout.tabs_area.height, 3);
        assert_eq!(layout.status_area.y + layout.status_area.height, 40);
    }

    #[test]
    fn test_narrow_terminal_stacks_preview() {
        let layout = calculate_layout(Rect::new(0, 0, 60, 40), 4);
        assert_eq!(layout.workflow_area.x, layout.preview_area.x);
        assert!(layout.preview_area.y > layout.workflow_area.y);
        assert_eq!(layout.legend_area.height, 4);
    }
}
