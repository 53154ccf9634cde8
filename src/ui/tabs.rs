use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::model::Tab;

const ALL_TABS: [Tab; 2] = [Tab::Single, Tab::Batch];

/// Render the workflow tab bar
pub fn render_tabs(f: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = ALL_TABS
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(Block::default().borders(Borders::ALL).title("QR Code Generator"))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    f.render_widget(tabs, area);
}
