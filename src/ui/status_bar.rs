use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::utils;
use crate::App;

/// Status line: API base, download directory, preview mode, selection
pub fn status_line(app: &App) -> String {
    let mut parts = vec![
        format!("API: {}", app.settings.api_base_url),
        format!("Saving to: {}", utils::display_path(&app.settings.download_dir)),
    ];

    if !app.image_preview_enabled() {
        parts.push("Images: off".to_string());
    }

    if let Some(item) = &app.model.selected {
        parts.push(format!("Selected: {}", item.filename));
    }

    parts.join(" | ")
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = status_line(app);

    // Color the labels (before the first colon) of each part
    let mut spans = vec![];
    for (idx, part) in line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        if let Some(colon_pos) = part.find(':') {
            spans.push(Span::styled(
                part[..=colon_pos].to_string(),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(part[colon_pos + 1..].to_string()));
        } else {
            spans.push(Span::raw(part.to_string()));
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}
