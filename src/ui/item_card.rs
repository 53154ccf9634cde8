use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::logic::ui::truncate_to_width;
use crate::model::{ActionState, QrItem};

/// Status span for a download control
pub fn download_span(state: &ActionState, key: &'static str) -> Line<'static> {
    match state {
        ActionState::Idle => Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(":Download"),
        ]),
        ActionState::Pending => Line::from(Span::styled(
            "Downloading...",
            Style::default().fg(Color::Cyan),
        )),
        ActionState::Failed(message) => Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(":Retry  "),
            Span::styled(message.clone(), Style::default().fg(Color::Red)),
        ]),
    }
}

/// One grid cell / result card: label, URL, download control
pub fn render_item_card(
    f: &mut Frame,
    area: Rect,
    item: &QrItem,
    highlighted: bool,
    selected: bool,
    download: &ActionState,
) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if highlighted {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut title = item.label();
    if selected {
        title.push_str(" ●");
    }

    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&item.url, inner_width),
            Style::default().fg(Color::Blue),
        )),
        Line::from(Span::styled(
            truncate_to_width(&item.filename, inner_width),
            Style::default().fg(Color::DarkGray),
        )),
        download_span(download, "d"),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(truncate_to_width(&title, inner_width)),
    );

    f.render_widget(card, area);
}
