use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{alert, item_card};
use crate::logic::ui::truncate_to_width;
use crate::model::{ActionState, SharedItem, SingleModel};

/// Render the "Single URL" workflow: URL field, generate control, error
/// banner and the last result
pub fn render_single(f: &mut Frame, area: Rect, single: &SingleModel, selected: Option<&SharedItem>) {
    let error = single.generate.error();
    let alert_height = if error.is_some() { alert::ALERT_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // URL field
            Constraint::Length(1),            // Generate control
            Constraint::Length(alert_height), // Error banner
            Constraint::Length(crate::logic::grid::CARD_HEIGHT), // Result card
            Constraint::Min(0),
        ])
        .split(area);

    render_url_field(f, chunks[0], single);
    f.render_widget(Paragraph::new(generate_line(single)), chunks[1]);

    if let Some(message) = error {
        alert::render_alert(f, chunks[2], message);
    }

    if let Some(item) = &single.generated {
        let is_selected = selected.is_some_and(|s| s.id == item.id);
        item_card::render_item_card(f, chunks[3], item, false, is_selected, &single.download);
    }
}

fn render_url_field(f: &mut Frame, area: Rect, single: &SingleModel) {
    let inner_width = area.width.saturating_sub(3) as usize;

    let (text, style) = if single.url_input.is_empty() && !single.editing {
        (
            "https://example.com".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        // Keep the tail (where typing happens) visible
        let shown = tail_to_width(&single.url_input, inner_width);
        (shown, Style::default().fg(Color::White))
    };

    let mut spans = vec![Span::styled(text, style)];
    if single.editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let border_style = if single.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("URL"),
    );
    f.render_widget(field, area);
}

fn generate_line(single: &SingleModel) -> Line<'static> {
    match &single.generate {
        ActionState::Pending => Line::from(Span::styled(
            " Generating...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        _ if single.can_generate() => Line::from(vec![
            Span::raw(" "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":Generate QR Code"),
        ]),
        _ => Line::from(Span::styled(
            " Enter a URL to generate a QR code",
            Style::default().fg(Color::DarkGray),
        )),
    }
}

fn tail_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if text.width() <= max_width {
        return text.to_string();
    }
    let reversed: String = text.chars().rev().collect();
    truncate_to_width(&reversed, max_width).chars().rev().collect()
}
