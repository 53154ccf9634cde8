use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height an inline error banner needs (message on one row plus borders)
pub const ALERT_HEIGHT: u16 = 3;

/// Build the inline error banner shown under a form
pub fn alert_paragraph(message: &str) -> Paragraph<'_> {
    let line = Line::from(vec![
        Span::styled(
            "✗ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::Red)),
    ]);

    Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true })
}

pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    f.render_widget(alert_paragraph(message), area);
}
