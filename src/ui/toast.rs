use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a toast notification (brief pop-up message)
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let max_width = (area.width as usize).min(80);
    let toast_width = (message.width() + 6).min(max_width) as u16;
    let toast_height = 3;

    let toast_area = Rect {
        x: area.x + (area.width.saturating_sub(toast_width)) / 2,
        y: area.y + 3,
        width: toast_width,
        height: toast_height.min(area.height.saturating_sub(3)),
    };

    // Clear the area first to prevent background bleed-through
    f.render_widget(Clear, toast_area);

    // Failed downloads arrive as "Error: ..."
    let color = toast_color(message);
    let icon = if color == Color::Red { "✗ " } else { "✓ " };

    let toast_line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(message),
    ]);

    let toast = Paragraph::new(toast_line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast, toast_area);
}

fn toast_color(message: &str) -> Color {
    if message.starts_with("Error:") {
        Color::Red
    } else {
        Color::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_are_red() {
        assert_eq!(toast_color("Error: Not Found"), Color::Red);
        assert_eq!(toast_color("Saved ~/Downloads/qr-code-1.png"), Color::Green);
    }
}
