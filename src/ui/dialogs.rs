use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const HELP_ROWS: &[(&str, &str)] = &[
    ("Tab / 1 / 2", "Switch between Single URL and Batch Excel"),
    ("e", "Edit the URL field / path prompt"),
    ("Enter", "Generate (URL field), pick file (path prompt), preview (card)"),
    ("Esc", "Leave the text field"),
    ("^U", "Clear the text field"),
    ("g", "Generate"),
    ("d", "Download the highlighted QR code"),
    ("p", "Download the previewed QR code"),
    ("o", "Choose an Excel file (.xlsx or .xls)"),
    ("a", "Download all batch QR codes as a zip"),
    ("r", "Reset the batch file"),
    ("←↑↓→ / hjkl", "Move in the batch grid"),
    ("q", "Quit"),
];

/// Render the help overlay (closed by any key)
pub fn render_help(f: &mut Frame) {
    let lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = f.area();
    let width = 76.min(area.width);
    let height = (HELP_ROWS.len() as u16 + 2).min(area.height);
    let help_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help (any key to close)")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, help_area);
    f.render_widget(help, help_area);
}
