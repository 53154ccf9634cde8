use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{alert, item_card};
use crate::logic::grid::{self, CARD_HEIGHT};
use crate::logic::ui::{format_kb, truncate_to_width};
use crate::model::{ActionState, BatchModel, SharedItem};

pub const BATCH_HINT: &str = "Excel file should have URLs in the first column. \
The first row will be treated as a header and skipped.";

/// Render the "Batch Excel" workflow. Returns the grid column count so
/// arrow keys can follow the drawn layout.
pub fn render_batch(
    f: &mut Frame,
    area: Rect,
    batch: &BatchModel,
    selected: Option<&SharedItem>,
) -> usize {
    let alert_height = if batch.error.is_some() { alert::ALERT_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // File picker / path prompt
            Constraint::Length(2),            // Hint
            Constraint::Length(1),            // Controls
            Constraint::Length(alert_height), // Error banner
            Constraint::Min(0),               // Results grid
        ])
        .split(area);

    render_file_field(f, chunks[0], batch);

    let hint = Paragraph::new(BATCH_HINT)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(hint, chunks[1]);

    f.render_widget(Paragraph::new(controls_line(batch)), chunks[2]);

    if let Some(message) = &batch.error {
        alert::render_alert(f, chunks[3], message);
    }

    render_grid(f, chunks[4], batch, selected)
}

fn render_file_field(f: &mut Frame, area: Rect, batch: &BatchModel) {
    let inner_width = area.width.saturating_sub(3) as usize;

    let line = if batch.editing_path {
        Line::from(vec![
            Span::raw(truncate_to_width(&batch.path_input, inner_width)),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if let Some(file) = &batch.file {
        Line::from(vec![
            Span::styled(file.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!(" ({})", format_kb(file.size)),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::styled(":Choose Excel File", Style::default().fg(Color::DarkGray)),
        ])
    };

    let (title, border) = if batch.editing_path {
        ("Path to .xlsx / .xls", Style::default().fg(Color::Yellow))
    } else {
        ("Excel File", Style::default().fg(Color::Gray))
    };

    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    f.render_widget(field, area);
}

fn controls_line(batch: &BatchModel) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut spans = vec![Span::raw(" ")];

    if batch.generate.is_pending() {
        spans.push(Span::styled(
            "Generating...  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    } else if batch.can_generate() {
        spans.extend([key("g"), Span::raw(":Generate QR Codes  ")]);
    }

    if batch.file.is_some() {
        spans.extend([key("r"), Span::raw(":Reset  ")]);
    }

    if batch.batch_id.is_some() {
        match &batch.download_all {
            ActionState::Idle => spans.extend([key("a"), Span::raw(":Download All")]),
            ActionState::Pending => spans.push(Span::styled(
                "Downloading all...",
                Style::default().fg(Color::Cyan),
            )),
            ActionState::Failed(message) => spans.extend([
                key("a"),
                Span::raw(":Retry Download All  "),
                Span::styled(message.clone(), Style::default().fg(Color::Red)),
            ]),
        }
    }

    Line::from(spans)
}

fn render_grid(f: &mut Frame, area: Rect, batch: &BatchModel, selected: Option<&SharedItem>) -> usize {
    let columns = grid::grid_columns(area.width);
    if batch.items.is_empty() || area.height < CARD_HEIGHT {
        return columns;
    }

    let title = format!("Generated QR Codes ({})", batch.items.len());
    let block = Block::default().borders(Borders::TOP).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible_rows = (inner.height / CARD_HEIGHT) as usize;
    let first_row = grid::scroll_offset(batch.cursor, columns, visible_rows);
    let card_width = inner.width / columns as u16;

    for (idx, item) in batch.items.iter().enumerate().skip(first_row * columns) {
        let row = idx / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = idx % columns;

        let card_area = Rect {
            x: inner.x + col as u16 * card_width,
            y: inner.y + row as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        };

        let is_selected = selected.is_some_and(|s| s.id == item.id);
        item_card::render_item_card(
            f,
            card_area,
            item,
            batch.cursor == Some(idx),
            is_selected,
            batch.item_download_state(&item.id),
        );
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::validation::SpreadsheetKind;
    use crate::model::SelectedFile;
    use std::path::PathBuf;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_controls_without_file() {
        let batch = BatchModel::new();
        assert_eq!(line_text(&controls_line(&batch)).trim(), "");
    }

    #[test]
    fn test_controls_with_file() {
        let mut batch = BatchModel::new();
        batch.file = Some(SelectedFile {
            path: PathBuf::from("/tmp/urls.xlsx"),
            name: "urls.xlsx".to_string(),
            size: 2048,
            kind: SpreadsheetKind::Xlsx,
        });
        let text = line_text(&controls_line(&batch));
        assert!(text.contains("g:Generate QR Codes"));
        assert!(text.contains("r:Reset"));
        assert!(!text.contains("Download All"));

        batch.batch_id = Some("batch_1".to_string());
        batch.download_all = ActionState::Pending;
        assert!(line_text(&controls_line(&batch)).contains("Downloading all..."));
    }
}
