use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui_image::StatefulImage;
use std::collections::HashMap;

use super::item_card::download_span;
use crate::app::{ImageMetadata, ImagePreviewState};
use crate::logic::ui::format_kb;
use crate::model::{ActionState, QrItem};

pub const EMPTY_PREVIEW_TEXT: &str = "Select a QR code to preview";

/// Render the preview pane for the selected item, or the empty state
pub fn render_preview(
    f: &mut Frame,
    area: Rect,
    selected: Option<&QrItem>,
    download: &ActionState,
    image_states: &mut HashMap<String, ImagePreviewState>,
    image_enabled: bool,
) {
    let Some(item) = selected else {
        render_empty(f, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(item.label());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Image
            Constraint::Length(4), // URL + filename (wrapped)
            Constraint::Length(1), // Download control
        ])
        .split(inner);

    render_image(f, chunks[0], item, image_states, image_enabled);

    let details = Paragraph::new(detail_lines(item)).wrap(Wrap { trim: true });
    f.render_widget(details, chunks[1]);

    f.render_widget(Paragraph::new(download_span(download, "p")), chunks[2]);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let vertical_pad = area.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::raw(""); vertical_pad as usize];
    lines.push(Line::from(Span::styled(
        EMPTY_PREVIEW_TEXT,
        Style::default().fg(Color::DarkGray),
    )));

    let empty = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(empty, area);
}

fn render_image(
    f: &mut Frame,
    area: Rect,
    item: &QrItem,
    image_states: &mut HashMap<String, ImagePreviewState>,
    image_enabled: bool,
) {
    let placeholder = match image_states.get_mut(&item.id) {
        Some(ImagePreviewState::Ready { protocol, metadata }) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            f.render_stateful_widget(StatefulImage::default(), chunks[0], protocol);

            let caption = Paragraph::new(Span::styled(
                image_caption(metadata),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center);
            f.render_widget(caption, chunks[1]);
            return;
        }
        Some(ImagePreviewState::Loading) => "Loading image...".to_string(),
        Some(ImagePreviewState::Failed { metadata }) => format!(
            "Image unavailable: {}",
            metadata.note.as_deref().unwrap_or("unknown error")
        ),
        None if image_enabled => "Loading image...".to_string(),
        None => match item.qr_image_url.as_deref() {
            Some(url) => format!("Image preview disabled: {}", url),
            None => "Image preview disabled".to_string(),
        },
    };

    let text = Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, area);
}

/// Pixel size and byte size of a decoded preview, e.g. `290x290 px, 1.2 KB`
pub fn image_caption(metadata: &ImageMetadata) -> String {
    match metadata.dimensions {
        Some((w, h)) => format!("{}x{} px, {}", w, h, format_kb(metadata.file_size)),
        None => format_kb(metadata.file_size),
    }
}

fn detail_lines(item: &QrItem) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Yellow);
    vec![
        Line::from(vec![
            Span::styled("URL: ", label),
            Span::styled(
                item.url.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled("File: ", label),
            Span::raw(item.filename.clone()),
        ]),
    ]
}
