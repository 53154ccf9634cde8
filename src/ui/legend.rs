use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{Model, Tab};

/// What the legend depends on, read from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendContext {
    pub tab: Tab,
    pub editing: bool,
    /// The active tab has results to navigate or download
    pub has_results: bool,
    /// Something is shown in the preview pane
    pub has_selection: bool,
    /// A spreadsheet is picked (batch tab)
    pub has_file: bool,
    /// `g` would send a request in the active tab
    pub can_generate: bool,
}

impl LegendContext {
    pub fn from_model(model: &Model) -> Self {
        let tab = model.ui.active_tab;
        let (has_results, can_generate) = match tab {
            Tab::Single => (model.single.generated.is_some(), model.single.can_generate()),
            Tab::Batch => (!model.batch.items.is_empty(), model.batch.can_generate()),
        };
        Self {
            tab,
            editing: model.is_editing(),
            has_results,
            has_selection: model.selected.is_some(),
            has_file: model.batch.file.is_some(),
            can_generate,
        }
    }
}

fn key(k: &'static str) -> Span<'static> {
    Span::styled(k, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(ctx: LegendContext) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    if ctx.editing {
        let enter_action = match ctx.tab {
            Tab::Single => ":Generate  ",
            Tab::Batch => ":Choose File  ",
        };
        hotkey_spans.extend(vec![
            key("Enter"),
            Span::raw(enter_action),
            key("Esc"),
            Span::raw(":Done  "),
            key("^U"),
            Span::raw(":Clear  "),
            key("Tab"),
            Span::raw(":Switch Tab  "),
            key("^C"),
            Span::raw(":Quit"),
        ]);
        return hotkey_spans;
    }

    hotkey_spans.extend(vec![key("Tab"), Span::raw(":Switch Tab  ")]);

    match ctx.tab {
        Tab::Single => {
            hotkey_spans.extend(vec![key("e"), Span::raw(":Edit URL  ")]);
            if ctx.can_generate {
                hotkey_spans.extend(vec![key("g"), Span::raw(":Generate  ")]);
            }
            if ctx.has_results {
                hotkey_spans.extend(vec![
                    key("Enter"),
                    Span::raw(":Preview  "),
                    key("d"),
                    Span::raw(":Download  "),
                ]);
            }
        }
        Tab::Batch => {
            hotkey_spans.extend(vec![key("o"), Span::raw(":Choose File  ")]);
            if ctx.can_generate {
                hotkey_spans.extend(vec![key("g"), Span::raw(":Generate  ")]);
            }
            if ctx.has_file {
                hotkey_spans.extend(vec![key("r"), Span::raw(":Reset  ")]);
            }
            if ctx.has_results {
                hotkey_spans.extend(vec![
                    key("←↑↓→"),
                    Span::raw(":Move  "),
                    key("Enter"),
                    Span::raw(":Preview  "),
                    key("d"),
                    Span::raw(":Download  "),
                    key("a"),
                    Span::raw(":Download All  "),
                ]);
            }
        }
    }

    if ctx.has_selection {
        hotkey_spans.extend(vec![key("p"), Span::raw(":Download Preview  ")]);
    }

    hotkey_spans.extend(vec![key("?"), Span::raw(":Help  "), key("q"), Span::raw(":Quit")]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(ctx: LegendContext) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, ctx: LegendContext) {
    f.render_widget(build_legend_paragraph(ctx), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, ctx: LegendContext) -> u16 {
    // line_count() miscounts when a block is attached, so count without one
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}
