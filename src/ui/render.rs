use crate::model::Tab;
use crate::App;
use ratatui::Frame;

use super::{batch, dialogs, layout, legend, preview, single, status_bar, tabs, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let legend_ctx = legend::LegendContext::from_model(&app.model);
    let legend_height = legend::calculate_legend_height(size.width, legend_ctx);
    let layout_info = layout::calculate_layout(size, legend_height);

    tabs::render_tabs(f, layout_info.tabs_area, app.model.ui.active_tab);

    let selected = app.model.selected.clone();
    match app.model.ui.active_tab {
        Tab::Single => {
            single::render_single(f, layout_info.workflow_area, &app.model.single, selected.as_ref());
        }
        Tab::Batch => {
            // Feed the drawn column count back so arrow keys match the grid
            let columns = batch::render_batch(
                f,
                layout_info.workflow_area,
                &app.model.batch,
                selected.as_ref(),
            );
            app.model.ui.grid_columns = columns;
        }
    }

    let image_enabled = app.image_preview_enabled();
    preview::render_preview(
        f,
        layout_info.preview_area,
        selected.as_deref(),
        &app.model.preview_download,
        &mut app.image_state_map,
        image_enabled,
    );

    legend::render_legend(f, layout_info.legend_area, legend_ctx);
    status_bar::render_status_bar(f, layout_info.status_area, app);

    if app.model.ui.show_help {
        dialogs::render_help(f);
    }

    // Render toast notification if active
    if let Some((message, _timestamp)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
