//! Keyboard Input Handler
//!
//! Text fields (the URL field and the spreadsheet path prompt) capture
//! printable keys while they are being edited; everything else is a hotkey.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::logic::grid::Direction;
use crate::model::{DownloadControl, Tab};

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return;
    }

    // Any key closes the help overlay
    if app.model.ui.show_help {
        app.model.ui.show_help = false;
        return;
    }

    // Tab switching works from inside text fields too
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.model.ui.next_tab();
            return;
        }
        _ => {}
    }

    if app.model.is_editing() {
        handle_text_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
            return;
        }
        KeyCode::Char('1') => {
            app.model.ui.active_tab = Tab::Single;
            return;
        }
        KeyCode::Char('2') => {
            app.model.ui.active_tab = Tab::Batch;
            return;
        }
        KeyCode::Char('?') => {
            app.model.ui.show_help = true;
            return;
        }
        KeyCode::Char('p') => {
            app.request_download(DownloadControl::Preview);
            return;
        }
        _ => {}
    }

    match app.model.ui.active_tab {
        Tab::Single => handle_single_key(app, key),
        Tab::Batch => handle_batch_key(app, key),
    }
}

fn handle_text_input(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.model.ui.active_tab {
        Tab::Single => match key.code {
            KeyCode::Enter => app.request_generate_single(),
            KeyCode::Esc => app.model.single.editing = false,
            KeyCode::Backspace => app.model.single.pop_char(),
            KeyCode::Char('u') if ctrl => app.model.single.clear_input(),
            KeyCode::Char(c) if !ctrl => app.model.single.push_char(c),
            _ => {}
        },
        Tab::Batch => match key.code {
            KeyCode::Enter => app.pick_batch_file(),
            KeyCode::Esc => app.model.batch.editing_path = false,
            KeyCode::Backspace => {
                app.model.batch.path_input.pop();
            }
            KeyCode::Char('u') if ctrl => app.model.batch.path_input.clear(),
            KeyCode::Char(c) if !ctrl => app.model.batch.path_input.push(c),
            _ => {}
        },
    }
}

fn handle_single_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') => app.model.single.editing = true,
        KeyCode::Char('g') => app.request_generate_single(),
        KeyCode::Char('d') => app.request_download(DownloadControl::SingleCard),
        KeyCode::Enter => {
            if let Some(msg) = app.model.single.select_generated() {
                app.dispatch(msg);
            }
        }
        _ => {}
    }
}

fn handle_batch_key(app: &mut App, key: KeyEvent) {
    let columns = app.model.ui.grid_columns;

    match key.code {
        KeyCode::Char('o') | KeyCode::Char('e') | KeyCode::Char('i') => {
            app.model.batch.editing_path = true
        }
        KeyCode::Char('g') => app.request_generate_batch(),
        KeyCode::Char('r') => app.reset_batch(),
        KeyCode::Char('a') => app.request_download_archive(),
        KeyCode::Char('d') => {
            if let Some(item) = app.model.batch.highlighted() {
                let control = DownloadControl::GridItem(item.id.clone());
                app.request_download(control);
            }
        }
        KeyCode::Enter => {
            if let Some(msg) = app.model.batch.select_highlighted() {
                app.dispatch(msg);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.model.batch.move_cursor(Direction::Up, columns),
        KeyCode::Down | KeyCode::Char('j') => app.model.batch.move_cursor(Direction::Down, columns),
        KeyCode::Left | KeyCode::Char('h') => app.model.batch.move_cursor(Direction::Left, columns),
        KeyCode::Right | KeyCode::Char('l') => {
            app.model.batch.move_cursor(Direction::Right, columns)
        }
        KeyCode::Home => app.model.batch.move_cursor(Direction::First, columns),
        KeyCode::End => app.model.batch.move_cursor(Direction::Last, columns),
        _ => {}
    }
}
