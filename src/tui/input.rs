use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Mode};
use super::ui;

/// Byte offset of the char boundary before `cursor`.
fn prev_boundary(buffer: &str, cursor: usize) -> usize {
    buffer[..cursor]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Byte offset of the char boundary after `cursor`.
fn next_boundary(buffer: &str, cursor: usize) -> usize {
    buffer[cursor..]
        .chars()
        .next()
        .map_or(cursor, |c| cursor + c.len_utf8())
}

/// Apply a key to a one-line text buffer. `cursor` is a byte offset kept on
/// a char boundary.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Left => *cursor = prev_boundary(buffer, *cursor),
        KeyCode::Right => *cursor = next_boundary(buffer, *cursor),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Backspace if *cursor > 0 => {
            let start = prev_boundary(buffer, *cursor);
            buffer.replace_range(start..*cursor, "");
            *cursor = start;
        }
        KeyCode::Delete if *cursor < buffer.len() => {
            let end = next_boundary(buffer, *cursor);
            buffer.replace_range(*cursor..end, "");
        }
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    // Clicking away from an edited cell commits it, like losing focus.
    if app.mode == Mode::Edit {
        app.commit_edit();
    }
    if app.mode != Mode::Normal {
        return;
    }

    let [_formula_area, grid_area, _status_area] = ui::split_main_chunks(terminal_area);
    if let Some((col, row)) = ui::grid_cell_at(app, grid_area, mouse.column, mouse.row) {
        app.cursor_col = col;
        app.cursor_row = row;
        app.update_viewport();
    }
}

/// Keys while editing a cell. Leaving the cell commits it.
fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => {
            app.commit_edit();
            app.move_cursor(0, 1);
        }
        KeyCode::Tab => {
            app.commit_edit();
            app.move_cursor(1, 0);
        }
        KeyCode::BackTab => {
            app.commit_edit();
            app.move_cursor(-1, 0);
        }
        KeyCode::Up => {
            app.commit_edit();
            app.move_cursor(0, -1);
        }
        KeyCode::Down => {
            app.commit_edit();
            app.move_cursor(0, 1);
        }
        _ => handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key),
    }
}

/// Keys while typing a command. Returns true if the app should quit.
fn handle_command_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.command_cursor = 0;
            app.mode = Mode::Normal;
            false
        }
        KeyCode::Enter => app.execute_command(),
        _ => {
            handle_text_input(&mut app.command_buffer, &mut app.command_cursor, key);
            false
        }
    }
}

/// Keys while navigating. Returns true if the app should quit.
fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if !ctrl => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('r') if ctrl => app.redo(),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Tab => app.move_cursor(1, 0),
        KeyCode::BackTab => app.move_cursor(-1, 0),
        KeyCode::Home => app.move_cursor(-(app.cursor_col as i32), 0),
        KeyCode::End => app.move_cursor(app.doc.cols as i32, 0),
        KeyCode::Enter | KeyCode::F(2) | KeyCode::Char('i') => app.enter_edit_mode(),
        KeyCode::Char('=') => app.start_edit_with("=".to_string()),
        KeyCode::Char(c @ ('0'..='9' | '.' | '-')) => app.start_edit_with(c.to_string()),
        KeyCode::Char('x') | KeyCode::Delete => app.clear_current_cell(),
        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('r') => app.add_row(),
        KeyCode::Char('R') => app.remove_row(),
        KeyCode::Char('c') => app.add_col(),
        KeyCode::Char('C') => app.remove_col(),
        KeyCode::Char(':') => app.enter_command_mode(),
        _ => {}
    }
    false
}

/// Apply one key press. Returns true if the app should quit.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Edit => {
            handle_edit_key(app, key);
            false
        }
        Mode::Command => handle_command_key(app, key),
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse_event(app, Rect::new(0, 0, size.width, size.height), mouse);
            }
            _ => {}
        }
    }
}
