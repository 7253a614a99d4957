//! Application state and logic.
//!
//! This module contains the main [`App`] struct which holds the document,
//! cursor position, viewport, and the edit/command buffers. The app operates
//! in different [`Mode`]s: navigating, editing a cell, or typing a command.

use zingsheet_core::{Document, SheetError};
use zingsheet_engine::engine::CellRef;

/// Input mode for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the grid, execute single-key commands.
    Normal,
    /// Edit the contents of the current cell.
    Edit,
    /// Enter ex-style commands (`:rows 10`, `:goto B3`, `:q`).
    Command,
}

/// Main application state container.
pub struct App {
    /// The document being edited
    pub doc: Document,
    /// Current cursor position (column)
    pub cursor_col: usize,
    /// Current cursor position (row)
    pub cursor_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Current mode
    pub mode: Mode,
    /// Edit buffer for cell editing
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Command buffer for command mode
    pub command_buffer: String,
    /// Cursor position within command buffer (byte offset)
    pub command_cursor: usize,
    /// Status message to display
    pub status_message: String,
    /// Column width for display
    pub col_width: usize,
}

impl App {
    pub fn new(doc: Document, col_width: usize) -> Self {
        App {
            doc,
            cursor_col: 0,
            cursor_row: 0,
            viewport_col: 0,
            viewport_row: 0,
            visible_cols: 6,
            visible_rows: 6,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: String::new(),
            col_width,
        }
    }

    pub fn current_cell_ref(&self) -> CellRef {
        CellRef::new(self.cursor_col, self.cursor_row)
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let max_col = self.doc.cols.saturating_sub(1);
        let max_row = self.doc.rows.saturating_sub(1);
        self.cursor_col = offset(self.cursor_col, dx).min(max_col);
        self.cursor_row = offset(self.cursor_row, dy).min(max_row);
        self.update_viewport();
    }

    /// Keep the cursor inside the grid after the grid shrinks.
    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    /// Scroll so the cursor stays visible.
    pub fn update_viewport(&mut self) {
        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + self.visible_cols {
            self.viewport_col = self.cursor_col + 1 - self.visible_cols.max(1);
        }
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows.max(1);
        }
    }

    /// Start editing the current cell, prefilled with what it shows.
    pub fn enter_edit_mode(&mut self) {
        let text = self.doc.get_cell_input(&self.current_cell_ref());
        self.start_edit_with(text);
    }

    /// Start editing the current cell with fresh text.
    pub fn start_edit_with(&mut self, text: String) {
        self.edit_cursor = text.len();
        self.edit_buffer = text;
        self.mode = Mode::Edit;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
    }

    /// Commit the edit buffer into the current cell and return to Normal mode.
    pub fn commit_edit(&mut self) {
        let input = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
        self.commit_current(&input);
    }

    /// Commit empty text into the current cell.
    pub fn clear_current_cell(&mut self) {
        self.commit_current("");
    }

    fn commit_current(&mut self, input: &str) {
        let cell_ref = self.current_cell_ref();
        match self.doc.commit(cell_ref.clone(), input) {
            Ok(value) if value.is_error() => {
                self.status_message = format!("{}: {}", cell_ref, value);
            }
            Ok(_) => self.status_message.clear(),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn undo(&mut self) {
        match self.doc.undo() {
            Ok(cell_ref) => self.status_message = format!("Undid change to {}", cell_ref),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn redo(&mut self) {
        match self.doc.redo() {
            Ok(cell_ref) => self.status_message = format!("Redid change to {}", cell_ref),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn set_rows(&mut self, rows: usize) {
        match self.doc.set_rows(rows) {
            Ok(()) => {
                self.clamp_cursor();
                self.status_message = format!("Rows: {}", rows);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn set_cols(&mut self, cols: usize) {
        match self.doc.set_cols(cols) {
            Ok(()) => {
                self.clamp_cursor();
                self.status_message = format!("Columns: {}", cols);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn add_row(&mut self) {
        self.set_rows(self.doc.rows + 1);
    }

    pub fn remove_row(&mut self) {
        self.set_rows(self.doc.rows.saturating_sub(1));
    }

    pub fn add_col(&mut self) {
        self.set_cols(self.doc.cols + 1);
    }

    pub fn remove_col(&mut self) {
        self.set_cols(self.doc.cols.saturating_sub(1));
    }

    pub fn goto_cell(&mut self, name: &str) {
        let Some(cell_ref) = CellRef::from_str(name.trim()) else {
            self.status_message = SheetError::InvalidCellRef(name.trim().to_string()).to_string();
            return;
        };
        if !self.doc.contains(&cell_ref) {
            self.status_message = SheetError::OutOfBounds {
                cell: cell_ref,
                rows: self.doc.rows,
                cols: self.doc.cols,
            }
            .to_string();
            return;
        }
        self.cursor_col = cell_ref.col;
        self.cursor_row = cell_ref.row;
        self.update_viewport();
        self.status_message.clear();
    }

    pub fn enter_command_mode(&mut self) {
        self.command_buffer.clear();
        self.command_cursor = 0;
        self.mode = Mode::Command;
    }

    /// Execute the command buffer. Returns true if the app should quit.
    pub fn execute_command(&mut self) -> bool {
        let command = std::mem::take(&mut self.command_buffer);
        self.command_cursor = 0;
        self.mode = Mode::Normal;

        let mut words = command.split_whitespace();
        let Some(name) = words.next() else {
            return false;
        };
        let arg = words.next();

        match (name, arg) {
            ("q" | "quit", None) => return true,
            ("rows", Some(n)) => match n.parse::<usize>() {
                Ok(n) => self.set_rows(n),
                Err(_) => self.status_message = format!("Not a number: {}", n),
            },
            ("cols" | "columns", Some(n)) => match n.parse::<usize>() {
                Ok(n) => self.set_cols(n),
                Err(_) => self.status_message = format!("Not a number: {}", n),
            },
            ("goto", Some(cell)) => self.goto_cell(cell),
            (cell, None) if CellRef::from_str(cell).is_some() => self.goto_cell(cell),
            _ => self.status_message = format!("Unknown command: {}", command.trim()),
        }
        false
    }
}

fn offset(value: usize, delta: i32) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        value.saturating_add(delta as usize)
    }
}
