//! UI rendering

use super::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use zingsheet_engine::engine::CellRef;

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 5;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Map a mouse position to the data cell under it, as `(col, row)`.
pub(crate) fn grid_cell_at(
    app: &App,
    grid_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<(usize, usize)> {
    // Inside the border, below the header row.
    let inner_x = grid_area.x.saturating_add(1);
    let first_data_row = grid_area.y.saturating_add(2);
    let inner_right = grid_area.x.saturating_add(grid_area.width.saturating_sub(1));
    let inner_bottom = grid_area.y.saturating_add(grid_area.height.saturating_sub(1));
    if mouse_row < first_data_row || mouse_row >= inner_bottom || mouse_col >= inner_right {
        return None;
    }

    let row = app.viewport_row + (mouse_row - first_data_row) as usize;
    if row >= app.doc.rows {
        return None;
    }

    let data_x = inner_x + ROW_HEADER_WIDTH + GRID_COLUMN_SPACING;
    if mouse_col < data_x {
        return None;
    }
    let stride = app.col_width as u16 + GRID_COLUMN_SPACING;
    let rel = mouse_col - data_x;
    if rel % stride >= app.col_width as u16 {
        // Column gap
        return None;
    }
    let col = app.viewport_col + (rel / stride) as usize;
    if col >= app.doc.cols {
        return None;
    }
    Some((col, row))
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let grid_area = chunks[1];
    let available_width = grid_area.width.saturating_sub(ROW_HEADER_WIDTH + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = (available_width / (app.col_width + 1)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let cell_ref = app.current_cell_ref();

    let content = match app.mode {
        Mode::Edit => {
            // Insert cursor marker at cursor position
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", cell_ref, before, after)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            format!(":{}│{}", before, after)
        }
        Mode::Normal => match app.doc.get_cell(&cell_ref) {
            Some(value) => format!("{}: {}", cell_ref, value),
            None => format!("{}: (empty)", cell_ref),
        },
    };

    let title = match app.mode {
        Mode::Edit => " Edit ",
        Mode::Command => " Command ",
        Mode::Normal => " Cell ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(match app.mode {
            Mode::Edit => Color::Yellow,
            Mode::Command => Color::Cyan,
            Mode::Normal => Color::White,
        }));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn header_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let last_col = (app.viewport_col + app.visible_cols).min(app.doc.cols);
    let last_row = (app.viewport_row + app.visible_rows).min(app.doc.rows);

    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for col in app.viewport_col..last_col {
        header_cells
            .push(Cell::from(CellRef::col_to_letters(col)).style(header_style(col == app.cursor_col)));
    }
    let header = Row::new(header_cells).height(1);

    let mut rows = Vec::new();
    for row in app.viewport_row..last_row {
        let mut cells =
            vec![Cell::from(format!("{}", row + 1)).style(header_style(row == app.cursor_row))];

        for col in app.viewport_col..last_col {
            let cell_ref = CellRef::new(col, row);
            let is_cursor = row == app.cursor_row && col == app.cursor_col;
            let value = app.doc.get_cell(&cell_ref);
            let is_error = value.as_ref().is_some_and(|v| v.is_error());
            let display = value.map(|v| v.to_string()).unwrap_or_default();

            let style = if is_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            cells.push(Cell::from(display).style(style));
        }
        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend((app.viewport_col..last_col).map(|_| Constraint::Length(app.col_width as u16)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Zingsheet "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Edit => "EDIT",
        Mode::Command => "COMMAND",
    };
    let modified = if app.doc.modified { " [+]" } else { "" };
    let hint = if app.status_message.is_empty() {
        "Enter: edit  r/R: rows  c/C: cols  u: undo  :q quit"
    } else {
        app.status_message.as_str()
    };
    let text = format!(
        " {} | {}x{}{} | {}",
        mode, app.doc.rows, app.doc.cols, modified, hint
    );
    let style = if app.status_message.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use zingsheet_core::Document;

    fn rendered(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_shows_headers_and_values() {
        let mut app = App::new(Document::new(), 8);
        app.doc.commit(CellRef::new(0, 0), "3").unwrap();
        app.doc.commit(CellRef::new(1, 0), "=1/0").unwrap();

        let screen = rendered(&mut app, 80, 14);
        assert!(screen.contains("A1: 3"));
        assert!(screen.contains(" A "));
        assert!(screen.contains(" F "));
        assert!(screen.contains("Error: D")); // truncated to the column width
        assert!(screen.contains("NORMAL | 6x6 [+]"));
    }

    #[test]
    fn test_grid_cell_at_maps_clicks() {
        let mut app = App::new(Document::new(), 8);
        let _ = rendered(&mut app, 80, 14);
        let [_, grid_area, _] = split_main_chunks(Rect::new(0, 0, 80, 14));

        // First data cell starts after border, row header, and spacing.
        let x = grid_area.x + 1 + ROW_HEADER_WIDTH + GRID_COLUMN_SPACING;
        let y = grid_area.y + 2;
        assert_eq!(grid_cell_at(&app, grid_area, x, y), Some((0, 0)));
        assert_eq!(grid_cell_at(&app, grid_area, x + 9, y + 1), Some((1, 1)));
        assert_eq!(grid_cell_at(&app, grid_area, x + 8, y), None); // gap
        assert_eq!(grid_cell_at(&app, grid_area, x, grid_area.y + 1), None); // header
    }
}
