//! Terminal UI.

mod app;
mod input;
mod ui;

pub use app::App;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};

/// Take over the terminal, run the event loop, and restore the terminal.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = restore_terminal(&mut stdout);
        return Err(e);
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal(&mut io::stdout());
            return Err(e);
        }
    };

    let result = input::run_app(&mut terminal, app);

    let restored = restore_terminal(terminal.backend_mut());
    let cursor = terminal.show_cursor();
    result.and(restored).and(cursor)
}

/// Undo everything `run` set up. Every step is attempted; the first error wins.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
    raw.and(screen)
}
