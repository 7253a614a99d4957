//! Plain-text views of a document for non-interactive use.

use std::io::Write;

use crate::document::Document;
use crate::error::Result;
use zingsheet_engine::engine::CellRef;

/// Write the visible `rows x cols` area as a markdown table.
pub fn write_markdown<W: Write>(w: &mut W, doc: &Document) -> Result<()> {
    // Header with column letters
    write!(w, "|   |")?;
    for col in 0..doc.cols {
        write!(w, " {} |", CellRef::col_to_letters(col))?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in 0..doc.cols {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for row in 0..doc.rows {
        write!(w, "| {} |", row + 1)?; // 1-based row numbers
        for col in 0..doc.cols {
            let display = doc.get_cell_display(&CellRef::new(col, row));
            if display.is_empty() {
                write!(w, "  |")?;
            } else {
                write!(w, " {} |", escape_markdown(&display))?;
            }
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Write every stored entry as `<row>-<col>\t<display>` in row-major order.
pub fn write_entries<W: Write>(w: &mut W, doc: &Document) -> Result<()> {
    for (cell_ref, value) in doc.entries() {
        writeln!(w, "{}\t{}", cell_ref.key(), escape_line(&value.to_string()))?;
    }
    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}

fn escape_line(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n").replace('\t', "\\t")
}
