use zingsheet_engine::engine::{CellRef, CellValue, Grid};

/// Maximum number of undo entries to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Column count limit. References name columns with a single letter.
pub const MAX_COLS: usize = 26;

/// Row count limit.
pub const MAX_ROWS: usize = 10_000;

pub(crate) const DEFAULT_ROWS: usize = 6;
pub(crate) const DEFAULT_COLS: usize = 6;

/// Represents an undoable commit to a single cell
#[derive(Clone, Debug, PartialEq)]
pub struct UndoAction {
    pub cell_ref: CellRef,
    pub old_value: Option<CellValue>,
    pub new_value: Option<CellValue>,
}

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the grid store and the visible dimensions. The dimensions only
/// decide which cells can be edited; they never remove stored entries.
pub struct Document {
    /// Committed cell values
    pub grid: Grid,
    /// Number of rows offered for editing
    pub rows: usize,
    /// Number of columns offered for editing
    pub cols: usize,
    /// Whether anything has been committed since creation
    pub modified: bool,
    /// Undo stack
    pub undo_stack: Vec<UndoAction>,
    /// Redo stack
    pub redo_stack: Vec<UndoAction>,
}

impl Document {
    /// Create an empty 6x6 document.
    pub fn new() -> Self {
        Document {
            grid: Grid::new(),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Create an empty document with the given dimensions.
    pub fn with_size(rows: usize, cols: usize) -> crate::error::Result<Self> {
        let mut doc = Self::new();
        doc.resize(rows, cols)?;
        Ok(doc)
    }

    /// Whether `cell_ref` lies inside the current dimensions.
    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        cell_ref.row < self.rows && cell_ref.col < self.cols
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
