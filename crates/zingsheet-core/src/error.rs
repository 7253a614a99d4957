//! Error types for Zingsheet core.

use thiserror::Error;

use zingsheet_engine::engine::CellRef;

/// Errors that can occur while editing a document
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        cell: CellRef,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid {dimension} count {value}: must be between 1 and {max}")]
    InvalidDimension {
        dimension: &'static str,
        value: usize,
        max: usize,
    },

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, SheetError>;
