//! zingsheet-core - UI-agnostic document model.

pub mod document;
pub mod error;
pub mod export;

pub use document::{Document, MAX_COLS, MAX_ROWS, UndoAction};
pub use error::{Result, SheetError};

pub use zingsheet_engine::engine::{CellRef, CellValue, EvalError};
