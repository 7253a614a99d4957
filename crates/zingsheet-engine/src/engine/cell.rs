//! Cell data structures for the spreadsheet grid.
//!
//! - [`CellValue`] - What a cell holds after a commit (text, number, or error marker)
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;
use super::eval::EvalError;
use super::format::format_number;
use super::number::parse_float;

/// The value stored in a cell.
///
/// Formulas are never stored: committing `=...` stores the evaluation result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Error(EvalError),
}

impl CellValue {
    /// The value as a formula operand would read it.
    ///
    /// Text goes through [`parse_float`]; empty cells and error markers are
    /// not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty | CellValue::Error(_) => None,
            CellValue::Text(s) => parse_float(s),
            CellValue::Number(n) => Some(*n),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl From<Result<CellValue, EvalError>> for CellValue {
    fn from(result: Result<CellValue, EvalError>) -> Self {
        result.unwrap_or_else(CellValue::Error)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Sparse grid storage. A missing entry is an empty cell.
pub type Grid = DashMap<CellRef, CellValue>;
