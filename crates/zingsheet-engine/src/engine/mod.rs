//! Spreadsheet engine API.
//!
//! This module provides the computation side of the spreadsheet:
//!
//! - [`CellValue`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell addresses (A1 notation, `row-col` grid keys)
//! - [`find_reference`] - Locate a cell reference inside a formula operand
//! - [`split_formula`] - Cut a formula body at its single operator
//! - [`parse_float`] - Lenient operand parsing
//! - [`evaluate`] - Evaluate a committed formula against the grid
//! - [`format_number`] - Format numbers for display

mod cell;
mod cell_ref;
mod eval;
mod format;
mod number;
mod split;

pub use cell::{CellValue, Grid};
pub use cell_ref::{CellRef, Reference, find_reference};
pub use eval::{EvalError, evaluate};
pub use format::format_number;
pub use number::parse_float;
pub use split::{Operator, SplitFormula, split_formula};
