//! Single-step formula evaluation.
//!
//! A formula is `=<left><op><right>` with at most one operator. Operands are
//! numeric literals or cell references resolved against the grid at the
//! moment of evaluation. The result is computed once; nothing is tracked for
//! later recalculation.
//!
//! A formula whose left operand is a reference returns that cell's stored
//! value untouched unless the right operand is also a reference. That covers
//! the plain copy `=A1`, and also means `=A1+5` copies A1.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::{CellValue, Grid};
use super::cell_ref::{CellRef, Reference, find_reference};
use super::number::parse_float;
use super::split::{Operator, split_formula};

/// Why a formula produced an error marker. `Display` is the marker text
/// stored in the cell.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvalError {
    /// Unparseable operand, missing operator, or non-finite result.
    #[error("Error")]
    Invalid,
    #[error("Error: Division by zero")]
    DivisionByZero,
}

/// An operand after reference resolution.
enum Operand<'a> {
    Literal(&'a str),
    Cell(CellValue),
    Missing,
}

impl Operand<'_> {
    fn number(&self) -> Option<f64> {
        match self {
            Operand::Literal(text) => parse_float(text),
            Operand::Cell(value) => value.as_number(),
            Operand::Missing => None,
        }
    }
}

/// Look up the value a reference points at. References that cannot name a
/// cell (`A0`) and cells never committed both read as empty.
fn resolve(grid: &Grid, reference: &Reference<'_>) -> CellValue {
    reference
        .cell()
        .and_then(|cell| grid.get(&cell).map(|entry| entry.value().clone()))
        .unwrap_or_default()
}

/// Evaluate `formula` against `grid`.
///
/// `formula` must start with `=`; the first character is dropped unchecked.
/// `_at` is the cell being edited. It does not influence the result.
pub fn evaluate(grid: &Grid, _at: &CellRef, formula: &str) -> Result<CellValue, EvalError> {
    let mut chars = formula.chars();
    chars.next();
    let parts = split_formula(chars.as_str());

    let right_ref = parts.right.and_then(find_reference);

    let left = match find_reference(parts.left) {
        Some(reference) => {
            let value = resolve(grid, &reference);
            if parts.operator.is_none() || right_ref.is_none() {
                return Ok(value);
            }
            Operand::Cell(value)
        }
        None => Operand::Literal(parts.left),
    };

    let right = match (right_ref, parts.right) {
        (Some(reference), _) => Operand::Cell(resolve(grid, &reference)),
        (None, Some(text)) => Operand::Literal(text),
        (None, None) => Operand::Missing,
    };

    let (Some(lhs), Some(rhs)) = (left.number(), right.number()) else {
        return Err(EvalError::Invalid);
    };
    if !lhs.is_finite() || !rhs.is_finite() {
        return Err(EvalError::Invalid);
    }

    let op = parts.operator.ok_or(EvalError::Invalid)?;
    if op == Operator::Div && rhs == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    let result = op.apply(lhs, rhs);
    if result.is_finite() {
        Ok(CellValue::Number(result))
    } else {
        Err(EvalError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(entries: &[(&str, CellValue)]) -> Grid {
        let grid = Grid::new();
        for (name, value) in entries {
            grid.insert(CellRef::from_str(name).unwrap(), value.clone());
        }
        grid
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn eval(grid: &Grid, formula: &str) -> Result<CellValue, EvalError> {
        evaluate(grid, &CellRef::new(5, 5), formula)
    }

    #[test]
    fn test_left_reference_with_literal_right_copies_left() {
        let grid = grid_with(&[("A1", text("10"))]);
        assert_eq!(eval(&grid, "=A1+5"), Ok(text("10")));
        assert_eq!(eval(&grid, "=A1/0"), Ok(text("10")));
    }

    #[test]
    fn test_negative_right_literal_copies_left() {
        let grid = grid_with(&[("A1", text("10"))]);
        assert_eq!(eval(&grid, "=A1*-5"), Ok(text("10")));
        assert_eq!(eval(&grid, "=5*-3"), Err(EvalError::Invalid));
    }

    #[test]
    fn test_copy_of_missing_cell_is_empty() {
        let grid = Grid::new();
        assert_eq!(eval(&grid, "=A1"), Ok(CellValue::Empty));
        assert_eq!(eval(&grid, "=A0"), Ok(CellValue::Empty));
    }

    #[test]
    fn test_copy_preserves_value_kind() {
        let grid = grid_with(&[
            ("A1", CellValue::Number(2.5)),
            ("A2", CellValue::Error(EvalError::DivisionByZero)),
        ]);
        assert_eq!(eval(&grid, "=A1"), Ok(CellValue::Number(2.5)));
        assert_eq!(
            eval(&grid, "=A2"),
            Ok(CellValue::Error(EvalError::DivisionByZero))
        );
    }

    #[test]
    fn test_literal_left_reference_right() {
        let grid = grid_with(&[("B2", text("4"))]);
        assert_eq!(eval(&grid, "=10-B2"), Ok(CellValue::Number(6.0)));
        assert_eq!(eval(&grid, "=10/b2"), Ok(CellValue::Number(2.5)));
    }

    #[test]
    fn test_numbers_from_previous_results() {
        let grid = grid_with(&[("A1", CellValue::Number(0.1)), ("B1", CellValue::Number(0.2))]);
        assert_eq!(eval(&grid, "=A1+B1"), Ok(CellValue::Number(0.1 + 0.2)));
    }

    #[test]
    fn test_error_cells_are_not_numbers() {
        let grid = grid_with(&[("A1", CellValue::Error(EvalError::Invalid)), ("B1", text("1"))]);
        assert_eq!(eval(&grid, "=A1+B1"), Err(EvalError::Invalid));
    }

    #[test]
    fn test_lenient_operand_parsing() {
        let grid = grid_with(&[("A1", text("12px")), ("B1", text(" 3"))]);
        assert_eq!(eval(&grid, "=A1*B1"), Ok(CellValue::Number(36.0)));
        assert_eq!(eval(&grid, "= 3 + 4 "), Ok(CellValue::Number(7.0)));
    }

    #[test]
    fn test_extra_operators_are_ignored() {
        let grid = Grid::new();
        assert_eq!(eval(&grid, "=1+2+3"), Ok(CellValue::Number(3.0)));
        assert_eq!(eval(&grid, "=8/2*2"), Ok(CellValue::Number(4.0)));
    }

    #[test]
    fn test_missing_operand() {
        let grid = Grid::new();
        assert_eq!(eval(&grid, "=2-"), Err(EvalError::Invalid));
        assert_eq!(eval(&grid, "=-5"), Err(EvalError::Invalid));
        assert_eq!(eval(&grid, "="), Err(EvalError::Invalid));
    }

    #[test]
    fn test_division_by_zero_variants() {
        let grid = grid_with(&[("A1", text("1")), ("B1", text("-0")), ("C1", text("0abc"))]);
        assert_eq!(eval(&grid, "=A1/B1"), Err(EvalError::DivisionByZero));
        assert_eq!(eval(&grid, "=A1/C1"), Err(EvalError::DivisionByZero));
        assert_eq!(eval(&grid, "=0/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval(&grid, "=0/A1"), Ok(CellValue::Number(0.0)));
    }

    #[test]
    fn test_non_finite_operands_and_results() {
        let grid = grid_with(&[
            ("A1", text("Infinity")),
            ("B1", text("1")),
            ("C1", text("1e308")),
            ("D1", text("10")),
        ]);
        assert_eq!(eval(&grid, "=A1+B1"), Err(EvalError::Invalid));
        assert_eq!(eval(&grid, "=C1*D1"), Err(EvalError::Invalid));
    }

    #[test]
    fn test_exponent_literal_is_split() {
        let grid = Grid::new();
        // `1e+5` splits at `+`: 1 (from "1e") + 5.
        assert_eq!(eval(&grid, "=1e+5"), Ok(CellValue::Number(6.0)));
        // `1e5` contains `e5`, a reference to the empty cell E5.
        assert_eq!(eval(&grid, "=1e5*2"), Ok(CellValue::Empty));
    }

    #[test]
    fn test_first_character_is_dropped_unchecked() {
        let grid = Grid::new();
        assert_eq!(evaluate(&grid, &CellRef::new(0, 0), "#2+2"), Ok(CellValue::Number(4.0)));
        assert_eq!(evaluate(&grid, &CellRef::new(0, 0), "é2*3"), Ok(CellValue::Number(6.0)));
        assert_eq!(evaluate(&grid, &CellRef::new(0, 0), ""), Err(EvalError::Invalid));
    }
}
