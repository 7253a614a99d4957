use std::collections::BTreeMap;

use super::state::{MAX_UNDO_STACK, UndoAction};
use super::{Document, MAX_COLS, MAX_ROWS};
use crate::error::{Result, SheetError};
use zingsheet_engine::engine::{CellRef, CellValue, evaluate};

impl Document {
    /// Commit user input into a cell.
    ///
    /// The raw text lands in the cell first, as it would while typing. Input
    /// starting with `=` is then evaluated against the grid (which therefore
    /// already holds the raw text at `cell_ref`) and the result replaces it.
    /// Anything else is stored verbatim.
    pub fn commit(&mut self, cell_ref: CellRef, input: &str) -> Result<CellValue> {
        if !self.contains(&cell_ref) {
            tracing::warn!(cell = %cell_ref, rows = self.rows, cols = self.cols, "commit outside grid");
            return Err(SheetError::OutOfBounds {
                cell: cell_ref,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let old_value = self
            .grid
            .insert(cell_ref.clone(), CellValue::Text(input.to_string()));

        let value = if input.starts_with('=') {
            let value = CellValue::from(evaluate(&self.grid, &cell_ref, input));
            self.grid.insert(cell_ref.clone(), value.clone());
            value
        } else {
            CellValue::Text(input.to_string())
        };

        tracing::debug!(cell = %cell_ref, input, result = %value, "committed cell");

        self.push_undo(UndoAction {
            cell_ref,
            old_value,
            new_value: Some(value.clone()),
        });
        self.modified = true;
        Ok(value)
    }

    /// Evaluate a formula against the current grid without storing it.
    pub fn preview(&self, at: &CellRef, formula: &str) -> CellValue {
        CellValue::from(evaluate(&self.grid, at, formula))
    }

    fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    fn restore(&mut self, cell_ref: &CellRef, value: Option<CellValue>) {
        match value {
            Some(value) => {
                self.grid.insert(cell_ref.clone(), value);
            }
            None => {
                self.grid.remove(cell_ref);
            }
        }
    }

    /// Undo the most recent commit. Returns the affected cell.
    ///
    /// The previous value is restored as stored; nothing is re-evaluated.
    pub fn undo(&mut self) -> Result<CellRef> {
        let action = self.undo_stack.pop().ok_or(SheetError::NothingToUndo)?;
        self.restore(&action.cell_ref, action.old_value.clone());
        let cell_ref = action.cell_ref.clone();
        tracing::debug!(cell = %cell_ref, "undo");
        self.redo_stack.push(action);
        self.modified = true;
        Ok(cell_ref)
    }

    /// Redo the most recently undone commit. Returns the affected cell.
    pub fn redo(&mut self) -> Result<CellRef> {
        let action = self.redo_stack.pop().ok_or(SheetError::NothingToRedo)?;
        self.restore(&action.cell_ref, action.new_value.clone());
        let cell_ref = action.cell_ref.clone();
        tracing::debug!(cell = %cell_ref, "redo");
        self.undo_stack.push(action);
        self.modified = true;
        Ok(cell_ref)
    }

    /// Set the number of rows. Stored entries beyond the new size are kept.
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        check_dimension("row", rows, MAX_ROWS)?;
        tracing::debug!(from = self.rows, to = rows, "set rows");
        self.rows = rows;
        Ok(())
    }

    /// Set the number of columns. Stored entries beyond the new size are kept.
    pub fn set_cols(&mut self, cols: usize) -> Result<()> {
        check_dimension("column", cols, MAX_COLS)?;
        tracing::debug!(from = self.cols, to = cols, "set cols");
        self.cols = cols;
        Ok(())
    }

    /// Set both dimensions; nothing changes unless both are valid.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        check_dimension("row", rows, MAX_ROWS)?;
        check_dimension("column", cols, MAX_COLS)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// The stored value of a cell, if any.
    pub fn get_cell(&self, cell_ref: &CellRef) -> Option<CellValue> {
        self.grid.get(cell_ref).map(|entry| entry.value().clone())
    }

    /// Display text for a cell (empty for cells never committed).
    pub fn get_cell_display(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|entry| entry.value().to_string())
            .unwrap_or_default()
    }

    /// Text to prefill when editing a cell.
    ///
    /// Formulas are not kept, so this is the same as the display text.
    pub fn get_cell_input(&self, cell_ref: &CellRef) -> String {
        self.get_cell_display(cell_ref)
    }

    /// Every stored entry as display text, keyed by `"<row>-<col>"`.
    ///
    /// Includes entries outside the current dimensions.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.grid
            .iter()
            .map(|entry| (entry.key().key(), entry.value().to_string()))
            .collect()
    }

    /// Stored entries in row-major order.
    pub fn entries(&self) -> Vec<(CellRef, CellValue)> {
        let mut entries: Vec<(CellRef, CellValue)> = self
            .grid
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

fn check_dimension(dimension: &'static str, value: usize, max: usize) -> Result<()> {
    if value == 0 || value > max {
        tracing::warn!(dimension, value, max, "rejected dimension");
        return Err(SheetError::InvalidDimension {
            dimension,
            value,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::error::SheetError;
    use pretty_assertions::assert_eq;
    use zingsheet_engine::engine::{CellRef, CellValue, EvalError};

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_commit_plain_text_is_stored_verbatim() {
        let mut core = Document::new();
        let value = core.commit(cell("A1"), "  hello ").unwrap();
        assert_eq!(value, CellValue::Text("  hello ".to_string()));
        assert_eq!(core.get_cell_display(&cell("A1")), "  hello ");

        core.commit(cell("A2"), "").unwrap();
        assert_eq!(core.get_cell(&cell("A2")), Some(CellValue::Text(String::new())));
    }

    #[test]
    fn test_commit_formula_stores_result() {
        let mut core = Document::new();
        core.commit(cell("A1"), "3").unwrap();
        core.commit(cell("B1"), "4").unwrap();
        let value = core.commit(cell("C1"), "=A1+B1").unwrap();
        assert_eq!(value, CellValue::Number(7.0));
        assert_eq!(core.get_cell_display(&cell("C1")), "7");
    }

    #[test]
    fn test_commit_errors_are_stored_as_markers() {
        let mut core = Document::new();
        core.commit(cell("A1"), "10").unwrap();
        core.commit(cell("B1"), "0").unwrap();
        core.commit(cell("C1"), "=A1/B1").unwrap();
        core.commit(cell("D1"), "=5").unwrap();

        assert_eq!(
            core.get_cell(&cell("C1")),
            Some(CellValue::Error(EvalError::DivisionByZero))
        );
        assert_eq!(core.get_cell_display(&cell("C1")), "Error: Division by zero");
        assert_eq!(core.get_cell_display(&cell("D1")), "Error");
    }

    #[test]
    fn test_formula_is_evaluated_once() {
        let mut core = Document::new();
        core.commit(cell("A1"), "1").unwrap();
        core.commit(cell("B1"), "2").unwrap();
        core.commit(cell("C1"), "=A1+B1").unwrap();

        core.commit(cell("A1"), "100").unwrap();
        assert_eq!(core.get_cell_display(&cell("C1")), "3");
    }

    #[test]
    fn test_self_reference_sees_raw_input() {
        let mut core = Document::new();
        let value = core.commit(cell("A1"), "=A1").unwrap();
        assert_eq!(value, CellValue::Text("=A1".to_string()));

        core.commit(cell("B1"), "2").unwrap();
        let value = core.commit(cell("B2"), "=B2+B1").unwrap();
        assert_eq!(value, CellValue::Error(EvalError::Invalid));
    }

    #[test]
    fn test_copy_then_compute_from_copied_number() {
        let mut core = Document::new();
        core.commit(cell("A1"), "6").unwrap();
        core.commit(cell("B1"), "=A1*A1").unwrap(); // 36
        core.commit(cell("C1"), "=B1").unwrap(); // copies the number
        assert_eq!(core.get_cell(&cell("C1")), Some(CellValue::Number(36.0)));

        let value = core.commit(cell("D1"), "=C1/A1").unwrap();
        assert_eq!(value, CellValue::Number(6.0));
    }

    #[test]
    fn test_error_text_is_not_reevaluated() {
        let mut core = Document::new();
        core.commit(cell("A1"), "=5").unwrap();
        core.commit(cell("B1"), "1").unwrap();
        let value = core.commit(cell("C1"), "=A1+B1").unwrap();
        assert_eq!(value, CellValue::Error(EvalError::Invalid));

        core.commit(cell("A1"), "4").unwrap();
        assert_eq!(core.get_cell_display(&cell("A1")), "4");
    }

    #[test]
    fn test_commit_outside_grid_is_rejected() {
        let mut core = Document::new();
        let err = core.commit(cell("G1"), "1").unwrap_err();
        assert!(matches!(err, SheetError::OutOfBounds { rows: 6, cols: 6, .. }));
        assert!(core.grid.is_empty());
        assert!(!core.modified);
        assert!(core.undo_stack.is_empty());
    }

    #[test]
    fn test_shrinking_keeps_entries() {
        let mut core = Document::new();
        core.commit(cell("F6"), "kept").unwrap();
        core.resize(2, 2).unwrap();
        assert!(!core.contains(&cell("F6")));
        assert_eq!(core.get_cell_display(&cell("F6")), "kept");

        core.resize(6, 6).unwrap();
        assert_eq!(core.get_cell_display(&cell("F6")), "kept");
    }

    #[test]
    fn test_formula_can_read_cells_outside_grid() {
        let mut core = Document::new();
        core.commit(cell("A6"), "5").unwrap();
        core.commit(cell("B6"), "2").unwrap();
        core.set_rows(1).unwrap();

        let value = core.commit(cell("A1"), "=A6-B6").unwrap();
        assert_eq!(value, CellValue::Number(3.0));
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut core = Document::new();
        assert!(matches!(
            core.set_rows(0),
            Err(SheetError::InvalidDimension { dimension: "row", .. })
        ));
        assert!(matches!(
            core.set_cols(27),
            Err(SheetError::InvalidDimension { dimension: "column", max: 26, .. })
        ));
        assert!(core.resize(3, 0).is_err());
        assert_eq!((core.rows, core.cols), (6, 6));

        core.set_cols(26).unwrap();
        core.set_rows(100).unwrap();
        assert_eq!((core.rows, core.cols), (100, 26));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut core = Document::new();
        core.commit(cell("A1"), "1").unwrap();
        core.commit(cell("A1"), "=A1+A1").unwrap(); // sees its own raw text
        assert_eq!(core.get_cell_display(&cell("A1")), "Error");

        assert_eq!(core.undo().unwrap(), cell("A1"));
        assert_eq!(core.get_cell_display(&cell("A1")), "1");

        core.undo().unwrap();
        assert_eq!(core.get_cell(&cell("A1")), None);
        assert!(matches!(core.undo(), Err(SheetError::NothingToUndo)));

        core.redo().unwrap();
        core.redo().unwrap();
        assert_eq!(core.get_cell_display(&cell("A1")), "Error");
        assert!(matches!(core.redo(), Err(SheetError::NothingToRedo)));
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut core = Document::new();
        core.commit(cell("A1"), "1").unwrap();
        core.undo().unwrap();
        core.commit(cell("B1"), "2").unwrap();
        assert!(core.redo_stack.is_empty());
    }

    #[test]
    fn test_undo_stack_is_bounded() {
        let mut core = Document::new();
        for i in 0..150 {
            core.commit(cell("A1"), &i.to_string()).unwrap();
        }
        assert_eq!(core.undo_stack.len(), 100);
    }

    #[test]
    fn test_snapshot_uses_row_col_keys() {
        let mut core = Document::new();
        core.commit(cell("B3"), "x").unwrap();
        core.commit(cell("A1"), "=2*3").unwrap();
        core.commit(cell("C1"), "=1/0").unwrap();

        let snapshot = core.snapshot();
        let pairs: Vec<(&str, &str)> = snapshot
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("0-0", "6"),
                ("0-2", "Error: Division by zero"),
                ("2-1", "x"),
            ]
        );
    }

    #[test]
    fn test_entries_are_row_major() {
        let mut core = Document::new();
        core.commit(cell("B2"), "b2").unwrap();
        core.commit(cell("A2"), "a2").unwrap();
        core.commit(cell("C1"), "c1").unwrap();

        let names: Vec<String> = core.entries().iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(names, vec!["C1", "A2", "B2"]);
    }

    #[test]
    fn test_preview_does_not_store() {
        let mut core = Document::new();
        core.commit(cell("A1"), "2").unwrap();
        core.commit(cell("B1"), "5").unwrap();
        assert_eq!(
            core.preview(&CellRef::new(0, 0), "=A1*B1"),
            CellValue::Number(10.0)
        );
        assert_eq!(core.grid.len(), 2);
        assert_eq!(core.get_cell_display(&cell("A1")), "2");
    }

    #[test]
    fn test_with_size() {
        let core = Document::with_size(3, 4).unwrap();
        assert_eq!((core.rows, core.cols), (3, 4));
        assert!(Document::with_size(0, 4).is_err());
    }
}
