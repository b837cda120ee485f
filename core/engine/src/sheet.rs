//! FILENAME: core/engine/src/sheet.rs
//! PURPOSE: The spreadsheet context: column A of a sheet.
//! CONTEXT: Row `n` of a `Sheet` holds the parsed formula of cell `An`, or
//! `None` when the cell is empty or its formula did not parse. The evaluator
//! reads the rows through `cells()`.

use crate::evaluator::{evaluate_expressions, Evaluator};
use crate::result::{EvalError, EvalResult};
use parser::{parse_expression, Expression};
use serde::{Deserialize, Serialize};

/// An ordered, 0-indexed list of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    cells: Vec<Option<Expression>>,
}

impl Sheet {
    /// Creates a new, empty Sheet.
    pub fn new() -> Self {
        Sheet { cells: Vec::new() }
    }

    /// Parses one formula per row. Formulas that do not parse leave their
    /// row as `None`.
    pub fn from_formulas<S: AsRef<str>>(formulas: &[S]) -> Self {
        Sheet {
            cells: formulas
                .iter()
                .map(|formula| parse_expression(formula.as_ref()))
                .collect(),
        }
    }

    pub fn from_cells(cells: Vec<Option<Expression>>) -> Self {
        Sheet { cells }
    }

    /// Appends a row and returns its index.
    pub fn push(&mut self, cell: Option<Expression>) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    /// Parses `formula` into a new row and returns its index.
    pub fn push_formula(&mut self, formula: &str) -> usize {
        self.push(parse_expression(formula))
    }

    /// Sets row `row`, growing the sheet with empty rows if needed.
    pub fn set(&mut self, row: usize, cell: Option<Expression>) {
        if row >= self.cells.len() {
            self.cells.resize(row + 1, None);
        }
        self.cells[row] = cell;
    }

    /// The expression in row `row`, if there is one.
    pub fn get(&self, row: usize) -> Option<&Expression> {
        self.cells.get(row).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Option<Expression>] {
        &self.cells
    }

    /// Evaluates row `row`. Rows that did not parse are parse errors.
    pub fn evaluate(&self, row: usize) -> EvalResult {
        match self.cells.get(row) {
            Some(Some(_)) => Evaluator::new(&self.cells).evaluate_cell(row),
            Some(None) => EvalResult::Error(EvalError::Parse),
            None => EvalResult::Error(EvalError::OutOfBounds(row)),
        }
    }

    /// Evaluates every row.
    pub fn evaluate_all(&self) -> Vec<EvalResult> {
        evaluate_expressions(&self.cells)
    }
}
