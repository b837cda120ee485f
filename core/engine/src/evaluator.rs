//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions to compute cell values.
//! CONTEXT: After a formula is parsed into an AST, this module traverses
//! the tree against a context and computes the final result. The context is
//! column A of a sheet: slot `n` holds the parsed formula of cell `An`, or
//! `None` where the formula did not parse.
//!
//! SUPPORTED FEATURES:
//! - Integer literals
//! - Cell references into column A, evaluated recursively
//! - Ranges (A0:A2) expanded into lists
//! - Binary operations: +, -, *, / on integers
//! - Functions: SUM, MIN over a range
//!
//! Errors never panic; they become `EvalResult::Error` and propagate up.

use crate::functions::BuiltinFunction;
use crate::operators::integer_operator;
use crate::result::{EvalError, EvalResult};
use parser::{Expression, Operator};

/// The only column a context holds.
pub const COLUMN: &str = "A";

/// The formula evaluator.
/// Holds a reference to the context for cell lookups.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    context: &'a [Option<Expression>],
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a [Option<Expression>]) -> Self {
        Evaluator { context }
    }

    /// Evaluates an AST expression and returns the result.
    pub fn evaluate(&self, expr: &Expression) -> EvalResult {
        log::trace!(target: "EVAL", "evaluate {}", expr);
        let result = self.eval(expr, &mut Vec::new());
        if let EvalResult::Error(e) = &result {
            log::debug!(target: "EVAL", "{} -> {}", expr, e);
        }
        result
    }

    /// Evaluates an expression that may have failed to parse.
    pub fn evaluate_optional(&self, expr: Option<&Expression>) -> EvalResult {
        match expr {
            Some(expr) => self.evaluate(expr),
            None => EvalResult::Error(EvalError::Parse),
        }
    }

    /// Evaluates the cell `A<row>` the way a reference to it would.
    pub fn evaluate_cell(&self, row: usize) -> EvalResult {
        log::trace!(target: "EVAL", "evaluate A{}", row);
        self.eval_row(row, &mut Vec::new())
    }

    /// `visiting` holds the rows whose formulas are being evaluated further
    /// up the current path.
    fn eval(&self, expr: &Expression, visiting: &mut Vec<usize>) -> EvalResult {
        match expr {
            Expression::Number(n) => EvalResult::Int(*n),
            Expression::Reference { column, row } => self.eval_reference(column, *row, visiting),
            Expression::BinaryExpression { op, left, right } => {
                self.eval_binary_op(*op, left, right, visiting)
            }
            Expression::FunctionCall { name, argument } => {
                self.eval_function(name, argument, visiting)
            }
        }
    }

    fn eval_reference(&self, column: &str, row: usize, visiting: &mut Vec<usize>) -> EvalResult {
        if column != COLUMN {
            return EvalResult::Error(EvalError::UnsupportedColumn(column.to_string()));
        }
        self.eval_row(row, visiting)
    }

    fn eval_row(&self, row: usize, visiting: &mut Vec<usize>) -> EvalResult {
        let expr = match self.context.get(row) {
            Some(Some(expr)) => expr,
            Some(None) => return EvalResult::Error(EvalError::EmptyCell(row)),
            None => return EvalResult::Error(EvalError::OutOfBounds(row)),
        };
        if visiting.contains(&row) {
            return EvalResult::Error(EvalError::CircularReference(row));
        }

        visiting.push(row);
        let result = self.eval(expr, visiting);
        visiting.pop();
        result
    }

    /// Evaluates a binary operation.
    fn eval_binary_op(
        &self,
        op: Operator,
        left: &Expression,
        right: &Expression,
        visiting: &mut Vec<usize>,
    ) -> EvalResult {
        match integer_operator(op) {
            Some(int_op) => {
                let left_val = self.eval(left, visiting);
                let right_val = self.eval(right, visiting);
                int_op.lift(left_val, right_val)
            }
            None => self.eval_range(left, right, visiting),
        }
    }

    /// `A<r1>:A<r2>` with `r1 <= r2` becomes the list of those cells,
    /// each evaluated on its own. Anything else is an invalid range.
    fn eval_range(&self, start: &Expression, end: &Expression, visiting: &mut Vec<usize>) -> EvalResult {
        match (start, end) {
            (
                Expression::Reference { column: c1, row: r1 },
                Expression::Reference { column: c2, row: r2 },
            ) if c1 == COLUMN && c2 == COLUMN && r1 <= r2 => {
                EvalResult::List((*r1..=*r2).map(|row| self.eval_row(row, visiting)).collect())
            }
            _ => {
                let range = Expression::range(start.clone(), end.clone());
                EvalResult::Error(EvalError::InvalidRange(range.to_string()))
            }
        }
    }

    /// Evaluates a function call.
    fn eval_function(&self, name: &str, argument: &Expression, visiting: &mut Vec<usize>) -> EvalResult {
        match BuiltinFunction::from_name(name) {
            Some(function) => function.apply(self.eval(argument, visiting)),
            None => EvalResult::Error(EvalError::UnknownFunction(name.to_string())),
        }
    }
}

/// Evaluates `expr` against `context`. A missing expression is a parse error.
pub fn evaluate(context: &[Option<Expression>], expr: Option<&Expression>) -> EvalResult {
    Evaluator::new(context).evaluate_optional(expr)
}

/// Evaluates every slot of `context` against the context itself. Slots
/// that did not parse evaluate to a parse error.
pub fn evaluate_expressions(context: &[Option<Expression>]) -> Vec<EvalResult> {
    let evaluator = Evaluator::new(context);
    context
        .iter()
        .enumerate()
        .map(|(row, slot)| match slot {
            Some(_) => evaluator.evaluate_cell(row),
            None => EvalResult::Error(EvalError::Parse),
        })
        .collect()
}
