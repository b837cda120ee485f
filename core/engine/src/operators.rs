//! FILENAME: core/engine/src/operators.rs
//! PURPOSE: The integer operator table and lifting of integer functions
//! over evaluation results.
//! CONTEXT: Every arithmetic operator the grammar produces maps to a checked
//! integer function here. The range operator `:` has no integer meaning and
//! is handled by the evaluator.

use crate::result::{EvalError, EvalResult};
use parser::Operator;

/// A checked binary function on integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerOp {
    Add,
    Subtract,
    Multiply,
    /// Truncates toward zero.
    Divide,
    Min,
}

impl IntegerOp {
    pub fn name(self) -> &'static str {
        match self {
            IntegerOp::Add => "+",
            IntegerOp::Subtract => "-",
            IntegerOp::Multiply => "*",
            IntegerOp::Divide => "/",
            IntegerOp::Min => "MIN",
        }
    }

    pub fn apply(self, left: i64, right: i64) -> Result<i64, EvalError> {
        match self {
            IntegerOp::Add => left.checked_add(right).ok_or(EvalError::Overflow),
            IntegerOp::Subtract => left.checked_sub(right).ok_or(EvalError::Overflow),
            IntegerOp::Multiply => left.checked_mul(right).ok_or(EvalError::Overflow),
            IntegerOp::Divide if right == 0 => Err(EvalError::DivisionByZero),
            // i64::MIN / -1 is the only other failure.
            IntegerOp::Divide => left.checked_div(right).ok_or(EvalError::Overflow),
            IntegerOp::Min => Ok(left.min(right)),
        }
    }

    /// Applies the operator to two results. An error on either side is
    /// passed through, left first; any operand that is not an integer is a
    /// type error.
    pub fn lift(self, left: EvalResult, right: EvalResult) -> EvalResult {
        match (left, right) {
            (EvalResult::Error(e), _) | (_, EvalResult::Error(e)) => EvalResult::Error(e),
            (EvalResult::Int(l), EvalResult::Int(r)) => match self.apply(l, r) {
                Ok(value) => EvalResult::Int(value),
                Err(e) => EvalResult::Error(e),
            },
            (l, r) => EvalResult::Error(EvalError::TypeError(format!(
                "{} {} {}",
                l.describe(),
                self.name(),
                r.describe()
            ))),
        }
    }
}

/// `op` as a function on results, for folding lists.
pub fn lift(op: IntegerOp) -> impl Fn(EvalResult, EvalResult) -> EvalResult + Copy {
    move |left, right| op.lift(left, right)
}

/// The integer function behind an arithmetic operator, `None` for `:`.
pub fn integer_operator(op: Operator) -> Option<IntegerOp> {
    match op {
        Operator::Add => Some(IntegerOp::Add),
        Operator::Subtract => Some(IntegerOp::Subtract),
        Operator::Multiply => Some(IntegerOp::Multiply),
        Operator::Divide => Some(IntegerOp::Divide),
        Operator::Range => None,
    }
}
