//! FILENAME: core/engine/src/result.rs
//! PURPOSE: The values an evaluation produces.
//! CONTEXT: A formula evaluates to an integer, to a list (a range argument
//! such as `A0:A2`), or to an error. Errors are values, not panics: once a
//! subtree fails, every expression that depends on it carries the same error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an evaluation failed. The `Display` text is the message shown to users.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalError {
    #[error("Couldn't evaluate reference: column {0} is not supported")]
    UnsupportedColumn(String),

    #[error("Couldn't evaluate reference: row {0} is outside the sheet")]
    OutOfBounds(usize),

    #[error("Couldn't evaluate reference: cell A{0} is empty")]
    EmptyCell(usize),

    #[error("Circular reference through A{0}")]
    CircularReference(usize),

    #[error("Type error, couldn't evaluate {0}")]
    TypeError(String),

    #[error("Couldn't evaluate range {0}")]
    InvalidRange(String),

    #[error("Couldn't evaluate function {0}")]
    UnknownFunction(String),

    #[error("Couldn't evaluate function {0}: argument is not a list")]
    NotAList(String),

    #[error("Couldn't parse expression")]
    Parse,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    Overflow,
}

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalResult {
    Int(i64),
    /// The cells of a range, in row order.
    List(Vec<EvalResult>),
    Error(EvalError),
}

impl EvalResult {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EvalResult::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if this result is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, EvalResult::Error(_))
    }

    /// The user-visible message of an error result.
    pub fn error_message(&self) -> Option<String> {
        match self {
            EvalResult::Error(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// `Int: 6` for integers, the concatenated descriptions of the elements
    /// for lists, the message for errors.
    pub fn describe(&self) -> String {
        match self {
            EvalResult::Int(n) => format!("Int: {}", n),
            EvalResult::List(items) => items.iter().map(EvalResult::describe).collect(),
            EvalResult::Error(e) => e.to_string(),
        }
    }
}

impl From<EvalError> for EvalResult {
    fn from(error: EvalError) -> Self {
        EvalResult::Error(error)
    }
}
