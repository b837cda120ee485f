//! FILENAME: core/engine/src/functions.rs
//! PURPOSE: Built-in spreadsheet functions.
//! CONTEXT: Every function takes a single list argument (a range such as
//! `A0:A4`) and folds it with a lifted integer operator, starting from the
//! operator's identity.

use crate::operators::{lift, IntegerOp};
use crate::result::{EvalError, EvalResult};

/// The functions a formula can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFunction {
    Sum,
    Min,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 2] = [BuiltinFunction::Sum, BuiltinFunction::Min];

    /// Looks a function up by its formula name. Names are case-sensitive;
    /// the lexer only produces uppercase names.
    pub fn from_name(name: &str) -> Option<BuiltinFunction> {
        BuiltinFunction::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinFunction::Sum => "SUM",
            BuiltinFunction::Min => "MIN",
        }
    }

    fn fold(self) -> (i64, IntegerOp) {
        match self {
            BuiltinFunction::Sum => (0, IntegerOp::Add),
            BuiltinFunction::Min => (i64::MAX, IntegerOp::Min),
        }
    }

    /// Applies the function to an evaluated argument. An error argument is
    /// passed through unchanged.
    pub fn apply(self, argument: EvalResult) -> EvalResult {
        match argument {
            EvalResult::List(items) => {
                let (identity, op) = self.fold();
                items.into_iter().fold(EvalResult::Int(identity), lift(op))
            }
            EvalResult::Error(e) => EvalResult::Error(e),
            EvalResult::Int(_) => EvalResult::Error(EvalError::NotAList(self.name().to_string())),
        }
    }
}
