//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the spreadsheet engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod evaluator;
pub mod functions;
pub mod operators;
pub mod result;
pub mod sheet;

// Re-export commonly used types at the crate root
pub use evaluator::{evaluate, evaluate_expressions, Evaluator};
pub use functions::BuiltinFunction;
pub use operators::{integer_operator, lift, IntegerOp};
pub use result::{EvalError, EvalResult};
pub use sheet::Sheet;
