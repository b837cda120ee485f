//! FILENAME: core/combinator/src/lib.rs
//! PURPOSE: Library root for the parser-combinator core.
//! CONTEXT: Both stages of the formula pipeline are written with this crate:
//! the tokenizer parses `char` slices into tokens, the grammar parses token
//! slices into expression trees.
//!
//! PIPELINE: Formula String --> Tokenizer --> Tokens --> Grammar --> AST --> Evaluator
//!
//! MODULES:
//! - seq:         lazy, restartable result sequences
//! - parser:      the Parser type, primitives, map/or/apply/skip/then
//! - combinators: repetition, choice, optional suffixes, lazy and fix
//! - text:        character-level helpers for tokenizers

pub mod combinators;
pub mod parser;
pub mod seq;
pub mod text;

#[cfg(test)]
mod tests;

pub use combinators::{
    curry, curry3, fix, lazy, one_of, one_or_more, optional_transform, optionally_followed, prepend,
    zero_or_more,
};
pub use parser::{eof, fail, func, parse, parse_prefix, satisfy, succeed, token, Func, Parser, Value};
pub use seq::Seq;
