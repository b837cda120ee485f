//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the formula parser.
//! CONTEXT: This module exposes the lexer, grammar, and AST components
//! needed to convert formula strings into evaluatable expression trees.
//! Both stages are combinator parsers built with the `combinator` crate.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Grammar --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, / (left-associative, * and / bind tighter)
//! - Integer literals
//! - Cell references: A0, A12
//! - Function calls over a range: SUM(A0:A2), MIN(A1:A4)
//! - Parentheses for grouping

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use ast::Expression;
pub use lexer::{tokenize, tokenize_detailed, Lexer};
pub use parser::{
    combine_operands, parse_expression, parse_formula, parse_tokens, Grammar, ParseError,
    ParseResult,
};
pub use token::{describe_tokens, Operator, Punctuation, Token};
