//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the formula lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by
//! the grammar. `Display` renders a token the way it is written in a formula;
//! `describe` renders the diagnostic form shown by the `--tokens` host flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, including the range operator `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Multiply, // *
    Divide,   // /
    Add,      // +
    Subtract, // -
    Range,    // :
}

impl Operator {
    /// Every operator, in the order the lexer tries them.
    pub const ALL: [Operator; 5] = [
        Operator::Multiply,
        Operator::Divide,
        Operator::Add,
        Operator::Subtract,
        Operator::Range,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Range => ':',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Binding strength, higher binds tighter. All binary operators are
    /// left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Range => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punctuation {
    Open,  // (
    Close, // )
}

impl Punctuation {
    pub fn symbol(self) -> char {
        match self {
            Punctuation::Open => '(',
            Punctuation::Close => ')',
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Tokens recognized by the formula lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// A run of decimal digits.
    Number(i64),
    Operator(Operator),
    /// One uppercase column letter immediately followed by a row number,
    /// e.g. `A0`. Rows count from zero.
    Reference { column: String, row: usize },
    Punctuation(Punctuation),
    /// A run of uppercase letters not followed by a digit, e.g. `SUM`.
    FunctionName(String),
}

impl Token {
    pub fn reference(column: impl Into<String>, row: usize) -> Self {
        Token::Reference {
            column: column.into(),
            row,
        }
    }

    /// Diagnostic rendering: the token kind followed by its text.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(_) => format!("Number: {}", self),
            Token::Operator(_) => format!("Operator: {}", self),
            Token::Reference { .. } => format!("Reference: {}", self),
            Token::Punctuation(_) => format!("Punctuation: {}", self),
            Token::FunctionName(_) => format!("Function Name: {}", self),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Reference { column, row } => write!(f, "{}{}", column, row),
            Token::Punctuation(p) => write!(f, "{}", p),
            Token::FunctionName(name) => write!(f, "{}", name),
        }
    }
}

/// Describes each token on its own line.
pub fn describe_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::describe)
        .collect::<Vec<_>>()
        .join("\n")
}
