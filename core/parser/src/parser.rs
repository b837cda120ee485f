//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Combinator grammar that converts a list of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes tokens
//! from the Lexer and builds an Expression tree that can be evaluated.
//!
//! GRAMMAR:
//!   expression     --> sum
//!   sum            --> product ( ("+" | "-") product )*
//!   product        --> primitive ( ("*" | "/") primitive )*
//!   primitive      --> NUMBER | REFERENCE | function_call | "(" expression ")"
//!   function_call  --> FUNCTION_NAME "(" list ")"
//!   list           --> REFERENCE ":" REFERENCE
//!
//! Repetitions are folded to the left, so `8 - 4 - 2` is `(8 - 4) - 2`.
//! The parser backtracks: every rule yields all of its readings, and a
//! formula is accepted when some reading consumes every token.

use crate::ast::Expression;
use crate::lexer::{tokenize, tokenize_detailed};
use crate::token::{Operator, Punctuation, Token};
use combinator::{
    curry, fix, one_of, optional_transform, parse, parse_prefix, succeed, token, zero_or_more,
    Parser,
};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Diagnostics for formulas that do not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("Empty expression")]
    Empty,

    /// No reading consumes every token; the longest one stopped after
    /// `consumed` tokens.
    #[error("Couldn't parse expression: invalid syntax after {consumed} tokens")]
    InvalidSyntax { consumed: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::new);

/// The expression grammar. Building it is the expensive part, so the free
/// functions below share one instance.
#[derive(Debug, Clone)]
pub struct Grammar {
    expression: Parser<Token, Expression>,
}

impl Grammar {
    pub fn new() -> Self {
        let expression = fix(|expression| {
            let primitive = one_of([
                number(),
                reference(),
                function_call(),
                parenthesized(&expression),
            ]);
            let product = operands(&primitive, &[Operator::Multiply, Operator::Divide]);
            operands(&product, &[Operator::Add, Operator::Subtract])
        });
        Grammar { expression }
    }

    /// The underlying token parser.
    pub fn expression(&self) -> &Parser<Token, Expression> {
        &self.expression
    }

    /// Parses `tokens` in full, or `None`.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Option<Expression> {
        parse(&self.expression, tokens)
    }

    /// The first reading of a prefix of `tokens` and how many tokens it used.
    pub fn parse_prefix(&self, tokens: &[Token]) -> Option<(Expression, usize)> {
        parse_prefix(&self.expression, tokens)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

// ========================================
// ENTRY POINTS
// ========================================

/// Tokenizes and parses `text`. Absence at either stage yields `None`.
pub fn parse_expression(text: &str) -> Option<Expression> {
    log::trace!(target: "PARSER", "parse {:?}", text);
    let expression = tokenize(text).and_then(|tokens| GRAMMAR.parse_tokens(&tokens));
    if expression.is_none() {
        log::debug!(target: "PARSER", "couldn't parse {:?}", text);
    }
    expression
}

/// Parses an already tokenized formula.
pub fn parse_tokens(tokens: &[Token]) -> Option<Expression> {
    GRAMMAR.parse_tokens(tokens)
}

/// Like `parse_expression`, with a reason on failure.
pub fn parse_formula(text: &str) -> ParseResult<Expression> {
    let tokens = tokenize_detailed(text)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    GRAMMAR.parse_tokens(&tokens).ok_or_else(|| {
        let consumed = GRAMMAR.parse_prefix(&tokens).map_or(0, |(_, used)| used);
        log::debug!(target: "PARSER", "{:?}: stopped after {} of {} tokens", text, consumed, tokens.len());
        ParseError::InvalidSyntax { consumed }
    })
}

/// Folds `first op1 e1 op2 e2 ...` into left-nested binary expressions.
pub fn combine_operands(first: Expression, rest: Vec<(Operator, Expression)>) -> Expression {
    rest.into_iter()
        .fold(first, |left, (op, right)| Expression::binary(op, left, right))
}

// ========================================
// RULES
// ========================================

fn number() -> Parser<Token, Expression> {
    optional_transform(|token| match token {
        Token::Number(n) => Some(Expression::Number(n)),
        _ => None,
    })
}

fn reference() -> Parser<Token, Expression> {
    optional_transform(|token| match token {
        Token::Reference { column, row } => Some(Expression::Reference { column, row }),
        _ => None,
    })
}

fn function_name() -> Parser<Token, String> {
    optional_transform(|token| match token {
        Token::FunctionName(name) => Some(name),
        _ => None,
    })
}

fn operator(op: Operator) -> Parser<Token, Operator> {
    token(Token::Operator(op)).map(move |_| op)
}

fn punctuation(p: Punctuation) -> Parser<Token, Token> {
    token(Token::Punctuation(p))
}

fn parenthesized<R: combinator::Value>(inner: &Parser<Token, R>) -> Parser<Token, R> {
    punctuation(Punctuation::Open)
        .then(inner)
        .skip(&punctuation(Punctuation::Close))
}

fn list() -> Parser<Token, Expression> {
    succeed(curry(Expression::range))
        .apply(&reference())
        .skip(&operator(Operator::Range))
        .apply(&reference())
}

fn function_call() -> Parser<Token, Expression> {
    succeed(curry(|name: String, argument: Expression| Expression::call(name, argument)))
        .apply(&function_name())
        .apply(&parenthesized(&list()))
}

/// `operand (op operand)*` for the operators in `operators`, left-folded.
fn operands(operand: &Parser<Token, Expression>, operators: &[Operator]) -> Parser<Token, Expression> {
    let op = one_of(operators.iter().map(|&op| operator(op)));
    let pair = succeed(curry(|op: Operator, right: Expression| (op, right)))
        .apply(&op)
        .apply(operand);
    succeed(curry(combine_operands))
        .apply(operand)
        .apply(&zero_or_more(&pair))
}
