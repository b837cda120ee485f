//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a list of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. The lexer is a
//! combinator parser over `char`: each token kind is its own small parser and
//! the tokenizer repeats their alternation, skipping whitespace between
//! tokens.
//!
//! TOKEN KINDS (tried in this order):
//! - number:        one or more digits, longest run
//! - operator:      * / + - :
//! - reference:     one capital letter immediately followed by a row number
//! - punctuation:   ( )
//! - function name: one or more capitals, longest run
//!
//! Every token parser commits to its first reading, and so does the
//! alternation, so a formula is scanned left to right without backtracking.

use crate::parser::{ParseError, ParseResult};
use crate::token::{Operator, Punctuation, Token};
use combinator::text::{capital, character, natural_number, skip_whitespace, spaces};
use combinator::{curry, one_of, one_or_more, parse, parse_prefix, succeed, zero_or_more, Parser};
use once_cell::sync::Lazy;

static LEXER: Lazy<Lexer> = Lazy::new(Lexer::new);

/// The formula tokenizer. Build once and reuse; running it never mutates it.
#[derive(Debug, Clone)]
pub struct Lexer {
    tokenizer: Parser<char, Vec<Token>>,
}

impl Lexer {
    pub fn new() -> Self {
        let token = one_of([
            number(),
            operator(),
            reference(),
            punctuation(),
            function_name(),
        ])
        .first();

        let tokenizer = zero_or_more(&skip_whitespace(&token))
            .skip(&spaces())
            .first();

        Lexer { tokenizer }
    }

    /// The underlying character parser.
    pub fn tokenizer(&self) -> &Parser<char, Vec<Token>> {
        &self.tokenizer
    }

    /// Tokenizes the whole of `text`. Any character that does not start a
    /// token yields `None`. Blank text yields an empty list.
    pub fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let chars: Vec<char> = text.chars().collect();
        let tokens = parse(&self.tokenizer, &chars);
        match &tokens {
            Some(found) => log::trace!(target: "LEXER", "{:?} -> {} tokens", text, found.len()),
            None => log::debug!(target: "LEXER", "could not tokenize {:?}", text),
        }
        tokens
    }

    /// Like `tokenize`, but reports where scanning stopped.
    pub fn tokenize_detailed(&self, text: &str) -> ParseResult<Vec<Token>> {
        let chars: Vec<char> = text.chars().collect();
        let position = match parse_prefix(&self.tokenizer, &chars) {
            Some((tokens, consumed)) if consumed == chars.len() => return Ok(tokens),
            Some((_, consumed)) => consumed,
            None => 0,
        };

        log::debug!(target: "LEXER", "unexpected character in {:?} at {}", text, position);
        match chars.get(position) {
            Some(&found) => Err(ParseError::UnexpectedCharacter { position, found }),
            None => Err(ParseError::Empty),
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

/// Tokenizes `text` with the shared lexer.
pub fn tokenize(text: &str) -> Option<Vec<Token>> {
    LEXER.tokenize(text)
}

/// Tokenizes `text` with the shared lexer, reporting the first character
/// that could not be scanned.
pub fn tokenize_detailed(text: &str) -> ParseResult<Vec<Token>> {
    LEXER.tokenize_detailed(text)
}

// ========================================
// TOKEN PARSERS
// ========================================

/// Digits folded into an `i64`. Runs too large for `i64` are rejected.
fn number() -> Parser<char, Token> {
    natural_number().filter_map(|n| i64::try_from(n).ok().map(Token::Number))
}

fn operator() -> Parser<char, Token> {
    one_of(
        Operator::ALL
            .into_iter()
            .map(|op| character(op.symbol()).map(move |_| Token::Operator(op))),
    )
}

fn reference() -> Parser<char, Token> {
    let row = natural_number().filter_map(|n| usize::try_from(n).ok());
    succeed(curry(|column: char, row: usize| Token::reference(column.to_string(), row)))
        .apply(&capital())
        .apply(&row)
}

fn punctuation() -> Parser<char, Token> {
    one_of(
        [Punctuation::Open, Punctuation::Close]
            .into_iter()
            .map(|p| character(p.symbol()).map(move |_| Token::Punctuation(p))),
    )
}

fn function_name() -> Parser<char, Token> {
    one_or_more(&capital())
        .first()
        .map(|letters| Token::FunctionName(letters.into_iter().collect()))
}
