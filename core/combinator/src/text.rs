//! FILENAME: core/combinator/src/text.rs
//! PURPOSE: Character-level building blocks for tokenizers.
//! CONTEXT: Text is parsed as a slice of `char`, so every combinator in the
//! crate applies unchanged. These helpers cover the shapes a tokenizer
//! needs: literal runs, character classes, digits and whitespace.

use crate::combinators::{curry, one_or_more, prepend, zero_or_more};
use crate::parser::{satisfy, succeed, token, Parser, Value};

/// Exactly the character `c`.
pub fn character(c: char) -> Parser<char, char> {
    token(c)
}

/// Any character accepted by `predicate`.
pub fn characters<P>(predicate: P) -> Parser<char, char>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    satisfy(move |c: &char| predicate(*c))
}

/// The exact run of elements in `expected`, in order.
pub fn tokens<T: Value + PartialEq>(expected: &[T]) -> Parser<T, Vec<T>> {
    match expected.split_first() {
        Some((head, tail)) => succeed(curry(prepend::<T>))
            .apply(&token(head.clone()))
            .apply(&tokens(tail)),
        None => succeed(Vec::new()),
    }
}

/// The literal text `literal`, yielded as an owned string.
pub fn string(literal: &str) -> Parser<char, String> {
    let expected: Vec<char> = literal.chars().collect();
    let literal = literal.to_string();
    tokens(&expected).map(move |_| literal.clone())
}

/// A decimal digit, as its numeric value.
pub fn digit() -> Parser<char, u64> {
    characters(|c| c.is_ascii_digit()).filter_map(|c| c.to_digit(10).map(u64::from))
}

/// One or more decimal digits folded into a number, longest run only.
/// Runs that overflow `u64` are rejected.
pub fn natural_number() -> Parser<char, u64> {
    one_or_more(&digit())
        .first()
        .filter_map(|digits| {
            digits
                .into_iter()
                .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(d))
        })
}

/// An uppercase ASCII letter.
pub fn capital() -> Parser<char, char> {
    characters(|c| c.is_ascii_uppercase())
}

pub fn whitespace() -> Parser<char, char> {
    characters(char::is_whitespace)
}

/// Any run of whitespace, consumed in full.
pub fn spaces() -> Parser<char, Vec<char>> {
    zero_or_more(&whitespace()).first()
}

/// `parser`, after skipping any leading whitespace.
pub fn skip_whitespace<R: Value>(parser: &Parser<char, R>) -> Parser<char, R> {
    spaces().then(parser)
}
