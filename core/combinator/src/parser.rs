//! FILENAME: core/combinator/src/parser.rs
//! PURPOSE: The `Parser` type, its primitive constructors, and the core
//! sequencing/alternation combinators.
//! CONTEXT: A parser is a pure function from a slice of tokens to a lazy
//! sequence of `(value, remaining input)` pairs. An empty sequence means the
//! parser failed; more than one element means the input is ambiguous and
//! every reading is offered, leftmost alternative first.
//!
//! PRIMITIVES:
//! - succeed(value): consume nothing, yield `value`
//! - fail():         consume nothing, yield nothing
//! - satisfy(pred):  consume one token matching `pred`
//! - token(t):       consume one token equal to `t`
//! - eof():          succeed only on empty input
//!
//! COMBINATORS (methods on `Parser`):
//! - map        f </> p
//! - or / |     p <|> q   (never short-circuits)
//! - apply      pf <*> p
//! - skip       p <* q
//! - then       p *> q
//! - and        pair of both results

use crate::seq::Seq;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Bound shared by tokens and parse results: cheap to clone, shareable
/// across threads, and free of borrowed data.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}

/// A function value produced by a parser, consumed by `apply`.
pub type Func<A, B> = Arc<dyn Fn(A) -> B + Send + Sync>;

/// Wraps a closure as a `Func`.
pub fn func<A, B, F>(f: F) -> Func<A, B>
where
    F: Fn(A) -> B + Send + Sync + 'static,
{
    Arc::new(f)
}

type RunFn<T, R> = dyn for<'a> Fn(&'a [T]) -> Seq<'a, (R, &'a [T])> + Send + Sync;

/// A backtracking parser from a slice of `T` to values of `R`.
///
/// Parsers are immutable; cloning only bumps a reference count and the same
/// value can be run any number of times, from any thread.
pub struct Parser<T, R> {
    run: Arc<RunFn<T, R>>,
}

impl<T, R> Clone for Parser<T, R> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T, R> fmt::Debug for Parser<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<T: Value, R: Value> Parser<T, R> {
    pub fn new<F>(run: F) -> Self
    where
        F: for<'a> Fn(&'a [T]) -> Seq<'a, (R, &'a [T])> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(run) }
    }

    /// Runs the parser, returning every successful reading of a prefix of
    /// `input` together with what is left over.
    pub fn run<'a>(&self, input: &'a [T]) -> Seq<'a, (R, &'a [T])> {
        (self.run)(input)
    }

    /// Transforms every parsed value. The remaining input is untouched.
    pub fn map<B: Value, F>(&self, f: F) -> Parser<T, B>
    where
        F: Fn(R) -> B + Send + Sync + 'static,
    {
        let parser = self.clone();
        let f = Arc::new(f);
        Parser::new(move |input| {
            let f = Arc::clone(&f);
            parser.run(input).map(move |(value, rest)| (f(value), rest))
        })
    }

    /// Like `map`, but results for which `f` returns `None` are dropped.
    pub fn filter_map<B: Value, F>(&self, f: F) -> Parser<T, B>
    where
        F: Fn(R) -> Option<B> + Send + Sync + 'static,
    {
        let parser = self.clone();
        let f = Arc::new(f);
        Parser::new(move |input| {
            let f = Arc::clone(&f);
            parser.run(input).flat_map(move |(value, rest)| match f(value) {
                Some(mapped) => Seq::one((mapped, rest)),
                None => Seq::empty(),
            })
        })
    }

    /// Alternation: every result of `self`, followed by every result of
    /// `other`, both run on the same input.
    pub fn or(&self, other: &Parser<T, R>) -> Parser<T, R> {
        let left = self.clone();
        let right = other.clone();
        Parser::new(move |input| left.run(input).concat(right.run(input)))
    }

    /// Runs `self`, then `other` on what remains; yields both values.
    pub fn and<S: Value>(&self, other: &Parser<T, S>) -> Parser<T, (R, S)> {
        self.map(|left| func(move |right: S| (left.clone(), right)))
            .apply(other)
    }

    /// `self <* other`: both must succeed in order, only `self`'s value is kept.
    pub fn skip<S: Value>(&self, other: &Parser<T, S>) -> Parser<T, R> {
        self.map(|left| func(move |_: S| left.clone())).apply(other)
    }

    /// `self *> other`: both must succeed in order, only `other`'s value is kept.
    pub fn then<S: Value>(&self, other: &Parser<T, S>) -> Parser<T, S> {
        self.map(|_| func(|right: S| right)).apply(other)
    }

    /// Commits to the first result only. Used where the first reading is
    /// known to be the one wanted (e.g. the longest run of digits) and the
    /// alternatives would only cost backtracking time.
    pub fn first(&self) -> Parser<T, R> {
        let parser = self.clone();
        Parser::new(move |input| parser.run(input).take(1))
    }
}

impl<T: Value, A: Value, B: Value> Parser<T, Func<A, B>> {
    /// Applicative sequencing (`pf <*> p`): parse a function, then parse its
    /// argument from the remaining input, and apply one to the other.
    pub fn apply(&self, argument: &Parser<T, A>) -> Parser<T, B> {
        let function = self.clone();
        let argument = argument.clone();
        Parser::new(move |input| {
            let argument = argument.clone();
            function.run(input).flat_map(move |(f, rest)| {
                argument
                    .run(rest)
                    .map(move |(value, remaining)| (f(value), remaining))
            })
        })
    }
}

impl<T: Value, R: Value> BitOr for Parser<T, R> {
    type Output = Parser<T, R>;

    fn bitor(self, rhs: Parser<T, R>) -> Parser<T, R> {
        self.or(&rhs)
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Consumes nothing and yields `value` once.
pub fn succeed<T: Value, R: Value>(value: R) -> Parser<T, R> {
    Parser::new(move |input| Seq::one((value.clone(), input)))
}

/// Consumes nothing and yields nothing.
pub fn fail<T: Value, R: Value>() -> Parser<T, R> {
    Parser::new(|_| Seq::empty())
}

/// Consumes the head token when `predicate` accepts it.
pub fn satisfy<T: Value, P>(predicate: P) -> Parser<T, T>
where
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    Parser::new(move |input| match input.split_first() {
        Some((head, tail)) if predicate(head) => Seq::one((head.clone(), tail)),
        _ => Seq::empty(),
    })
}

/// Consumes the head token when it equals `expected`.
pub fn token<T: Value + PartialEq>(expected: T) -> Parser<T, T> {
    satisfy(move |candidate| *candidate == expected)
}

/// Succeeds, consuming nothing, only when the input is exhausted.
pub fn eof<T: Value>() -> Parser<T, ()> {
    Parser::new(|input| {
        if input.is_empty() {
            Seq::one(((), input))
        } else {
            Seq::empty()
        }
    })
}

/// Runs `parser` and requires it to consume the whole input.
/// Returns the first such reading, or `None` when there is none.
pub fn parse<T: Value, R: Value>(parser: &Parser<T, R>, input: &[T]) -> Option<R> {
    parser
        .skip(&eof())
        .run(input)
        .first()
        .map(|(value, _)| value)
}

/// Runs `parser` without requiring full consumption. Returns the first
/// reading and how many tokens it consumed.
pub fn parse_prefix<T: Value, R: Value>(parser: &Parser<T, R>, input: &[T]) -> Option<(R, usize)> {
    parser
        .run(input)
        .first()
        .map(|(value, rest)| (value, input.len() - rest.len()))
}
