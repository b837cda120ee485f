//! FILENAME: core/combinator/src/combinators.rs
//! PURPOSE: Derived combinators: repetition, choice over many parsers,
//! optional suffixes, and the two ways of writing self-referential parsers.
//! CONTEXT: Everything here is built on the primitives in `parser.rs`.
//!
//! SELF-REFERENCE:
//! A grammar rule that mentions itself cannot be built eagerly, the
//! construction would never terminate. Two strategies are offered:
//! - `lazy(build)` defers construction to the moment the parser is run and
//!   rebuilds it on every run. Simple, allocation-heavy.
//! - `fix(|this| body)` builds the body once and hands it a back-reference
//!   to itself. The back-reference is weak so no reference cycle leaks.

use crate::parser::{fail, func, satisfy, succeed, Func, Parser, Value};
use crate::seq::Seq;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Turns a two-argument function into a function returning a function, so
/// it can be fed one parsed value at a time through `apply`.
pub fn curry<A: Value, B: Value, C: Value, F>(f: F) -> Func<A, Func<B, C>>
where
    F: Fn(A, B) -> C + Send + Sync + 'static,
{
    let f = Arc::new(f);
    func(move |a: A| -> Func<B, C> {
        let f = Arc::clone(&f);
        func(move |b: B| f(a.clone(), b))
    })
}

/// Three-argument form of `curry`.
pub fn curry3<A: Value, B: Value, C: Value, D: Value, F>(f: F) -> Func<A, Func<B, Func<C, D>>>
where
    F: Fn(A, B, C) -> D + Send + Sync + 'static,
{
    let f = Arc::new(f);
    func(move |a: A| -> Func<B, Func<C, D>> {
        let f = Arc::clone(&f);
        curry(move |b: B, c: C| f(a.clone(), b, c))
    })
}

/// Puts `head` in front of `tail`.
pub fn prepend<A>(head: A, mut tail: Vec<A>) -> Vec<A> {
    tail.insert(0, head);
    tail
}

/// Parses a single token through `f`, succeeding when `f` returns `Some`.
pub fn optional_transform<T: Value, R: Value, F>(f: F) -> Parser<T, R>
where
    F: Fn(T) -> Option<R> + Send + Sync + 'static,
{
    satisfy(|_: &T| true).filter_map(f)
}

/// Repeats `parser` as often as it succeeds.
///
/// Results are ordered longest repetition first, then every shorter one,
/// ending with the empty repetition, so the first result is the greedy
/// reading. Repetition stops when `parser` succeeds without consuming
/// anything, which would otherwise repeat forever.
pub fn zero_or_more<T: Value, A: Value>(parser: &Parser<T, A>) -> Parser<T, Vec<A>> {
    let parser = parser.clone();
    Parser::new(move |input| {
        let parser = parser.clone();
        Seq::from_fn(move || Repetitions::new(parser.clone(), input))
    })
}

type Heads<'a, T, A> = Box<dyn Iterator<Item = (A, &'a [T])> + 'a>;

/// One level of a repetition: the input at that level and the readings of
/// the repeated parser not tried yet.
struct Frame<'a, T, A> {
    input: &'a [T],
    heads: Heads<'a, T, A>,
}

/// Depth-first walk over every repetition, kept on an explicit stack so the
/// length of the input never shows up as call depth.
///
/// `values[i]` is the reading chosen at `frames[i]`. A level is reported
/// once all of its longer continuations are exhausted, which gives the
/// longest-first order.
struct Repetitions<'a, T, A> {
    parser: Parser<T, A>,
    frames: Vec<Frame<'a, T, A>>,
    values: Vec<A>,
}

impl<'a, T: Value, A: Value> Repetitions<'a, T, A> {
    fn new(parser: Parser<T, A>, input: &'a [T]) -> Self {
        let heads = parser.run(input).iter();
        Repetitions {
            parser,
            frames: vec![Frame { input, heads }],
            values: Vec::new(),
        }
    }
}

impl<'a, T: Value, A: Value> Iterator for Repetitions<'a, T, A> {
    type Item = (Vec<A>, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.frames.last_mut()?;
            let input = frame.input;
            match frame.heads.next() {
                Some((head, rest)) if rest.len() < input.len() => {
                    let heads = self.parser.run(rest).iter();
                    self.values.push(head);
                    self.frames.push(Frame { input: rest, heads });
                }
                // Consumed nothing.
                Some(_) => {}
                None => {
                    self.frames.pop();
                    let found = self.values.clone();
                    self.values.pop();
                    return Some((found, input));
                }
            }
        }
    }
}

/// `parser` at least once.
pub fn one_or_more<T: Value, A: Value>(parser: &Parser<T, A>) -> Parser<T, Vec<A>> {
    succeed(curry(prepend::<A>))
        .apply(parser)
        .apply(&zero_or_more(parser))
}

/// Alternation over a list of parsers, in list order.
pub fn one_of<T: Value, R: Value, I>(parsers: I) -> Parser<T, R>
where
    I: IntoIterator<Item = Parser<T, R>>,
{
    parsers
        .into_iter()
        .fold(fail::<T, R>(), |choice, parser| choice.or(&parser))
}

/// Parses `parser`, then optionally a `suffix` that transforms its value.
/// Without a suffix the value passes through unchanged.
pub fn optionally_followed<T: Value, A: Value>(
    parser: &Parser<T, A>,
    suffix: &Parser<T, Func<A, A>>,
) -> Parser<T, A> {
    let apply_suffix = curry(|value: A, transform: Func<A, A>| transform(value));
    let keep: Func<A, A> = func(|value| value);
    succeed(apply_suffix)
        .apply(parser)
        .apply(&suffix.or(&succeed(keep)))
}

/// A parser built by calling `build` each time it is run.
pub fn lazy<T: Value, R: Value, F>(build: F) -> Parser<T, R>
where
    F: Fn() -> Parser<T, R> + Send + Sync + 'static,
{
    Parser::new(move |input| build().run(input))
}

/// Builds a self-referential parser once.
///
/// `build` receives a parser standing for the finished result and returns
/// the body. The stand-in only holds a weak reference; the parser returned
/// by `fix` owns the body, and every sequence it produces keeps the body
/// alive until the sequence and its iterators are gone. A stand-in that
/// outlives its `fix` parser fails on every input.
pub fn fix<T: Value, R: Value, F>(build: F) -> Parser<T, R>
where
    F: FnOnce(Parser<T, R>) -> Parser<T, R>,
{
    let slot: Arc<OnceCell<Parser<T, R>>> = Arc::new(OnceCell::new());
    let weak = Arc::downgrade(&slot);
    let this = Parser::new(move |input| match weak.upgrade() {
        Some(slot) => run_slot(&slot, input),
        None => Seq::empty(),
    });

    let body = build(this);
    // The stand-in cannot fill the slot, so it is still empty here.
    let _ = slot.set(body);

    Parser::new(move |input| run_slot(&slot, input))
}

fn run_slot<'a, T: Value, R: Value>(
    slot: &Arc<OnceCell<Parser<T, R>>>,
    input: &'a [T],
) -> Seq<'a, (R, &'a [T])> {
    match slot.get() {
        Some(body) => body.run(input).hold(Arc::clone(slot)),
        // Only reachable if the body is run while `build` is still executing.
        None => Seq::empty(),
    }
}
