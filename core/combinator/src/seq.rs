//! FILENAME: core/combinator/src/seq.rs
//! PURPOSE: Lazy, restartable sequences used to carry parse results.
//! CONTEXT: A parser answers "every way this input could be consumed".
//! Those answers are produced on demand: nothing is computed until a
//! consumer pulls from an iterator, and a consumer that only needs the
//! first answer never pays for the rest.
//!
//! A `Seq` stores an iterator factory rather than an iterator, so the same
//! sequence value can be walked any number of times. Walking it never
//! mutates it.

use std::fmt;
use std::rc::Rc;

type Factory<'a, A> = Rc<dyn Fn() -> Box<dyn Iterator<Item = A> + 'a> + 'a>;

/// A lazy, pull-based, possibly infinite sequence of `A`.
pub struct Seq<'a, A> {
    factory: Factory<'a, A>,
}

impl<'a, A: 'a> Seq<'a, A> {
    /// Builds a sequence from a function that creates a fresh iterator on
    /// every call.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: Iterator<Item = A> + 'a,
    {
        Seq {
            factory: Rc::new(move || Box::new(factory()) as Box<dyn Iterator<Item = A> + 'a>),
        }
    }

    /// The sequence with no elements.
    pub fn empty() -> Self {
        Seq::from_fn(std::iter::empty::<A>)
    }

    /// The sequence holding exactly `value`.
    pub fn one(value: A) -> Self
    where
        A: Clone,
    {
        Seq::from_fn(move || std::iter::once(value.clone()))
    }

    pub fn from_vec(items: Vec<A>) -> Self
    where
        A: Clone,
    {
        Seq::from_fn(move || items.clone().into_iter())
    }

    /// Returns a fresh iterator positioned at the start of the sequence.
    pub fn iter(&self) -> Box<dyn Iterator<Item = A> + 'a> {
        (self.factory)()
    }

    /// All elements of `self`, then all elements of `other`.
    /// Neither side is forced until the iterator reaches it.
    pub fn concat(self, other: Seq<'a, A>) -> Self {
        Seq::from_fn(move || self.iter().chain(other.iter()))
    }

    pub fn map<B: 'a, F>(self, f: F) -> Seq<'a, B>
    where
        F: Fn(A) -> B + 'a,
    {
        let f = Rc::new(f);
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            self.iter().map(move |item| f(item))
        })
    }

    /// Replaces every element with the sequence `f` produces for it and
    /// splices the results together in order.
    pub fn flat_map<B: 'a, F>(self, f: F) -> Seq<'a, B>
    where
        F: Fn(A) -> Seq<'a, B> + 'a,
    {
        let f = Rc::new(f);
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            self.iter().flat_map(move |item| f(item).iter())
        })
    }

    /// Keeps at most the first `n` elements.
    pub fn take(self, n: usize) -> Self {
        Seq::from_fn(move || self.iter().take(n))
    }

    /// Pulls the first element, if any.
    pub fn first(&self) -> Option<A> {
        self.iter().next()
    }

    /// True when the sequence yields nothing. Pulls at most one element.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Ties `guard` to this sequence and to every iterator it hands out, so
    /// whatever the guard owns stays alive while results are still being
    /// pulled.
    pub fn hold<G: Clone + 'a>(self, guard: G) -> Self {
        Seq::from_fn(move || Held {
            inner: self.iter(),
            _guard: guard.clone(),
        })
    }
}

impl<A> Clone for Seq<'_, A> {
    fn clone(&self) -> Self {
        Seq {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<A> fmt::Debug for Seq<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq").finish_non_exhaustive()
    }
}

impl<'a, A: 'a> IntoIterator for Seq<'a, A> {
    type Item = A;
    type IntoIter = Box<dyn Iterator<Item = A> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A: 'a> IntoIterator for &Seq<'a, A> {
    type Item = A;
    type IntoIter = Box<dyn Iterator<Item = A> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator adapter that owns a keep-alive value next to the iterator.
struct Held<I, G> {
    inner: I,
    _guard: G,
}

impl<I: Iterator, G> Iterator for Held<I, G> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }
}
