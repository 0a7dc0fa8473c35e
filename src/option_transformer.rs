//! `OptionT` - Option Monad Transformer over `Task`.
//!
//! `OptionT` layers definedness on top of the task failure channel: a value
//! of type `OptionT<A>` is a deferred computation that may fault (the task
//! channel) and, when it succeeds, may still be undefined (the option
//! channel). The service combinators use it to express
//! short-circuit-on-undefined once instead of re-deriving it in every
//! combinator.
//!
//! # Design Note
//!
//! Rust has no higher-kinded types, so instead of a transformer generic
//! over the inner monad this wrapper is fixed to [`Task`], the one inner
//! monad this crate composes over.
//!
//! # Examples
//!
//! ```rust,ignore
//! use optask::option_transformer::OptionT;
//!
//! let value = OptionT::pure(21).fmap(|x| x * 2).run().await;
//! assert_eq!(value.unwrap(), Some(42));
//! ```

use crate::fault::Fault;
use crate::task::Task;

/// A deferred, possibly-undefined, possibly-faulting value.
///
/// Wraps `Task<Option<A>>`. The two channels stay disjoint: `fmap`,
/// `flat_map`, `or_else`, and `get_or_else` operate on definedness only and
/// let faults pass through untouched.
pub struct OptionT<A> {
    inner: Task<Option<A>>,
}

impl<A: Send + 'static> OptionT<A> {
    /// Wraps an existing task of an optional value.
    pub const fn new(inner: Task<Option<A>>) -> Self {
        Self { inner }
    }

    /// Unwraps the transformer, returning the underlying task.
    #[must_use]
    pub fn run(self) -> Task<Option<A>> {
        self.inner
    }

    /// An immediately defined value.
    pub const fn pure(value: A) -> Self {
        Self::new(Task::now(Some(value)))
    }

    /// An immediately undefined value.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Task::now(None))
    }

    /// Lifts an always-defined task into the transformer.
    #[must_use]
    pub fn lift(task: Task<A>) -> Self {
        Self::new(task.fmap(Some))
    }

    /// An immediately faulting value.
    #[must_use]
    pub fn fail(fault: Fault) -> Self {
        Self::new(Task::fail(fault))
    }

    /// Maps over the defined case; undefined and faults pass through.
    ///
    /// The function is not invoked when the value is undefined.
    pub fn fmap<B, F>(self, function: F) -> OptionT<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        OptionT::new(self.inner.fmap(|option| option.map(function)))
    }

    /// Chains on the defined case; undefined short-circuits.
    ///
    /// The continuation is never constructed when this value resolves
    /// undefined or faults.
    pub fn flat_map<B, F>(self, function: F) -> OptionT<B>
    where
        F: FnOnce(A) -> OptionT<B> + Send + 'static,
        B: Send + 'static,
    {
        OptionT::new(self.inner.flat_map(|option| match option {
            Some(value) => function(value).inner,
            None => Task::now(None),
        }))
    }

    /// Falls back to an alternative when this value resolves undefined.
    ///
    /// Sequential: the alternative is only constructed after this value has
    /// resolved as undefined. A defined result wins unconditionally, and a
    /// fault propagates without consulting the alternative.
    pub fn or_else<F>(self, alternative: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self::new(self.inner.flat_map(|option| match option {
            Some(value) => Task::now(Some(value)),
            None => alternative().inner,
        }))
    }

    /// Resolves to the defined value, or to a lazily built default task.
    ///
    /// The default thunk is never evaluated when the value is defined;
    /// laziness here is a correctness requirement, since the default may
    /// carry side effects.
    pub fn get_or_else<F>(self, default: F) -> Task<A>
    where
        F: FnOnce() -> Task<A> + Send + 'static,
    {
        self.inner.flat_map(|option| match option {
            Some(value) => Task::now(value),
            None => default(),
        })
    }
}
