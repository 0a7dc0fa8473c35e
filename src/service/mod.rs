//! `AsyncOptional` - Composable asynchronous partial functions.
//!
//! An `AsyncOptional<A, B>` is a service: an asynchronous function from a
//! request of type `A` to a response of type `B` that may instead declare
//! itself undefined for that request. Route matchers, middleware, and
//! fallback chains are built by composing services algebraically rather
//! than by hand-written control flow:
//!
//! - **Construction / adaptation**: [`AsyncOptional::lift`],
//!   [`AsyncOptional::from_partial`], [`AsyncOptional::empty`],
//!   [`AsyncOptional::contramap`], [`AsyncOptional::map`] (this module).
//! - **Sequencing**: [`AsyncOptional::point`], [`AsyncOptional::flat_map`],
//!   [`AsyncOptional::flat_map_task`] ([`sequence`]).
//! - **Fallback**: [`AsyncOptional::or`], [`AsyncOptional::or_else`]
//!   ([`fallback`]).
//! - **Error channel**: [`AsyncOptional::raise_error`],
//!   [`AsyncOptional::attempt`], [`AsyncOptional::handle_error`]
//!   ([`error`]).
//! - **Nondeterministic choice**: [`AsyncOptional::choose_any`],
//!   [`AsyncOptional::replay`] ([`choose`]).
//! - **Explicit algebra**: [`Algebra`] ([`algebra`]).
//!
//! Two outcomes must never be conflated: an *undefined* result (`None`) is
//! a routing miss, recoverable with `or`/`or_else`; a *fault* is a failure
//! of the underlying computation, recoverable only with
//! `attempt`/`handle_error`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use optask::service::AsyncOptional;
//! use optask::task::Task;
//!
//! let health = AsyncOptional::from_partial(|path: String| {
//!     if path == "/health" {
//!         Some(Task::now("ok".to_string()))
//!     } else {
//!         None
//!     }
//! });
//! let fallback = AsyncOptional::point("not found".to_string());
//! let routes = health.or_else(fallback);
//!
//! assert_eq!(routes.apply("/health".into()).await.unwrap(), Some("ok".into()));
//! ```

pub mod algebra;
pub mod choose;
pub mod error;
pub mod fallback;
pub mod sequence;

use std::sync::Arc;

use crate::option_transformer::OptionT;
use crate::task::Task;

pub use algebra::Algebra;

/// The shared run function of a service.
type Run<A, B> = dyn Fn(A) -> Task<Option<B>> + Send + Sync;

/// An asynchronous, partial function from `A` to `B`.
///
/// Wraps a total function `A -> Task<Option<B>>`: applying a service never
/// panics and performs no effects eagerly — it only constructs a deferred
/// computation, which resolves to `Some(response)` when the service applies
/// to the request, `None` when it does not, or a fault when the underlying
/// computation fails.
///
/// Services are immutable value objects. Every combinator returns a new
/// instance, and `Clone` is a cheap handle copy, so services can be shared
/// freely across threads and composed repeatedly.
pub struct AsyncOptional<A, B> {
    run: Arc<Run<A, B>>,
}

impl<A, B> std::fmt::Debug for AsyncOptional<A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("AsyncOptional").finish_non_exhaustive()
    }
}

impl<A, B> Clone for AsyncOptional<A, B> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Wraps a run function directly.
    ///
    /// This is the primitive constructor; every other constructor and
    /// combinator can be derived from it.
    ///
    /// # Arguments
    ///
    /// * `function` - The run function. It must construct its task without
    ///   performing effects; effects belong inside the task.
    pub fn lift<F>(function: F) -> Self
    where
        F: Fn(A) -> Task<Option<B>> + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(function),
        }
    }

    /// Builds a service from a partial function.
    ///
    /// The domain check is the `Option` returned by `partial`: returning
    /// `None` marks the input as outside the domain without constructing
    /// the underlying computation at all. Returning `Some(task)` marks it
    /// as defined; the task body still runs only when driven.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::service::AsyncOptional;
    /// use optask::task::Task;
    ///
    /// let evens = AsyncOptional::from_partial(|n: i32| {
    ///     (n % 2 == 0).then(|| Task::now(n / 2))
    /// });
    /// ```
    pub fn from_partial<F>(partial: F) -> Self
    where
        F: Fn(A) -> Option<Task<B>> + Send + Sync + 'static,
    {
        Self::lift(move |input| match partial(input) {
            Some(task) => task.fmap(Some),
            None => Task::now(None),
        })
    }

    /// The service that is undefined for every input.
    ///
    /// Identity element for [`AsyncOptional::or_else`].
    #[must_use]
    pub fn empty() -> Self {
        Self::lift(|_| Task::now(None))
    }
}

// =============================================================================
// Running
// =============================================================================

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Runs the service against an input, producing the deferred outcome.
    ///
    /// No effects happen until the returned task is driven.
    pub fn apply(&self, input: A) -> Task<Option<B>> {
        (self.run)(input)
    }

    /// Runs the service, viewing the outcome through the option
    /// transformer.
    ///
    /// Equivalent to `OptionT::new(self.apply(input))`; convenient when
    /// composing the result further with [`OptionT`] operations.
    pub fn run_t(&self, input: A) -> OptionT<B> {
        OptionT::new(self.apply(input))
    }
}

// =============================================================================
// Adaptation
// =============================================================================

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Adapts the input side by precomposition.
    ///
    /// `service.contramap(f)` behaves on input `c` exactly as `service`
    /// behaves on `f(c)`. Pure input adaptation; definedness and faults are
    /// untouched. `contramap(identity)` is the identity, and `contramap`
    /// commutes with [`AsyncOptional::map`].
    pub fn contramap<C, F>(&self, function: F) -> AsyncOptional<C, B>
    where
        C: Send + 'static,
        F: Fn(C) -> A + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        AsyncOptional::lift(move |input| run(function(input)))
    }

    /// Adapts the output side over the defined case only.
    ///
    /// The function is not invoked when the service resolves undefined, and
    /// faults pass through untouched. `map(identity)` is the identity.
    pub fn map<C, F>(&self, function: F) -> AsyncOptional<A, C>
    where
        C: Send + 'static,
        F: Fn(B) -> C + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let function = Arc::new(function);
        AsyncOptional::lift(move |input| {
            let function = Arc::clone(&function);
            OptionT::new(run(input))
                .fmap(move |value| function(value))
                .run()
        })
    }
}
