//! Monadic sequencing for services.
//!
//! Sequencing is strictly left-to-right: the continuation is never
//! constructed before the receiver has resolved, and an undefined receiver
//! short-circuits without invoking the continuation at all. The key
//! asymmetry of [`AsyncOptional::flat_map`] is that the continuation
//! service still sees the *original* request — only the defined payload is
//! threaded through the computation.

use std::sync::Arc;

use crate::option_transformer::OptionT;
use crate::task::Task;

use super::AsyncOptional;

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// The constant service that is defined with `value` for every input.
    ///
    /// The input is never consulted. Identity element for
    /// [`AsyncOptional::flat_map`]: `point(b).flat_map(f)` behaves as
    /// `f(b)`, and `service.flat_map(point)` behaves as `service`.
    pub fn point(value: B) -> Self
    where
        B: Clone + Sync,
    {
        Self::lift(move |_| Task::now(Some(value.clone())))
    }

    /// Chains the defined payload into a task-level continuation.
    ///
    /// When this service is defined with `b`, the outcome is `function(b)`
    /// — which may itself be undefined. When this service is undefined, the
    /// result is undefined and `function` is not invoked.
    pub fn flat_map_task<C, F>(&self, function: F) -> AsyncOptional<A, C>
    where
        C: Send + 'static,
        F: Fn(B) -> Task<Option<C>> + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let function = Arc::new(function);
        AsyncOptional::lift(move |input| {
            let function = Arc::clone(&function);
            OptionT::new(run(input))
                .flat_map(move |value| OptionT::new(function(value)))
                .run()
        })
    }

    /// Chains the defined payload into a continuation service, re-run
    /// against the original input.
    ///
    /// The continuation service sees the same request this service was
    /// applied to; only the defined payload travels through `function`.
    /// Undefined short-circuits without invoking `function`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::service::AsyncOptional;
    ///
    /// let doubled = AsyncOptional::<i32, i32>::point(10)
    ///     .flat_map(|b| AsyncOptional::lift(move |input: i32| {
    ///         // `input` is the original request, `b` the payload.
    ///         optask::task::Task::now(Some(b + input))
    ///     }));
    /// ```
    pub fn flat_map<C, F>(&self, function: F) -> AsyncOptional<A, C>
    where
        A: Clone,
        C: Send + 'static,
        F: Fn(B) -> AsyncOptional<A, C> + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let function = Arc::new(function);
        AsyncOptional::lift(move |input: A| {
            let function = Arc::clone(&function);
            let original = input.clone();
            OptionT::new(run(input))
                .flat_map(move |value| OptionT::new(function(value).apply(original)))
                .run()
        })
    }
}
