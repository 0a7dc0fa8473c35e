//! Sequential fallback composition.
//!
//! Fallback recovers *undefined* results only; faults propagate through
//! both combinators untouched. The right-hand side is never started before
//! the left-hand side has resolved as undefined — fallback is sequential,
//! never raced (racing lives in [`super::choose`]).

use std::sync::Arc;

use crate::option_transformer::OptionT;
use crate::task::Task;

use super::AsyncOptional;

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Runs the service, resolving undefined to a lazily built default.
    ///
    /// The `default` thunk is evaluated only when the service resolves
    /// undefined for this input. Laziness is a correctness requirement, not
    /// an optimization: the default may carry side effects or be expensive.
    ///
    /// # Arguments
    ///
    /// * `input` - The request to run the service against.
    /// * `default` - Thunk producing the fallback task.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::service::AsyncOptional;
    /// use optask::task::Task;
    ///
    /// let service = AsyncOptional::<i32, i32>::empty();
    /// let value = service.or(1, || Task::now(0)).await.unwrap();
    /// assert_eq!(value, 0);
    /// ```
    pub fn or<F>(&self, input: A, default: F) -> Task<B>
    where
        F: FnOnce() -> Task<B> + Send + 'static,
    {
        self.run_t(input).get_or_else(default)
    }

    /// Sequential fallback to another service.
    ///
    /// For each input, this service runs first; a defined result wins
    /// unconditionally and `other` is not invoked. Only after this service
    /// resolves undefined does `other` run against the same input, and its
    /// result — defined or not — is the outcome.
    ///
    /// Associative, with [`AsyncOptional::empty`] as the identity element.
    #[must_use]
    pub fn or_else(&self, other: Self) -> Self
    where
        A: Clone,
    {
        let first = Arc::clone(&self.run);
        let second = Arc::clone(&other.run);
        Self::lift(move |input: A| {
            let second = Arc::clone(&second);
            let retry = input.clone();
            OptionT::new(first(input))
                .or_else(move || OptionT::new(second(retry)))
                .run()
        })
    }
}
