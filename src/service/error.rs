//! The service-level error channel.
//!
//! A fault is a failure of the underlying computation, not a routing miss:
//! `or`/`or_else` never observe it, and `attempt`/`handle_error` never
//! observe undefined results. The two channels are disjoint by
//! construction.

use std::sync::Arc;

use crate::fault::Fault;
use crate::task::Task;

use super::AsyncOptional;

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// The service that faults with the given error for every input.
    ///
    /// Distinct from [`AsyncOptional::empty`]: a fault is not "does not
    /// apply", it is a failed computation.
    #[must_use]
    pub fn raise_error(fault: Fault) -> Self {
        Self::lift(move |_| Task::fail(fault.clone()))
    }

    /// Alias for [`AsyncOptional::raise_error`].
    #[must_use]
    pub fn fail(fault: Fault) -> Self {
        Self::raise_error(fault)
    }

    /// Reifies faults into the value channel.
    ///
    /// - A fault surfaces as a **defined** `Err(fault)`.
    /// - A defined value surfaces as `Ok(value)`.
    /// - An undefined result stays undefined — a routing miss is not an
    ///   error, and reification does not change definedness semantics.
    #[must_use]
    pub fn attempt(&self) -> AsyncOptional<A, Result<B, Fault>> {
        let run = Arc::clone(&self.run);
        AsyncOptional::lift(move |input| {
            run(input).attempt().fmap(|outcome| match outcome {
                Ok(Some(value)) => Some(Ok(value)),
                Ok(None) => None,
                Err(fault) => Some(Err(fault)),
            })
        })
    }

    /// Recovers faults by running a replacement service against the same
    /// original input.
    ///
    /// A successful run — defined or undefined — passes through unchanged;
    /// the handler is only consulted when the underlying computation
    /// faults.
    ///
    /// # Arguments
    ///
    /// * `handler` - Builds the recovery service from the fault.
    pub fn handle_error<F>(&self, handler: F) -> Self
    where
        A: Clone,
        F: Fn(Fault) -> Self + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let handler = Arc::new(handler);
        Self::lift(move |input: A| {
            let handler = Arc::clone(&handler);
            let retry = input.clone();
            run(input).handle_error(move |fault| handler(fault).apply(retry))
        })
    }
}
