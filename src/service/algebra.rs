//! Explicit algebra capability object.
//!
//! Generic code that needs the service algebra — `point`, `bind`, the
//! error operations, `choose_any` — takes an [`Algebra`] value as an
//! explicit argument instead of resolving an ambient instance. The value
//! is zero-sized and `Copy`; it exists purely to make the capability a
//! visible parameter with the laws attached to one named surface.
//!
//! # Examples
//!
//! ```rust,ignore
//! use optask::service::{Algebra, AsyncOptional};
//!
//! fn constant_route<A: Clone + Send + Sync + 'static>(
//!     algebra: &Algebra<A>,
//!     body: String,
//! ) -> AsyncOptional<A, String> {
//!     algebra.point(body)
//! }
//! ```

use std::marker::PhantomData;

use crate::fault::Fault;

use super::AsyncOptional;

/// The service algebra for request type `A`, passed explicitly.
pub struct Algebra<A> {
    _input: PhantomData<fn(A) -> A>,
}

impl<A> std::fmt::Debug for Algebra<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Algebra")
    }
}

impl<A> Clone for Algebra<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Algebra<A> {}

impl<A> Default for Algebra<A> {
    fn default() -> Self {
        Self {
            _input: PhantomData,
        }
    }
}

impl<A> Algebra<A>
where
    A: Send + 'static,
{
    /// Creates the algebra value for request type `A`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _input: PhantomData,
        }
    }

    /// The constant defined service. See [`AsyncOptional::point`].
    pub fn point<B>(&self, value: B) -> AsyncOptional<A, B>
    where
        B: Clone + Send + Sync + 'static,
    {
        AsyncOptional::point(value)
    }

    /// Monadic bind. See [`AsyncOptional::flat_map`].
    pub fn bind<B, C, F>(
        &self,
        service: &AsyncOptional<A, B>,
        function: F,
    ) -> AsyncOptional<A, C>
    where
        A: Clone,
        B: Send + 'static,
        C: Send + 'static,
        F: Fn(B) -> AsyncOptional<A, C> + Send + Sync + 'static,
    {
        service.flat_map(function)
    }

    /// The always-faulting service. See [`AsyncOptional::raise_error`].
    pub fn raise_error<B>(&self, fault: Fault) -> AsyncOptional<A, B>
    where
        B: Send + 'static,
    {
        AsyncOptional::raise_error(fault)
    }

    /// Alias for [`Algebra::raise_error`].
    pub fn fail<B>(&self, fault: Fault) -> AsyncOptional<A, B>
    where
        B: Send + 'static,
    {
        self.raise_error(fault)
    }

    /// Fault reification. See [`AsyncOptional::attempt`].
    pub fn attempt<B>(&self, service: &AsyncOptional<A, B>) -> AsyncOptional<A, Result<B, Fault>>
    where
        B: Send + 'static,
    {
        service.attempt()
    }

    /// Fault recovery. See [`AsyncOptional::handle_error`].
    pub fn handle_error<B, F>(
        &self,
        service: &AsyncOptional<A, B>,
        handler: F,
    ) -> AsyncOptional<A, B>
    where
        A: Clone,
        B: Send + 'static,
        F: Fn(Fault) -> AsyncOptional<A, B> + Send + Sync + 'static,
    {
        service.handle_error(handler)
    }

    /// Racing with ordered fallback. See [`AsyncOptional::choose_any`].
    pub fn choose_any<B>(
        &self,
        head: AsyncOptional<A, B>,
        tail: Vec<AsyncOptional<A, B>>,
    ) -> AsyncOptional<A, (B, Vec<AsyncOptional<A, B>>)>
    where
        A: Clone,
        B: Send + 'static,
    {
        AsyncOptional::choose_any(head, tail)
    }
}
