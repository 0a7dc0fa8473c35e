//! Fault values for the `Task` failure channel.
//!
//! A [`Fault`] is what a failed asynchronous computation carries. It is
//! deliberately distinct from "undefined": a service that does not apply to
//! an input yields `None`, while a service whose underlying computation
//! breaks yields a `Fault`. The two channels never mix — fallback
//! combinators recover only the former, error combinators only the latter.
//!
//! `Fault` is a cheaply clonable, type-erased wrapper so that a single
//! failure can be observed by several combinators (for example `attempt`
//! reifying it into the value channel) without requiring every error type
//! to be `Clone`.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A failure of an underlying asynchronous computation.
///
/// Wraps any `Error + Send + Sync` value behind an `Arc`, so cloning a
/// `Fault` is cheap and the original error type can be recovered with
/// [`Fault::downcast_ref`].
///
/// # Examples
///
/// ```rust
/// use optask::fault::Fault;
///
/// let fault = Fault::message("backend unavailable");
/// assert_eq!(fault.to_string(), "backend unavailable");
/// ```
#[derive(Debug, Clone)]
pub struct Fault {
    source: Arc<dyn Error + Send + Sync>,
}

impl Fault {
    /// Wraps an arbitrary error value in a `Fault`.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error. It does not need to be `Clone`;
    ///   the `Fault` shares it behind an `Arc`.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(error),
        }
    }

    /// Creates a `Fault` from a plain message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::fault::Fault;
    ///
    /// let fault = Fault::message("boom");
    /// assert_eq!(fault.to_string(), "boom");
    /// ```
    pub fn message(text: impl Into<String>) -> Self {
        Self::new(MessageFault(text.into()))
    }

    /// Attempts to view the underlying error as a concrete type.
    ///
    /// Returns `None` when the fault was raised with a different error
    /// type.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        let source: &(dyn Error + 'static) = self.source.as_ref();
        source.downcast_ref::<E>()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, formatter)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// A fault carrying only a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
struct MessageFault(String);

/// Raised when a replay service is applied more than once.
///
/// The remaining computations exposed by `choose_any` are resumable
/// in-flight computations, not restartable ones: the first application of a
/// replay service drives the original computation to completion, and any
/// further application faults with this error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("replayed computation was already driven to completion")]
pub struct ReplayExhausted;

/// Raised when racing an empty list of tasks.
///
/// A race needs at least one candidate to ever resolve; rather than hang
/// forever, `Task::race_all` faults immediately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot race an empty list of tasks")]
pub struct EmptyRace;
