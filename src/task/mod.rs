//! `Task` - Deferred asynchronous computations with a failure channel.
//!
//! A `Task<A>` describes an asynchronous computation that, once driven,
//! resolves to `Result<A, Fault>`. Nothing happens when a `Task` is
//! constructed or combined; effects run only when the task is awaited,
//! which keeps composition referentially transparent up to the point the
//! value is actually demanded.
//!
//! This is the minimal capability set the service combinators rely on:
//!
//! - [`Task::now`] — immediate success.
//! - [`Task::fail`] — immediate fault.
//! - [`Task::new`] / [`Task::try_new`] / [`Task::from_future`] — deferred
//!   construction.
//! - [`Task::fmap`] / [`Task::flat_map`] — deferred chaining.
//! - [`Task::attempt`] / [`Task::handle_error`] — the recoverable error
//!   channel.
//! - [`Task::race_all`] — start several tasks concurrently and resolve to
//!   the first completion plus handles to the rest (see [`race`]).
//!
//! # impl `Future`
//!
//! `Task` implements `Future` directly via `pin_project_lite`, so it can
//! be awaited without any unsafe code:
//!
//! ```rust,ignore
//! use optask::task::Task;
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = Task::now(42).await;
//!     assert_eq!(result.unwrap(), 42);
//! }
//! ```
//!
//! # Evaluation Semantics
//!
//! `Task::now(value)` represents an already-computed value. When `fmap` or
//! `flat_map` is applied to such a task, the transformation runs
//! immediately at composition time: pure values have no side effects, so
//! immediate evaluation is observationally equivalent and avoids boxing.
//! Anything that performs effects must go through `Task::new` (or
//! `try_new`/`from_future`), which defers the closure until the task is
//! polled for the first time.
//!
//! ```rust,ignore
//! // Deferred: the closure body runs when the task is awaited, not here.
//! let task = Task::new(|| async {
//!     fetch_from_backend().await
//! });
//! ```

pub mod race;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use crate::fault::Fault;

/// Boxed future resolving to the task's outcome.
pub(crate) type BoxedOutcome<A> = BoxFuture<'static, Result<A, Fault>>;

pin_project! {
    /// A deferred asynchronous computation that may fail.
    ///
    /// `Task<A>` wraps a computation producing `Result<A, Fault>`. The
    /// computation does not start until the task is awaited, and a task is
    /// consumed by driving it to completion. Dropping an undriven or
    /// partially driven task cancels it.
    ///
    /// # Monad Laws
    ///
    /// `Task` satisfies the monad laws on its success channel:
    ///
    /// 1. **Left Identity**: `Task::now(a).flat_map(f) == f(a)`
    /// 2. **Right Identity**: `m.flat_map(Task::now) == m`
    /// 3. **Associativity**:
    ///    `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
    ///
    /// Faults short-circuit `fmap` and `flat_map` and are recovered only by
    /// [`Task::attempt`] and [`Task::handle_error`].
    pub struct Task<A> {
        #[pin]
        state: TaskState<A>,
    }
}

pin_project! {
    /// Internal state machine for `Task`.
    ///
    /// State transitions:
    ///
    /// - `Pure` / `Faulted` -> `Completed` (resolve on first poll)
    /// - `Defer` -> `Running` (on first poll, the thunk builds the future)
    /// - `Running` -> `Completed` (when the inner future resolves)
    #[project = TaskStateProj]
    enum TaskState<A> {
        /// An already-successful value, returned on first poll.
        Pure {
            value: Option<A>,
        },
        /// An already-failed computation, returned on first poll.
        Faulted {
            fault: Option<Fault>,
        },
        /// A deferred computation that builds its future when first polled.
        Defer {
            thunk: Option<Box<dyn FnOnce() -> BoxedOutcome<A> + Send>>,
        },
        /// A running future created from the deferred thunk, or resumed
        /// from a race.
        Running {
            #[pin]
            future: BoxedOutcome<A>,
        },
        /// The computation has completed (transition state only).
        Completed,
    }
}

impl<A> std::fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            TaskState::Pure { .. } => "Pure",
            TaskState::Faulted { .. } => "Faulted",
            TaskState::Defer { .. } => "Defer",
            TaskState::Running { .. } => "Running",
            TaskState::Completed => "Completed",
        };
        formatter
            .debug_struct("Task")
            .field("state", &state)
            .finish()
    }
}

// =============================================================================
// Future Implementation
// =============================================================================

impl<A> Future for Task<A> {
    type Output = Result<A, Fault>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                TaskStateProj::Pure { value } => {
                    // INVARIANT: Pure is polled exactly once before Completed.
                    let value = value.take().expect(
                        "Task internal error: Pure value was already consumed. \
                         This indicates the Task was polled after completion.",
                    );
                    this.state.set(TaskState::Completed);
                    return Poll::Ready(Ok(value));
                }
                TaskStateProj::Faulted { fault } => {
                    // INVARIANT: Faulted is polled exactly once before Completed.
                    let fault = fault.take().expect(
                        "Task internal error: Faulted value was already consumed. \
                         This indicates the Task was polled after completion.",
                    );
                    this.state.set(TaskState::Completed);
                    return Poll::Ready(Err(fault));
                }
                TaskStateProj::Defer { thunk } => {
                    // INVARIANT: Defer is polled exactly once before Running.
                    let thunk = thunk.take().expect(
                        "Task internal error: Defer thunk was already consumed. \
                         This indicates a state machine invariant violation.",
                    );
                    let future = thunk();
                    this.state.set(TaskState::Running { future });
                    // Loop to poll the newly created future.
                }
                TaskStateProj::Running { future } => match future.poll(context) {
                    Poll::Ready(result) => {
                        this.state.set(TaskState::Completed);
                        return Poll::Ready(result);
                    }
                    Poll::Pending => return Poll::Pending,
                },
                TaskStateProj::Completed => {
                    panic!(
                        "Task internal error: Task was polled after completion. \
                         Futures should not be polled after returning Poll::Ready."
                    );
                }
            }
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<A: 'static> Task<A> {
    /// Creates a deferred task from an async closure that cannot fail.
    ///
    /// The closure will not be executed until the task is awaited.
    ///
    /// # Arguments
    ///
    /// * `action` - A closure returning a future that produces the value.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::task::Task;
    ///
    /// let task = Task::new(|| async {
    ///     tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    ///     42
    /// });
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            state: TaskState::Defer {
                thunk: Some(Box::new(move || {
                    Box::pin(async move { Ok(action().await) })
                })),
            },
        }
    }

    /// Creates a deferred task from an async closure that may fail.
    ///
    /// # Arguments
    ///
    /// * `action` - A closure returning a future that produces
    ///   `Result<A, Fault>`.
    pub fn try_new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<A, Fault>> + Send + 'static,
    {
        Self {
            state: TaskState::Defer {
                thunk: Some(Box::new(move || Box::pin(action()))),
            },
        }
    }

    /// Creates a task from an existing future.
    ///
    /// The future should not have been polled yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            state: TaskState::Defer {
                thunk: Some(Box::new(move || {
                    Box::pin(async move { Ok(future.await) })
                })),
            },
        }
    }

    /// Resumes a partially driven outcome future as a task.
    ///
    /// Used by the racing primitive to hand the still-pending computations
    /// back to the caller in a drivable form.
    pub(crate) fn resume(future: BoxedOutcome<A>) -> Self {
        Self {
            state: TaskState::Running { future },
        }
    }
}

impl<A: Send + 'static> Task<A> {
    /// Wraps an already-computed value in an immediately successful task.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::task::Task;
    ///
    /// let task = Task::now(42);
    /// assert_eq!(task.await.unwrap(), 42);
    /// ```
    pub const fn now(value: A) -> Self {
        Self {
            state: TaskState::Pure { value: Some(value) },
        }
    }

    /// Creates an immediately failed task carrying the given fault.
    ///
    /// A fault is not a routing miss: it propagates through `fmap` and
    /// `flat_map` and is only recovered by [`Task::attempt`] or
    /// [`Task::handle_error`].
    #[must_use]
    pub fn fail(fault: Fault) -> Self {
        Self {
            state: TaskState::Faulted { fault: Some(fault) },
        }
    }
}

// =============================================================================
// Functor / Monad Operations
// =============================================================================

impl<A: Send + 'static> Task<A> {
    /// Transforms the successful result of this task.
    ///
    /// Faults pass through untouched. When the task is already pure the
    /// function is applied immediately without allocation; otherwise the
    /// transformation is deferred.
    ///
    /// # Arguments
    ///
    /// * `function` - A function applied to the successful value.
    pub fn fmap<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        match self {
            Self {
                state: TaskState::Pure { value: Some(value) },
            } => Task::now(function(value)),
            Self {
                state: TaskState::Faulted { fault: Some(fault) },
            } => Task::fail(fault),
            other => Task::try_new(move || async move { other.await.map(function) }),
        }
    }

    /// Chains this task into another task produced from its result.
    ///
    /// This is monadic bind on the success channel: a fault in either step
    /// short-circuits the chain. The continuation is never constructed
    /// before this task resolves successfully.
    ///
    /// # Arguments
    ///
    /// * `function` - A function taking the successful value and returning
    ///   the next task.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::task::Task;
    ///
    /// let task = Task::now(10).flat_map(|x| Task::now(x * 2));
    /// assert_eq!(task.await.unwrap(), 20);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> Task<B> + Send + 'static,
        B: Send + 'static,
    {
        match self {
            Self {
                state: TaskState::Pure { value: Some(value) },
            } => function(value),
            Self {
                state: TaskState::Faulted { fault: Some(fault) },
            } => Task::fail(fault),
            other => Task::try_new(move || async move {
                match other.await {
                    Ok(value) => function(value).await,
                    Err(fault) => Err(fault),
                }
            }),
        }
    }

    /// Alias for `flat_map`.
    ///
    /// This is the conventional Rust name for monadic bind.
    pub fn and_then<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> Task<B> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }
}

// =============================================================================
// Error Channel
// =============================================================================

impl<A: Send + 'static> Task<A> {
    /// Reifies the failure channel into the value channel.
    ///
    /// The resulting task never faults: a successful value surfaces as
    /// `Ok`, a fault surfaces as `Err`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::fault::Fault;
    /// use optask::task::Task;
    ///
    /// let outcome = Task::<i32>::fail(Fault::message("boom")).attempt().await;
    /// assert_eq!(outcome.unwrap().unwrap_err().to_string(), "boom");
    /// ```
    #[must_use]
    pub fn attempt(self) -> Task<Result<A, Fault>> {
        match self {
            Self {
                state: TaskState::Pure { value: Some(value) },
            } => Task::now(Ok(value)),
            Self {
                state: TaskState::Faulted { fault: Some(fault) },
            } => Task::now(Err(fault)),
            other => Task::new(move || async move { other.await }),
        }
    }

    /// Recovers a fault by running a replacement task built from it.
    ///
    /// A successful task passes through unchanged; the handler is only
    /// constructed when this task actually faults.
    ///
    /// # Arguments
    ///
    /// * `handler` - A function turning the fault into a recovery task.
    pub fn handle_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Self + Send + 'static,
    {
        match self {
            task @ Self {
                state: TaskState::Pure { .. },
            } => task,
            Self {
                state: TaskState::Faulted { fault: Some(fault) },
            } => handler(fault),
            other => Task::try_new(move || async move {
                match other.await {
                    Ok(value) => Ok(value),
                    Err(fault) => handler(fault).await,
                }
            }),
        }
    }
}

// =============================================================================
// Timer Utility
// =============================================================================

impl Task<()> {
    /// Creates a task that waits for the given duration.
    ///
    /// The delay does not start until the task is awaited.
    #[must_use]
    pub fn delay(duration: Duration) -> Self {
        Self::new(move || async move {
            tokio::time::sleep(duration).await;
        })
    }
}
