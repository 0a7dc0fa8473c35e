//! Racing primitive: first completion plus resumable handles to the rest.
//!
//! This is the only place the crate runs computations concurrently. All
//! candidates are polled inside a single future (no spawning, no runtime
//! requirement); the race resolves as soon as one candidate completes, and
//! the others are handed back as tasks that resume exactly where they were
//! suspended.

use std::task::Poll;

use tracing::trace;

use crate::fault::{EmptyRace, Fault};

use super::{BoxedOutcome, Task};

impl<A: Send + 'static> Task<A> {
    /// Races several tasks, resolving to the first completion and the
    /// still-pending rest.
    ///
    /// All candidates start concurrently when the returned task is driven.
    /// The outcome pairs the first completed value with the remaining
    /// computations **in their original order**, each resumable by awaiting
    /// it and cancellable by dropping it. The crate issues no implicit
    /// cancellation.
    ///
    /// When several candidates become ready during the same poll, the
    /// earliest in declared order counts as the first completion.
    ///
    /// # Faults
    ///
    /// - Racing an empty list faults immediately with [`EmptyRace`].
    /// - If the first completion is a fault, the combined task faults with
    ///   it and the remaining computations are dropped.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use optask::task::Task;
    /// use std::time::Duration;
    ///
    /// let slow = Task::new(|| async {
    ///     tokio::time::sleep(Duration::from_millis(50)).await;
    ///     1
    /// });
    /// let fast = Task::now(2);
    ///
    /// let (first, remaining) = Task::race_all(vec![slow, fast]).await.unwrap();
    /// assert_eq!(first, 2);
    /// assert_eq!(remaining.len(), 1);
    /// ```
    pub fn race_all(tasks: Vec<Self>) -> Task<(A, Vec<Self>)> {
        if tasks.is_empty() {
            return Task::fail(Fault::new(EmptyRace));
        }

        Task::try_new(move || async move {
            let mut slots: Vec<Option<BoxedOutcome<A>>> = tasks
                .into_iter()
                .map(|task| Some(Box::pin(task) as BoxedOutcome<A>))
                .collect();

            let (winner, first) = std::future::poll_fn(|context| {
                for (index, slot) in slots.iter_mut().enumerate() {
                    if let Some(future) = slot.as_mut() {
                        if let Poll::Ready(result) = future.as_mut().poll(context) {
                            *slot = None;
                            return Poll::Ready((index, result));
                        }
                    }
                }
                Poll::Pending
            })
            .await;

            trace!(winner, "race resolved to its first completion");

            // Fail-fast: a faulting first completion takes the whole race
            // down and drops (cancels) the remaining computations.
            let first = first?;

            let remaining: Vec<Self> = slots.into_iter().flatten().map(Task::resume).collect();
            Ok((first, remaining))
        })
    }
}
