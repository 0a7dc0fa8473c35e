//! Nondeterministic choice: racing with ordered fallback.
//!
//! [`AsyncOptional::choose_any`] starts every candidate concurrently, then
//! resolves the winner deterministically: the first *completion* does not
//! automatically win — an undefined completion triggers a sequential walk
//! of the still-pending candidates in declared order, so among candidates
//! that are ultimately defined, declaration order is priority order. This
//! keeps the efficiency of starting everything at once without ever
//! producing a "whichever finished first, even if undefined" outcome.
//!
//! The chosen winner comes paired with the candidates that were still
//! pending at resolution time, re-wrapped as replay services so the caller
//! decides whether to drive, keep, or drop (cancel) them.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::fault::{Fault, ReplayExhausted};
use crate::task::Task;

use super::AsyncOptional;

impl<A, B> AsyncOptional<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Races candidate services with deterministic, declaration-ordered
    /// choice among defined outcomes.
    ///
    /// For each input, `head` and every element of `tail` start
    /// concurrently. The race yields a first completion plus the
    /// still-pending computations in declared order, which are resolved as
    /// follows:
    ///
    /// 1. First completion defined with `v` — resolve immediately to
    ///    `(v, pending re-wrapped as replay services)`.
    /// 2. First completion undefined, nothing pending — the combined
    ///    service is undefined.
    /// 3. First completion undefined, candidates pending — await the next
    ///    pending computation *in declared order* and repeat.
    ///
    /// A fault from the first completion, or from any candidate awaited
    /// during the ordered walk, propagates fail-fast as a fault of the
    /// combined service.
    ///
    /// The replay services in the result are one-shot: each resumes its
    /// in-flight computation the first time it is applied and faults with
    /// [`ReplayExhausted`] afterwards (see [`AsyncOptional::replay`]).
    /// Dropping them cancels the underlying computations; the combinator
    /// itself issues no implicit cancellation.
    #[must_use]
    pub fn choose_any(head: Self, tail: Vec<Self>) -> AsyncOptional<A, (B, Vec<Self>)>
    where
        A: Clone,
    {
        let candidates: Vec<Self> = std::iter::once(head).chain(tail).collect();
        AsyncOptional::lift(move |input: A| {
            let started: Vec<Task<Option<B>>> = candidates
                .iter()
                .map(|candidate| candidate.apply(input.clone()))
                .collect();
            Task::race_all(started).flat_map(|(first, pending)| resolve_in_order(first, pending))
        })
    }

    /// Wraps an in-flight computation as a one-shot service.
    ///
    /// The service ignores its input and resumes the stored computation on
    /// first application. Applying it again faults with
    /// [`ReplayExhausted`]: the computation was consumed, and silently
    /// restarting it could duplicate its effects.
    #[must_use]
    pub fn replay(task: Task<Option<B>>) -> Self {
        let slot = Arc::new(Mutex::new(Some(task)));
        Self::lift(move |_input| match slot.lock().take() {
            Some(task) => task,
            None => Task::fail(Fault::new(ReplayExhausted)),
        })
    }
}

/// The ordered-fallback resolver ("sorter").
///
/// Takes the race's first completion and the declared-order pending list,
/// and walks the pending computations sequentially while the first
/// completion (and every subsequent one) is undefined.
fn resolve_in_order<A, B>(
    first: Option<B>,
    pending: Vec<Task<Option<B>>>,
) -> Task<Option<(B, Vec<AsyncOptional<A, B>>)>>
where
    A: Send + 'static,
    B: Send + 'static,
{
    Task::try_new(move || async move {
        let mut outcome = first;
        let mut pending: VecDeque<Task<Option<B>>> = pending.into();
        loop {
            match outcome {
                Some(value) => {
                    let replays: Vec<AsyncOptional<A, B>> =
                        pending.into_iter().map(AsyncOptional::replay).collect();
                    return Ok(Some((value, replays)));
                }
                None => match pending.pop_front() {
                    Some(next) => {
                        trace!(
                            remaining = pending.len(),
                            "completion undefined; awaiting next candidate in declared order"
                        );
                        outcome = next.await?;
                    }
                    None => return Ok(None),
                },
            }
        }
    })
}
