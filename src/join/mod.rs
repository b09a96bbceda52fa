//! Two-source join: run two producers in parallel, combine once both succeed.
//!
//! Starting a joined producer dispatches both legs before anything waits on
//! either, so the legs run concurrently. The combiner runs exactly once, on
//! whichever thread delivers the second success. If either leg fails the
//! join fails fast with that leg's failure and the combiner never runs; when
//! both fail, the first failure to reach the rendezvous wins.
//!
//! There is no cancellation: a leg that is still running when the other
//! fails runs to completion and its value is dropped.

mod gate;

use std::sync::Arc;

use crate::producer::Producer;
use gate::Gate;

/// Join two producers with an infallible combiner.
pub fn join<T, U, R, F>(left: Producer<T>, right: Producer<U>, combine: F) -> Producer<R>
where
    T: Send + 'static,
    U: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, U) -> R + Send + 'static,
{
    try_join(left, right, move |a, b| Ok(combine(a, b)))
}

/// Join two producers with a combiner that may fail. A combiner error fails
/// the join with [`Failure::Combine`](crate::Failure::Combine).
pub fn try_join<T, U, R, F>(left: Producer<T>, right: Producer<U>, combine: F) -> Producer<R>
where
    T: Send + 'static,
    U: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, U) -> anyhow::Result<R> + Send + 'static,
{
    Producer::from_source(move |done| {
        let gate = Arc::new(Gate::new(combine, done));
        let left_gate = Arc::clone(&gate);
        left.subscribe(move |outcome| left_gate.arrive_left(outcome));
        right.subscribe(move |outcome| gate.arrive_right(outcome));
    })
}

impl<T: Send + 'static> Producer<T> {
    /// Method form of [`join`].
    pub fn zip_with<U, R, F>(self, other: Producer<U>, combine: F) -> Producer<R>
    where
        U: Send + 'static,
        R: Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        join(self, other, combine)
    }
}
