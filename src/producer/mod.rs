//! Deferred, single-shot computations.
//!
//! A [`Producer`] holds a start function and nothing else. Starting it hands
//! a completion callback to that function, which arranges for the work to run
//! somewhere (normally a [`WorkerPool`]) and invokes the callback exactly
//! once with the outcome. Operators like [`Producer::map`] and
//! [`join`](crate::join::join) wrap the start function; nothing runs until
//! the outermost producer is started.

mod continuation;

pub use continuation::attach_success_continuation;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{Failure, guarded};
use crate::pool::WorkerPool;

/// What a producer yields: one value, or why there is none.
pub type Outcome<T> = Result<T, Failure>;

/// Receives a producer's outcome. Called at most once, on whichever thread
/// finished the work.
pub type Completion<T> = Box<dyn FnOnce(Outcome<T>) + Send + 'static>;

type Source<T> = Box<dyn FnOnce(Completion<T>) + Send + 'static>;

/// A deferred computation yielding one `T` or one [`Failure`].
#[must_use = "producers do nothing until started"]
pub struct Producer<T> {
    source: Source<T>,
}

impl<T: Send + 'static> Producer<T> {
    /// Build a producer from a start function. The function receives the
    /// completion and must invoke it at most once; dropping it unused
    /// resolves the producer to [`Failure::Abandoned`].
    pub fn from_source<S>(source: S) -> Self
    where
        S: FnOnce(Completion<T>) + Send + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }

    /// Run `f` on `pool` once started. An `Err` becomes
    /// [`Failure::Producer`], a panic becomes [`Failure::Panicked`].
    pub fn from_fn<F>(pool: &WorkerPool, f: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        let pool = pool.clone();
        Self::from_source(move |done| {
            pool.execute(
                move || guarded(f).and_then(|r| r.map_err(Failure::Producer)),
                done,
            );
        })
    }

    /// Start the producer and deliver its outcome to `on_complete`.
    pub fn subscribe<F>(self, on_complete: F)
    where
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        (self.source)(Box::new(on_complete));
    }

    /// Start the producer and get a future for its outcome.
    pub fn start(self) -> Pending<T> {
        let (tx, rx) = oneshot::channel();
        self.subscribe(move |outcome| {
            // The receiver may be gone if the caller stopped waiting.
            let _ = tx.send(outcome);
        });
        Pending { rx }
    }

    /// Transform the value on the thread that produced it.
    pub fn map<V, F>(self, f: F) -> Producer<V>
    where
        V: Send + 'static,
        F: FnOnce(T) -> V + Send + 'static,
    {
        Producer::from_source(move |done| {
            self.subscribe(move |outcome| done(outcome.and_then(|value| guarded(|| f(value)))));
        })
    }
}

/// The outcome of a started producer.
#[must_use = "futures do nothing unless polled"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> Future for Pending<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(Failure::Abandoned)))
    }
}
