//! The rendezvous two legs of a join report into.
//!
//! Each leg arrives exactly once, from whatever thread finished it, so the
//! gate only has to decide who settles. Arrivals `fetch_or` their bit into a
//! single atomic byte and read back what was there before:
//!
//! - a success that finds the other leg's bit (and no failure) is second,
//!   and runs the combiner;
//! - a failure that finds no earlier failure settles with that failure;
//! - anything arriving after a failure is dropped.
//!
//! A leg sets either its success bit or `FAILED`, never both, so exactly one
//! arrival settles.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Failure, Leg, guarded};
use crate::producer::{Completion, Outcome};

const LEFT: u8 = 0b001;
const RIGHT: u8 = 0b010;
const FAILED: u8 = 0b100;

enum Arrival {
    /// The other leg is still running.
    First,
    /// Both legs succeeded; the caller combines.
    Second,
    /// A failure already settled the join.
    Late,
}

pub(crate) struct Gate<T, U, R, F> {
    arrived: AtomicU8,
    left: Mutex<Option<T>>,
    right: Mutex<Option<U>>,
    settle: Mutex<Option<(F, Completion<R>)>>,
}

impl<T, U, R, F> Gate<T, U, R, F>
where
    F: FnOnce(T, U) -> anyhow::Result<R>,
{
    pub(crate) fn new(combine: F, done: Completion<R>) -> Self {
        Self {
            arrived: AtomicU8::new(0),
            left: Mutex::new(None),
            right: Mutex::new(None),
            settle: Mutex::new(Some((combine, done))),
        }
    }

    pub(crate) fn arrive_left(&self, outcome: Outcome<T>) {
        match outcome {
            Ok(value) => {
                *lock(&self.left) = Some(value);
                match self.arrive(LEFT) {
                    Arrival::First => tracing::debug!("left leg arrived first"),
                    Arrival::Second => self.combine(),
                    Arrival::Late => {
                        tracing::debug!("left leg arrived after failure, discarding");
                        lock(&self.left).take();
                    }
                }
            }
            Err(failure) => self.fail(Leg::Left, failure),
        }
    }

    pub(crate) fn arrive_right(&self, outcome: Outcome<U>) {
        match outcome {
            Ok(value) => {
                *lock(&self.right) = Some(value);
                match self.arrive(RIGHT) {
                    Arrival::First => tracing::debug!("right leg arrived first"),
                    Arrival::Second => self.combine(),
                    Arrival::Late => {
                        tracing::debug!("right leg arrived after failure, discarding");
                        lock(&self.right).take();
                    }
                }
            }
            Err(failure) => self.fail(Leg::Right, failure),
        }
    }

    fn arrive(&self, bit: u8) -> Arrival {
        // AcqRel: publishes our slot write and observes the other leg's.
        let before = self.arrived.fetch_or(bit, Ordering::AcqRel);
        let other = (LEFT | RIGHT) & !bit;
        if before & FAILED != 0 {
            Arrival::Late
        } else if before & other != 0 {
            Arrival::Second
        } else {
            Arrival::First
        }
    }

    fn fail(&self, leg: Leg, failure: Failure) {
        let before = self.arrived.fetch_or(FAILED, Ordering::AcqRel);
        if before & FAILED != 0 {
            tracing::debug!(%leg, %failure, "second failure discarded");
            return;
        }
        tracing::debug!(%leg, %failure, "leg failed, join fails fast");
        // Take the completion out first so `settle` is unlocked while it runs.
        let settled = lock(&self.settle).take();
        if let Some((_, done)) = settled {
            done(Err(Failure::Leg {
                leg,
                source: Box::new(failure),
            }));
        }
    }

    fn combine(&self) {
        let Some((combine, done)) = lock(&self.settle).take() else {
            return;
        };
        let values = lock(&self.left).take().zip(lock(&self.right).take());
        let outcome = match values {
            Some((left, right)) => match guarded(|| combine(left, right)) {
                Ok(Ok(combined)) => Ok(combined),
                Ok(Err(e)) => Err(Failure::Combine(e)),
                Err(panicked) => Err(Failure::Combine(anyhow::anyhow!("combiner {panicked}"))),
            },
            None => Err(Failure::Abandoned),
        };
        tracing::debug!(ok = outcome.is_ok(), "both legs arrived, combined");
        done(outcome);
    }
}

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
