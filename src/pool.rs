//! The worker pool producers run on.
//!
//! Jobs go to tokio's blocking thread pool, so producer work never runs on
//! the thread that started it and never stalls the async workers. The pool
//! keeps a few counters so callers (and tests) can see how much work was in
//! flight at once.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use tokio::runtime::Handle;

/// A handle to the parallel execution context. Cheap to clone; clones share
/// counters.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    handle: Handle,
    stats: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicUsize,
    completed: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

/// A point-in-time copy of the pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Jobs handed to the pool.
    pub dispatched: usize,
    /// Jobs whose work has returned. A job is counted before its result is
    /// delivered, so anyone holding the result also sees the count.
    pub completed: usize,
    /// Jobs running right now.
    pub active: usize,
    /// Most jobs ever running at the same time.
    pub peak: usize,
}

impl WorkerPool {
    /// Use the blocking pool of the runtime we are currently inside.
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current().context("worker pool needs a running tokio runtime")?;
        Ok(Self::with_handle(handle))
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            stats: Arc::new(Counters::default()),
        }
    }

    /// Queue `work` on a pool thread, then hand its result to `deliver` on
    /// the same thread. Returns immediately.
    pub fn execute<W, R, D>(&self, work: W, deliver: D)
    where
        W: FnOnce() -> R + Send + 'static,
        R: 'static,
        D: FnOnce(R) + Send + 'static,
    {
        let stats = Arc::clone(&self.stats);
        let dispatched = stats.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(dispatched, "job dispatched");

        // The JoinHandle is dropped on purpose: `deliver` reports the result.
        drop(self.handle.spawn_blocking(move || {
            let running = Running::enter(&stats);
            let result = work();
            drop(running);
            deliver(result);
        }));
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            dispatched: self.stats.dispatched.load(Ordering::SeqCst),
            completed: self.stats.completed.load(Ordering::SeqCst),
            active: self.stats.active.load(Ordering::SeqCst),
            peak: self.stats.peak.load(Ordering::SeqCst),
        }
    }
}

/// Tracks one running job; counts it as completed on drop, even if the work
/// unwinds.
struct Running<'a> {
    stats: &'a Counters,
}

impl<'a> Running<'a> {
    fn enter(stats: &'a Counters) -> Self {
        let active = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak.fetch_max(active, Ordering::SeqCst);
        Self { stats }
    }
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.stats.active.fetch_sub(1, Ordering::SeqCst);
        self.stats.completed.fetch_add(1, Ordering::SeqCst);
    }
}
