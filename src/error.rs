//! Failure taxonomy for producers and joins.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Which side of a join a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Left,
    Right,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Left => f.write_str("left"),
            Leg::Right => f.write_str("right"),
        }
    }
}

/// Why a producer did not yield a value.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The producer's own computation returned an error.
    #[error("producer failed: {0}")]
    Producer(#[source] anyhow::Error),

    #[error("panicked: {0}")]
    Panicked(String),

    /// The completion was dropped without ever being invoked, e.g. the
    /// runtime shut down before the job ran.
    #[error("producer dropped before completing")]
    Abandoned,

    /// One leg of a join failed. Only the first observed failure is kept.
    #[error("{leg} leg failed: {source}")]
    Leg {
        leg: Leg,
        #[source]
        source: Box<Failure>,
    },

    /// Both legs succeeded but the combiner did not.
    #[error("combiner failed: {0}")]
    Combine(#[source] anyhow::Error),
}

impl Failure {
    /// The innermost failure, looking through join leg wrappers.
    pub fn root(&self) -> &Failure {
        match self {
            Failure::Leg { source, .. } => source.root(),
            other => other,
        }
    }

    /// The outermost leg this failure travelled through, if any.
    pub fn leg(&self) -> Option<Leg> {
        match self {
            Failure::Leg { leg, .. } => Some(*leg),
            _ => None,
        }
    }

    pub fn is_combine(&self) -> bool {
        matches!(self.root(), Failure::Combine(_))
    }
}

/// Run `f`, turning a panic into [`Failure::Panicked`].
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> Result<R, Failure> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| Failure::Panicked(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
