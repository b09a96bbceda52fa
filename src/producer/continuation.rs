use crate::error::guarded;

use super::Producer;

impl<T: Send + 'static> Producer<T> {
    /// Call `f` with the value once it is ready, before passing the value on.
    /// Not called on failure. A panic in `f` fails the producer.
    pub fn on_success<F>(self, f: F) -> Producer<T>
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Producer::from_source(move |done| {
            self.subscribe(move |outcome| {
                done(outcome.and_then(|value| guarded(|| f(&value)).map(|()| value)));
            });
        })
    }

    /// Drop the value, keeping only the completion signal.
    pub fn then(self) -> Producer<()> {
        self.map(|_| ())
    }
}

/// Run `continuation` on the value once `producer` succeeds, then complete a
/// unit signal. The signal completes only after `continuation` returns.
pub fn attach_success_continuation<T, F>(producer: Producer<T>, continuation: F) -> Producer<()>
where
    T: Send + 'static,
    F: FnOnce(&T) + Send + 'static,
{
    producer.on_success(continuation).then()
}
