pub mod banner;
pub mod consts;
pub mod demo;
pub mod display;
pub mod error;
pub mod fraction;
pub mod join;
pub mod pool;
pub mod producer;

pub use error::{Failure, Leg};
pub use join::{join, try_join};
pub use pool::WorkerPool;
pub use producer::{Outcome, Pending, Producer, attach_success_continuation};
