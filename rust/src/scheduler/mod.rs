//! Budget allocation over a prioritized activity order.
//!
//! The queue stage admits activities that can take part; the allocator fills
//! the budget greedily from it.

mod allocator;
mod core;
mod queue;

pub use self::core::{schedule, Scheduler, SchedulerError};
pub use allocator::{allocate, Allocation};
pub use queue::ActivityQueue;
