//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Task`: One frontier entry (address + remaining depth)
//! - `TaskOutcome`: How a popped task settled
//! - `PendingCounter`: Outstanding-work counter that signals completion

mod outcome;
mod pending;
mod task;

// Re-export main types
pub use outcome::TaskOutcome;
pub use pending::PendingCounter;
pub use task::Task;
