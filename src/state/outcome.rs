//! Task outcome definitions for tracking crawl progress
//!
//! Every task popped from the frontier settles in exactly one of these
//! outcomes, and each outcome releases exactly one unit of pending work.

use std::fmt;

/// How a single task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    // ===== Success =====
    /// Page was fetched and its links pushed to the frontier
    Visited {
        /// Children successfully pushed
        enqueued: usize,
        /// Children whose push gave up after retries
        dropped: usize,
    },

    // ===== Skips =====
    /// Depth budget was spent; dropped before the visited check
    DepthExhausted,

    /// Another worker already claimed this address
    AlreadyVisited,

    // ===== Errors =====
    /// Fetch or parse failed; the task is not retried
    ExtractFailed,

    /// Frontier payload could not be decoded into a task
    Malformed,
}

impl TaskOutcome {
    /// Returns true if the page was actually fetched and processed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Visited { .. })
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visited { enqueued, dropped } => {
                write!(f, "visited ({} enqueued, {} dropped)", enqueued, dropped)
            }
            Self::DepthExhausted => write!(f, "depth exhausted"),
            Self::AlreadyVisited => write!(f, "already visited"),
            Self::ExtractFailed => write!(f, "extract failed"),
            Self::Malformed => write!(f, "malformed payload"),
        }
    }
}
