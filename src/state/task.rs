//! Frontier task definition and its wire format

use serde::{Deserialize, Serialize};

/// One unit of crawl work: an address and the depth budget left for it
///
/// Tasks travel through the frontier as JSON objects of the form
/// `{"url": "...", "depth": n}` so that any process attached to the same
/// queue can produce or consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "url")]
    pub address: String,

    /// Hops remaining; a task at zero or below is dropped without fetching
    pub depth: i64,
}

impl Task {
    pub fn new(address: impl Into<String>, depth: i64) -> Self {
        Self {
            address: address.into(),
            depth,
        }
    }

    /// Builds the task for a link discovered on this task's page
    pub fn child(&self, address: impl Into<String>) -> Self {
        Self::new(address, self.depth - 1)
    }

    /// Returns true if the depth budget is spent
    pub fn is_exhausted(&self) -> bool {
        self.depth <= 0
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
