//! Workload domain models

use serde::{Deserialize, Serialize};

/// Role of a computational unit inside its loop, derived from the
/// basic-block id the compiler gave it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    /// Increment step, runs once per iteration but counted once
    Increment,
    /// Condition check, runs one extra time to exit the loop
    Condition,
    Body,
}

impl BlockRole {
    /// Classify a basic-block id by marker substrings
    pub fn classify(basic_block_id: &str, increment_marker: &str, condition_marker: &str) -> Self {
        if basic_block_id.contains(increment_marker) {
            Self::Increment
        } else if basic_block_id.contains(condition_marker) {
            Self::Condition
        } else {
            Self::Body
        }
    }

    /// How many times a unit's instructions are counted for `iterations`
    pub fn multiplier(&self, iterations: u64) -> u64 {
        match self {
            Self::Increment => 1,
            Self::Condition => iterations.saturating_add(1),
            Self::Body => iterations,
        }
    }
}
