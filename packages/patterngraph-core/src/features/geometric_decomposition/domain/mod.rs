//! Domain models for geometric decomposition detection

use crate::errors::Result;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Parallelization verdicts for one loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoopVerdict {
    pub is_do_all: bool,
    pub is_reduction: bool,
}

impl LoopVerdict {
    pub fn new(is_do_all: bool, is_reduction: bool) -> Self {
        Self {
            is_do_all,
            is_reduction,
        }
    }

    /// Verdict from a do-all suitability score
    ///
    /// A loop is do-all when its score reaches `threshold`.
    pub fn from_suitability(score: f64, threshold: f64, is_reduction: bool) -> Self {
        Self::new(score >= threshold, is_reduction)
    }

    /// Do-all or reduction: iterations can be split across workers
    pub fn is_parallelizable(&self) -> bool {
        self.is_do_all || self.is_reduction
    }
}

/// Detection outcome for one function node
#[derive(Debug, Clone, Serialize)]
pub struct FunctionOutcome {
    #[serde(skip)]
    pub node: NodeIndex,

    /// Node id from the graph builder
    pub id: String,

    pub name: String,

    /// Every loop in scope is do-all or reduction
    pub matched: bool,

    /// Matched and every direct loop runs at least once per invocation
    pub reported: bool,

    /// Smallest effective iteration count among the direct loops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_iterations: Option<u64>,

    /// First loop that is neither do-all nor reduction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_loop: Option<String>,
}

/// Result of one detection run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    pub functions: Vec<FunctionOutcome>,

    /// Node id of the configured entry function, if the graph has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_function: Option<String>,
}

impl DetectionReport {
    pub fn matched(&self) -> impl Iterator<Item = &FunctionOutcome> {
        self.functions.iter().filter(|f| f.matched)
    }

    pub fn reported(&self) -> impl Iterator<Item = &FunctionOutcome> {
        self.functions.iter().filter(|f| f.reported)
    }

    pub fn outcome(&self, id: &str) -> Option<&FunctionOutcome> {
        self.functions.iter().find(|f| f.id == id)
    }

    pub fn is_reported(&self, id: &str) -> bool {
        self.outcome(id).map_or(false, |f| f.reported)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
