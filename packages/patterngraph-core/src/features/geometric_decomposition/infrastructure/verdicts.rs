//! Loop verdict sources

use crate::config::DetectionConfig;
use crate::features::cu_graph::CuGraph;
use crate::features::geometric_decomposition::domain::LoopVerdict;
use crate::features::geometric_decomposition::ports::LoopVerdictSource;
use crate::shared::models::NodePayload;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Reads the verdicts stored on loop nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeVerdicts;

impl LoopVerdictSource for NodeVerdicts {
    fn verdict(&self, graph: &CuGraph, loop_node: NodeIndex) -> LoopVerdict {
        match graph.node(loop_node).map(|n| &n.payload) {
            Some(NodePayload::Loop {
                is_do_all,
                is_reduction,
            }) => LoopVerdict::new(*is_do_all, *is_reduction),
            _ => LoopVerdict::default(),
        }
    }
}

/// Do-all suitability scores keyed by loop node id
///
/// Loops without a score fall back to the node's stored verdict. The
/// reduction verdict always comes from the node.
#[derive(Debug, Clone)]
pub struct SuitabilityScores {
    threshold: f64,
    scores: HashMap<String, f64>,
}

impl SuitabilityScores {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scores: HashMap::new(),
        }
    }

    /// Scores thresholded at the configured `do_all_threshold`
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.do_all_threshold)
    }

    pub fn with_score(mut self, loop_id: impl Into<String>, score: f64) -> Self {
        self.scores.insert(loop_id.into(), score);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl LoopVerdictSource for SuitabilityScores {
    fn verdict(&self, graph: &CuGraph, loop_node: NodeIndex) -> LoopVerdict {
        let stored = NodeVerdicts.verdict(graph, loop_node);
        let score = graph
            .node(loop_node)
            .and_then(|n| self.scores.get(&n.id).copied());

        match score {
            Some(score) => LoopVerdict::from_suitability(score, self.threshold, stored.is_reduction),
            None => stored,
        }
    }
}
