//! Workload estimator
//!
//! Dispatch is by node kind:
//! - CU: raw instruction count
//! - function: sum over direct children
//! - loop: every CU in the loop's subtree, weighted by its `BlockRole` and
//!   the loop's effective iterations
//! - dummy: 0

use crate::config::DetectionConfig;
use crate::errors::Result;
use crate::features::cu_graph::{CuGraph, SubtreeIndex};
use crate::features::loop_iterations::IterationEstimator;
use crate::features::workload::domain::BlockRole;
use crate::shared::models::{NodeKind, NodePayload};
use petgraph::graph::NodeIndex;

#[derive(Debug, Clone)]
pub struct WorkloadEstimator {
    increment_marker: String,
    condition_marker: String,
}

impl Default for WorkloadEstimator {
    fn default() -> Self {
        Self::from_config(&DetectionConfig::default())
    }
}

impl WorkloadEstimator {
    pub fn new(increment_marker: impl Into<String>, condition_marker: impl Into<String>) -> Self {
        Self {
            increment_marker: increment_marker.into(),
            condition_marker: condition_marker.into(),
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            config.increment_block_marker.clone(),
            config.condition_block_marker.clone(),
        )
    }

    /// Dynamic workload of `node`
    ///
    /// Fails only if `node` is not part of `graph`.
    pub fn workload(
        &self,
        graph: &CuGraph,
        index: &SubtreeIndex,
        iterations: &mut IterationEstimator,
        node: NodeIndex,
    ) -> Result<u64> {
        let cu_node = graph.require(node)?;

        match &cu_node.payload {
            NodePayload::ComputationalUnit {
                instructions_count, ..
            } => Ok(*instructions_count),
            NodePayload::Function { .. } => {
                let mut total = 0u64;
                for child in graph.children(node) {
                    total = total.saturating_add(self.workload(graph, index, iterations, child)?);
                }
                Ok(total)
            }
            NodePayload::Loop { .. } => {
                let loop_iterations = iterations.effective_iterations(graph, node);
                Ok(index
                    .subtree_of_kind(graph, node, Some(NodeKind::ComputationalUnit))
                    .filter_map(|unit| graph.node(unit))
                    .map(|unit| {
                        let role = BlockRole::classify(
                            unit.basic_block_id().unwrap_or_default(),
                            &self.increment_marker,
                            &self.condition_marker,
                        );
                        unit.instructions_count()
                            .saturating_mul(role.multiplier(loop_iterations))
                    })
                    .fold(0u64, u64::saturating_add))
            }
            NodePayload::Dummy => Ok(0),
        }
    }

    /// Static instruction count of every CU under `root`
    pub fn total_instructions(&self, graph: &CuGraph, index: &SubtreeIndex, root: NodeIndex) -> u64 {
        index
            .subtree_of_kind(graph, root, Some(NodeKind::ComputationalUnit))
            .filter_map(|unit| graph.node(unit))
            .map(|unit| unit.instructions_count())
            .fold(0u64, u64::saturating_add)
    }
}
