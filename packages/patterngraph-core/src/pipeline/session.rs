//! Analysis session
//!
//! Owns everything one analysis run caches: the subtree index, the raw
//! iteration profile and the effective-iteration memo. A new run gets a
//! new session, so nothing leaks between runs over different graphs.

use crate::config::DetectionConfig;
use crate::errors::Result;
use crate::features::cu_graph::{CuGraph, SubtreeIndex};
use crate::features::dependency_analysis::DependencyClassifier;
use crate::features::loop_iterations::{IterationEstimator, LoopIterationProfile};
use crate::features::workload::WorkloadEstimator;
use petgraph::graph::NodeIndex;

pub struct AnalysisSession<'g> {
    graph: &'g CuGraph,
    index: SubtreeIndex,
    iterations: IterationEstimator,
    workload: WorkloadEstimator,
}

impl<'g> AnalysisSession<'g> {
    /// Session with default block markers
    pub fn new(graph: &'g CuGraph, profile: LoopIterationProfile) -> Self {
        Self::with_config(graph, profile, &DetectionConfig::default())
    }

    pub fn with_config(
        graph: &'g CuGraph,
        profile: LoopIterationProfile,
        config: &DetectionConfig,
    ) -> Self {
        tracing::debug!(
            nodes = graph.node_count(),
            profiled_loops = profile.len(),
            "analysis session created"
        );

        Self {
            graph,
            index: SubtreeIndex::build(graph),
            iterations: IterationEstimator::new(profile),
            workload: WorkloadEstimator::from_config(config),
        }
    }

    pub fn graph(&self) -> &'g CuGraph {
        self.graph
    }

    pub fn index(&self) -> &SubtreeIndex {
        &self.index
    }

    pub fn profile(&self) -> &LoopIterationProfile {
        self.iterations.profile()
    }

    /// Swap in a new profile; memoized iteration counts are discarded
    pub fn reset_profile(&mut self, profile: LoopIterationProfile) {
        self.iterations.reset(profile);
    }

    pub fn classifier(&self) -> DependencyClassifier<'_> {
        DependencyClassifier::new(self.graph, &self.index)
    }

    /// Iterations of one invocation of `node` (0 when unmeasured)
    pub fn effective_iterations(&mut self, node: NodeIndex) -> u64 {
        self.iterations.effective_iterations(self.graph, node)
    }

    /// Loop-weighted instruction count of `node`
    pub fn workload(&mut self, node: NodeIndex) -> Result<u64> {
        self.workload
            .workload(self.graph, &self.index, &mut self.iterations, node)
    }

    /// Static instruction count of the CUs under `root`
    pub fn total_instructions(&self, root: NodeIndex) -> u64 {
        self.workload.total_instructions(self.graph, &self.index, root)
    }
}
