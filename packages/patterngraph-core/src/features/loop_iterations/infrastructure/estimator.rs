//! Effective iteration estimator
//!
//! effective(L) with raw = profile[header(L)] and
//! parent = max(1, profile[header(nearest ancestor loop)]) (1 without one):
//!
//! ```text
//! raw < parent              → raw        (already one parent invocation)
//! raw == 0 || parent == 0   → 0
//! otherwise                 → raw / parent
//! ```
//!
//! Results are memoized per node. The memo belongs to one estimator, and
//! an estimator to one analysis session, so runs never see stale values.

use crate::features::cu_graph::CuGraph;
use crate::features::loop_iterations::domain::LoopIterationProfile;
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct IterationEstimator {
    profile: LoopIterationProfile,
    memo: FxHashMap<NodeIndex, u64>,
}

impl IterationEstimator {
    pub fn new(profile: LoopIterationProfile) -> Self {
        Self {
            profile,
            memo: FxHashMap::default(),
        }
    }

    pub fn profile(&self) -> &LoopIterationProfile {
        &self.profile
    }

    /// Replace the profile and drop every memoized value
    pub fn reset(&mut self, profile: LoopIterationProfile) {
        self.profile = profile;
        self.memo.clear();
    }

    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    /// Iterations of one invocation of `node`
    ///
    /// Never fails: unknown nodes and unmeasured loops yield 0.
    pub fn effective_iterations(&mut self, graph: &CuGraph, node: NodeIndex) -> u64 {
        if let Some(&cached) = self.memo.get(&node) {
            tracing::trace!(node = node.index(), cached, "iteration memo hit");
            return cached;
        }

        let raw = self.raw_iterations(graph, node);
        let parent = self.parent_iterations(graph, node);

        let effective = if raw < parent {
            raw
        } else if raw == 0 || parent == 0 {
            0
        } else {
            raw / parent
        };

        self.memo.insert(node, effective);
        effective
    }

    /// Raw profiled count for the node's start line
    pub fn raw_iterations(&self, graph: &CuGraph, node: NodeIndex) -> u64 {
        graph
            .node(node)
            .map_or(0, |n| self.profile.get(n.start_line))
    }

    /// Raw count of the nearest enclosing loop, at least 1
    pub fn parent_iterations(&self, graph: &CuGraph, node: NodeIndex) -> u64 {
        graph
            .enclosing_loop(node)
            .map_or(1, |ancestor| self.raw_iterations(graph, ancestor).max(1))
    }
}
