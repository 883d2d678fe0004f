//! RAW/WAW/WAR dependency classifier
//!
//! All subtree queries go through the session's `SubtreeIndex`, so each
//! operation is a scan over precomputed pre-order slices.

use crate::features::cu_graph::{CuGraph, DependenceRef, SubtreeIndex};
use crate::shared::models::{DependenceKind, NodeKind, SourceLine};
use petgraph::graph::{EdgeIndex, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;

/// Loop header lines and units under an enclosing loop
struct LoopScope {
    root: NodeIndex,
    header_lines: FxHashSet<SourceLine>,
    units: Vec<NodeIndex>,
}

#[derive(Debug, Clone, Copy)]
pub struct DependencyClassifier<'s> {
    graph: &'s CuGraph,
    index: &'s SubtreeIndex,
}

impl<'s> DependencyClassifier<'s> {
    pub fn new(graph: &'s CuGraph, index: &'s SubtreeIndex) -> Self {
        Self { graph, index }
    }

    /// Whether anything under `source` has a RAW dependence into `target`'s subtree
    ///
    /// A node never depends on itself: `source == target` is always false.
    pub fn has_dependency(&self, source: NodeIndex, target: NodeIndex) -> bool {
        if source == target {
            return false;
        }

        self.index.subtree(source).iter().any(|&node| {
            self.graph
                .outgoing_of_kind(node, DependenceKind::Raw)
                .any(|dep| self.index.contains(target, dep.target))
        })
    }

    /// `has_dependency` restricted to non-benign dependences of `source`
    pub fn has_dependency_ignoring_benign(
        &self,
        source: NodeIndex,
        target: NodeIndex,
        enclosing_loop: NodeIndex,
    ) -> bool {
        if source == target {
            return false;
        }

        self.all_non_benign_dependencies(source, enclosing_loop)
            .into_iter()
            .any(|dep_target| self.index.contains(target, dep_target))
    }

    /// Whether the dependence is a loop index update of a loop under `enclosing_loop`
    ///
    /// False for containment edges and unknown edges.
    pub fn is_loop_index(&self, edge: EdgeIndex, enclosing_loop: NodeIndex) -> bool {
        match self.graph.dependence(edge) {
            Some(dep) => self.is_loop_index_in(&self.scope(enclosing_loop), &dep),
            None => false,
        }
    }

    /// Whether the dependence's variable is never written in the body of `enclosing_loop`
    pub fn is_read_only_in_loop_body(&self, edge: EdgeIndex, enclosing_loop: NodeIndex) -> bool {
        match self.graph.dependence(edge) {
            Some(dep) => self.is_read_only_in(&self.scope(enclosing_loop), &dep.dependence.var),
            None => false,
        }
    }

    /// Targets of RAW dependences leaving `node`'s units, minus benign ones
    ///
    /// A dependence is dropped only when it is both a loop index and
    /// read-only in the body of `enclosing_loop`.
    pub fn all_non_benign_dependencies(
        &self,
        node: NodeIndex,
        enclosing_loop: NodeIndex,
    ) -> BTreeSet<NodeIndex> {
        let scope = self.scope(enclosing_loop);
        let mut read_only: FxHashMap<&str, bool> = FxHashMap::default();
        let mut targets = BTreeSet::new();

        for unit in self
            .index
            .subtree_of_kind(self.graph, node, Some(NodeKind::ComputationalUnit))
        {
            for dep in self.graph.outgoing_of_kind(unit, DependenceKind::Raw) {
                let benign = self.is_loop_index_in(&scope, &dep)
                    && *read_only
                        .entry(dep.dependence.var.as_str())
                        .or_insert_with(|| self.is_read_only_in(&scope, &dep.dependence.var));

                if !benign {
                    targets.insert(dep.target);
                }
            }
        }

        targets
    }

    fn scope(&self, enclosing_loop: NodeIndex) -> LoopScope {
        let header_lines = self
            .index
            .subtree_of_kind(self.graph, enclosing_loop, Some(NodeKind::Loop))
            .filter_map(|l| self.graph.node(l).map(|n| n.start_line))
            .collect();
        let units = self
            .index
            .subtree_of_kind(self.graph, enclosing_loop, Some(NodeKind::ComputationalUnit))
            .collect();

        LoopScope {
            root: enclosing_loop,
            header_lines,
            units,
        }
    }

    fn is_loop_index_in(&self, scope: &LoopScope, dep: &DependenceRef<'_>) -> bool {
        dep.dependence.is_self_referential()
            && scope.header_lines.contains(&dep.dependence.source_line)
            && self.index.contains(scope.root, dep.target)
            && self.graph.is_kind(dep.target, NodeKind::ComputationalUnit)
    }

    fn is_read_only_in(&self, scope: &LoopScope, var: &str) -> bool {
        for &unit in &scope.units {
            // WAW/WAR: the sink is the write
            let written_by_sink = self.graph.outgoing_dependences(unit).any(|dep| {
                dep.dependence.kind.is_write_sink()
                    && dep.dependence.var == var
                    && !scope.header_lines.contains(&dep.dependence.sink_line)
            });
            // Incoming RAW: the source is the write
            let written_by_source = self.graph.incoming_dependences(unit).any(|dep| {
                dep.dependence.kind == DependenceKind::Raw
                    && dep.dependence.var == var
                    && !scope.header_lines.contains(&dep.dependence.source_line)
            });

            if written_by_sink || written_by_source {
                return false;
            }
        }
        true
    }
}
