//! Validated CU graph construction
//!
//! The builder is the only way to obtain a `CuGraph`. It rejects anything
//! that would break the analysis invariants:
//! - node ids are unique
//! - each node has at most one containment parent
//! - containment edges never close a cycle
//! - dependence edges only connect computational units

use crate::errors::{PatternError, Result};
use crate::features::cu_graph::domain::CuGraph;
use crate::shared::models::{CuEdge, CuNode, Dependence, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CuGraphBuilder {
    graph: DiGraph<CuNode, CuEdge>,
    id_to_node: HashMap<String, NodeIndex>,
    parents: HashMap<NodeIndex, NodeIndex>,
}

impl CuGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: CuNode) -> Result<NodeIndex> {
        if self.id_to_node.contains_key(&node.id) {
            return Err(PatternError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_node.insert(id, idx);
        Ok(idx)
    }

    /// Attach `child` under `parent` in the containment tree
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<()> {
        let parent_id = self.id_of(parent)?.to_string();
        let child_id = self.id_of(child)?.to_string();

        if let Some(&existing) = self.parents.get(&child) {
            return Err(PatternError::MultipleParents {
                child: child_id,
                existing: self.graph[existing].id.clone(),
                parent: parent_id,
            });
        }

        // Walk up from the new parent; reaching the child means a cycle.
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return Err(PatternError::ContainmentCycle {
                    parent: parent_id,
                    child: child_id,
                });
            }
            current = self.parents.get(&node).copied();
        }

        self.graph.add_edge(parent, child, CuEdge::Child);
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Add a data dependence between two computational units
    pub fn add_dependence(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        dependence: Dependence,
    ) -> Result<()> {
        let source_id = self.id_of(source)?;
        let target_id = self.id_of(target)?;

        for endpoint in [source, target] {
            let node = &self.graph[endpoint];
            if !node.is_kind(NodeKind::ComputationalUnit) {
                return Err(PatternError::invalid_edge(
                    source_id,
                    target_id,
                    format!(
                        "dependence endpoint '{}' is a {} node, expected cu",
                        node.id,
                        node.kind()
                    ),
                ));
            }
        }

        self.graph
            .add_edge(source, target, CuEdge::Dependence(dependence));
        Ok(())
    }

    /// Resolve a node id added earlier
    pub fn resolve(&self, id: &str) -> Result<NodeIndex> {
        self.id_to_node
            .get(id)
            .copied()
            .ok_or_else(|| PatternError::UnknownNode(id.to_string()))
    }

    pub fn add_child_by_id(&mut self, parent: &str, child: &str) -> Result<()> {
        let parent = self.resolve(parent)?;
        let child = self.resolve(child)?;
        self.add_child(parent, child)
    }

    pub fn add_dependence_by_id(
        &mut self,
        source: &str,
        target: &str,
        dependence: Dependence,
    ) -> Result<()> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        self.add_dependence(source, target, dependence)
    }

    pub fn build(self) -> CuGraph {
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "cu graph built"
        );
        CuGraph::from_parts(self.graph, self.id_to_node)
    }

    fn node(&self, idx: NodeIndex) -> Result<&CuNode> {
        self.graph
            .node_weight(idx)
            .ok_or_else(|| PatternError::NodeNotFound(format!("index {}", idx.index())))
    }

    fn id_of(&self, idx: NodeIndex) -> Result<&str> {
        self.node(idx).map(|node| node.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::SourceLine;

    fn line(n: u32) -> SourceLine {
        SourceLine::new(1, n)
    }

    #[test]
    fn test_builds_containment_tree() {
        let mut builder = CuGraphBuilder::new();
        let f = builder.add_node(CuNode::function("f", line(1), "main")).unwrap();
        let l = builder.add_node(CuNode::loop_node("l", line(2), true, false)).unwrap();
        let cu = builder.add_node(CuNode::unit("cu", line(3), 4, "for.body")).unwrap();
        builder.add_child(f, l).unwrap();
        builder.add_child(l, cu).unwrap();

        let graph = builder.build();
        assert_eq!(graph.children(f), vec![l]);
        assert_eq!(graph.parent(cu), Some(l));
        assert_eq!(graph.roots(), vec![f]);
        assert_eq!(graph.enclosing_loop(cu), Some(l));
        assert_eq!(graph.find_main_node("main"), Some(f));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut builder = CuGraphBuilder::new();
        builder.add_node(CuNode::dummy("d", line(1))).unwrap();
        let err = builder.add_node(CuNode::dummy("d", line(2))).unwrap_err();
        assert!(matches!(err, PatternError::DuplicateNode(_)));
    }

    #[test]
    fn test_second_parent_rejected() {
        let mut builder = CuGraphBuilder::new();
        let a = builder.add_node(CuNode::function("a", line(1), "a")).unwrap();
        let b = builder.add_node(CuNode::function("b", line(2), "b")).unwrap();
        let cu = builder.add_node(CuNode::unit("cu", line(3), 1, "entry")).unwrap();
        builder.add_child(a, cu).unwrap();
        let err = builder.add_child(b, cu).unwrap_err();
        assert!(matches!(err, PatternError::MultipleParents { .. }));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut builder = CuGraphBuilder::new();
        let a = builder.add_node(CuNode::function("a", line(1), "a")).unwrap();
        let b = builder.add_node(CuNode::loop_node("b", line(2), true, false)).unwrap();
        builder.add_child(a, b).unwrap();
        let err = builder.add_child(b, a).unwrap_err();
        assert!(matches!(err, PatternError::ContainmentCycle { .. }));

        let err = builder.add_child(a, a).unwrap_err();
        assert!(matches!(
            err,
            PatternError::MultipleParents { .. } | PatternError::ContainmentCycle { .. }
        ));
    }

    #[test]
    fn test_dependence_between_non_units_rejected() {
        let mut builder = CuGraphBuilder::new();
        let l = builder.add_node(CuNode::loop_node("l", line(1), true, false)).unwrap();
        let cu = builder.add_node(CuNode::unit("cu", line(2), 1, "entry")).unwrap();
        let err = builder
            .add_dependence(cu, l, Dependence::raw("x", line(2), line(1)))
            .unwrap_err();
        assert!(matches!(err, PatternError::InvalidEdge { .. }));
    }

    #[test]
    fn test_unknown_id() {
        let mut builder = CuGraphBuilder::new();
        let err = builder.add_child_by_id("nope", "also-nope").unwrap_err();
        assert!(matches!(err, PatternError::UnknownNode(_)));
    }
}
