//! CU graph
//!
//! Directed graph with two edge families:
//! - `Child` edges form the containment forest (function ⊃ loop ⊃ CU)
//! - `Dependence` edges carry RAW/WAW/WAR data flow between CUs
//!
//! Structure is fixed once built (see `CuGraphBuilder`); the only mutation
//! analysis performs is the `geometric_decomposition` annotation.

use crate::config::DetectionConfig;
use crate::errors::{PatternError, Result};
use crate::shared::models::{CuEdge, CuNode, Dependence, DependenceKind, NodeKind};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Dependence edge together with its endpoints
#[derive(Debug, Clone, Copy)]
pub struct DependenceRef<'g> {
    pub edge: EdgeIndex,
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub dependence: &'g Dependence,
}

/// Computational-unit graph
#[derive(Debug, Clone, Default)]
pub struct CuGraph {
    graph: DiGraph<CuNode, CuEdge>,
    id_to_node: HashMap<String, NodeIndex>,
}

impl CuGraph {
    /// Assembled by `CuGraphBuilder`, which enforces the structural invariants
    pub(crate) fn from_parts(
        graph: DiGraph<CuNode, CuEdge>,
        id_to_node: HashMap<String, NodeIndex>,
    ) -> Self {
        Self { graph, id_to_node }
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&CuNode> {
        self.graph.node_weight(idx)
    }

    /// Like `node`, but a missing node is an error
    pub fn require(&self, idx: NodeIndex) -> Result<&CuNode> {
        self.node(idx)
            .ok_or_else(|| PatternError::NodeNotFound(format!("index {}", idx.index())))
    }

    pub fn kind(&self, idx: NodeIndex) -> Option<NodeKind> {
        self.node(idx).map(CuNode::kind)
    }

    pub fn is_kind(&self, idx: NodeIndex, kind: NodeKind) -> bool {
        self.kind(idx) == Some(kind)
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// All function nodes, in insertion order
    pub fn function_nodes(&self) -> Vec<NodeIndex> {
        self.nodes_of_kind(NodeKind::Function)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].is_kind(kind))
            .collect()
    }

    /// Function node with the given name (e.g. `main`)
    pub fn find_main_node(&self, name: &str) -> Option<NodeIndex> {
        self.graph.node_indices().find(|&idx| {
            let node = &self.graph[idx];
            node.is_kind(NodeKind::Function) && node.display_name() == name
        })
    }

    /// Entry function named by `config.main_function_name`
    pub fn main_node(&self, config: &DetectionConfig) -> Option<NodeIndex> {
        self.find_main_node(&config.main_function_name)
    }

    /// Direct containment children, in the order they were attached
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| e.weight().is_child())
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, child)| child).collect()
    }

    /// Direct containment children of one kind
    pub fn children_of_kind(&self, idx: NodeIndex, kind: NodeKind) -> Vec<NodeIndex> {
        self.children(idx)
            .into_iter()
            .filter(|&child| self.graph[child].is_kind(kind))
            .collect()
    }

    /// Containment parent (None for roots)
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .find(|e| e.weight().is_child())
            .map(|e| e.source())
    }

    /// Nodes without a containment parent
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.parent(idx).is_none())
            .collect()
    }

    /// Nearest loop among the containment ancestors of `idx`
    pub fn enclosing_loop(&self, idx: NodeIndex) -> Option<NodeIndex> {
        let mut current = self.parent(idx);
        while let Some(node) = current {
            if self.is_kind(node, NodeKind::Loop) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn outgoing_dependences(&self, idx: NodeIndex) -> impl Iterator<Item = DependenceRef<'_>> {
        self.dependences(idx, Direction::Outgoing)
    }

    pub fn incoming_dependences(&self, idx: NodeIndex) -> impl Iterator<Item = DependenceRef<'_>> {
        self.dependences(idx, Direction::Incoming)
    }

    /// Outgoing dependences of one kind
    pub fn outgoing_of_kind(
        &self,
        idx: NodeIndex,
        kind: DependenceKind,
    ) -> impl Iterator<Item = DependenceRef<'_>> {
        self.outgoing_dependences(idx)
            .filter(move |dep| dep.dependence.kind == kind)
    }

    fn dependences(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = DependenceRef<'_>> {
        self.graph
            .edges_directed(idx, direction)
            .filter_map(|e| {
                e.weight().dependence().map(|dependence| DependenceRef {
                    edge: e.id(),
                    source: e.source(),
                    target: e.target(),
                    dependence,
                })
            })
    }

    /// Dependence edge by index (None for containment edges)
    pub fn dependence(&self, edge: EdgeIndex) -> Option<DependenceRef<'_>> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        let dependence = self.graph.edge_weight(edge)?.dependence()?;
        Some(DependenceRef {
            edge,
            source,
            target,
            dependence,
        })
    }

    /// All dependence edges
    pub fn dependence_edges(&self) -> impl Iterator<Item = DependenceRef<'_>> {
        self.graph.edge_references().filter_map(|e| {
            e.weight().dependence().map(|dependence| DependenceRef {
                edge: e.id(),
                source: e.source(),
                target: e.target(),
                dependence,
            })
        })
    }

    /// Detector verdict recorded on a function node
    pub fn geometric_decomposition(&self, idx: NodeIndex) -> Option<bool> {
        self.node(idx).and_then(CuNode::geometric_decomposition)
    }

    pub(crate) fn set_geometric_decomposition(&mut self, idx: NodeIndex, value: bool) -> Result<()> {
        let node = self
            .graph
            .node_weight_mut(idx)
            .ok_or_else(|| PatternError::NodeNotFound(format!("index {}", idx.index())))?;
        node.set_geometric_decomposition(value);
        Ok(())
    }
}
