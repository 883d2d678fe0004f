//! Subtree index
//!
//! One pre-order traversal of the containment forest per analysis run.
//! Every node's subtree is then a contiguous slice of the traversal order,
//! so "all nodes of kind K under N" is a slice scan and "is M under N" is
//! an interval check.
//!
//! Only `Child` edges are followed; dependence edges never extend a subtree.

use crate::features::cu_graph::domain::CuGraph;
use crate::shared::models::NodeKind;
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct SubtreeIndex {
    /// Pre-order of the whole forest
    order: Vec<NodeIndex>,
    /// Node -> [start, end) range of its subtree in `order`
    intervals: FxHashMap<NodeIndex, (usize, usize)>,
}

enum Visit {
    Enter(NodeIndex),
    Exit(NodeIndex),
}

impl SubtreeIndex {
    pub fn build(graph: &CuGraph) -> Self {
        let mut index = Self {
            order: Vec::with_capacity(graph.node_count()),
            intervals: FxHashMap::default(),
        };

        for root in graph.roots() {
            index.traverse(graph, root);
        }

        tracing::trace!(nodes = index.order.len(), "subtree index built");
        index
    }

    fn traverse(&mut self, graph: &CuGraph, root: NodeIndex) {
        let mut stack = vec![Visit::Enter(root)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(node) => {
                    if self.intervals.contains_key(&node) {
                        continue;
                    }
                    let start = self.order.len();
                    self.order.push(node);
                    self.intervals.insert(node, (start, start + 1));
                    stack.push(Visit::Exit(node));
                    // Reversed so the first child is visited first
                    for child in graph.children(node).into_iter().rev() {
                        stack.push(Visit::Enter(child));
                    }
                }
                Visit::Exit(node) => {
                    let end = self.order.len();
                    if let Some(interval) = self.intervals.get_mut(&node) {
                        interval.1 = end;
                    }
                }
            }
        }
    }

    /// `root` followed by all of its descendants, in pre-order
    ///
    /// Empty if `root` is not part of the indexed graph.
    pub fn subtree(&self, root: NodeIndex) -> &[NodeIndex] {
        match self.intervals.get(&root) {
            Some(&(start, end)) => &self.order[start..end],
            None => &[],
        }
    }

    /// Subtree nodes of one kind; `None` matches every kind
    pub fn subtree_of_kind<'a>(
        &'a self,
        graph: &'a CuGraph,
        root: NodeIndex,
        kind: Option<NodeKind>,
    ) -> impl Iterator<Item = NodeIndex> + 'a {
        self.subtree(root)
            .iter()
            .copied()
            .filter(move |&node| kind.map_or(true, |kind| graph.is_kind(node, kind)))
    }

    /// Whether `node` lies in the subtree rooted at `root` (inclusive)
    pub fn contains(&self, root: NodeIndex, node: NodeIndex) -> bool {
        match (self.intervals.get(&root), self.intervals.get(&node)) {
            (Some(&(start, end)), Some(&(position, _))) => start <= position && position < end,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
