//! Common test utilities for patterngraph-core
//!
//! Graph fixtures are built by node id so tests read like the program
//! structure they model.

#![allow(dead_code)]

use patterngraph_core::{CuGraph, CuGraphBuilder, CuNode, Dependence, DependenceKind, SourceLine};
use petgraph::graph::NodeIndex;

pub fn line(n: u32) -> SourceLine {
    SourceLine::new(1, n)
}

/// Node index by id, panicking with the id on a typo
pub fn idx(graph: &CuGraph, id: &str) -> NodeIndex {
    graph
        .node_by_id(id)
        .unwrap_or_else(|| panic!("no node '{}' in fixture", id))
}

/// Builder for CU graph fixtures
#[derive(Debug, Default)]
pub struct GraphFixture {
    builder: CuGraphBuilder,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level function
    pub fn function(mut self, id: &str, start: u32) -> Self {
        self.builder
            .add_node(CuNode::function(id, line(start), id))
            .unwrap();
        self
    }

    pub fn function_in(mut self, parent: &str, id: &str, start: u32) -> Self {
        self.builder
            .add_node(CuNode::function(id, line(start), id))
            .unwrap();
        self.builder.add_child_by_id(parent, id).unwrap();
        self
    }

    pub fn loop_in(
        mut self,
        parent: &str,
        id: &str,
        header: u32,
        do_all: bool,
        reduction: bool,
    ) -> Self {
        self.builder
            .add_node(CuNode::loop_node(id, line(header), do_all, reduction))
            .unwrap();
        self.builder.add_child_by_id(parent, id).unwrap();
        self
    }

    pub fn unit_in(
        mut self,
        parent: &str,
        id: &str,
        start: u32,
        instructions: u64,
        basic_block: &str,
    ) -> Self {
        self.builder
            .add_node(CuNode::unit(id, line(start), instructions, basic_block))
            .unwrap();
        self.builder.add_child_by_id(parent, id).unwrap();
        self
    }

    pub fn dummy_in(mut self, parent: &str, id: &str, start: u32) -> Self {
        self.builder.add_node(CuNode::dummy(id, line(start))).unwrap();
        self.builder.add_child_by_id(parent, id).unwrap();
        self
    }

    /// Dependence edge `from -> to` on `var`
    pub fn dep(
        mut self,
        kind: DependenceKind,
        from: &str,
        to: &str,
        var: &str,
        source_line: u32,
        sink_line: u32,
    ) -> Self {
        self.builder
            .add_dependence_by_id(
                from,
                to,
                Dependence::new(kind, var, line(source_line), line(sink_line)),
            )
            .unwrap();
        self
    }

    pub fn raw(self, from: &str, to: &str, var: &str, source_line: u32, sink_line: u32) -> Self {
        self.dep(DependenceKind::Raw, from, to, var, source_line, sink_line)
    }

    pub fn build(self) -> CuGraph {
        self.builder.build()
    }
}

/// `sum += a[i]` over `for (i = 0; i < n; i++)` inside `main`
///
/// ```text
/// main(1:1)
/// ├── init(1:2)
/// ├── loop(1:3)
/// │   ├── cond(1:3)   for.cond
/// │   ├── body(1:4)   for.body   reads a[i], accumulates sum
/// │   └── inc(1:3)    for.inc    i++
/// └── print(1:6)                 reads sum
/// ```
pub fn reduction_loop() -> CuGraph {
    GraphFixture::new()
        .function("main", 1)
        .unit_in("main", "init", 2, 3, "entry")
        .loop_in("main", "loop", 3, false, true)
        .unit_in("loop", "cond", 3, 2, "for.cond")
        .unit_in("loop", "body", 4, 6, "for.body")
        .unit_in("loop", "inc", 3, 2, "for.inc")
        .unit_in("main", "print", 6, 4, "for.end")
        // i: initialized before the loop, updated on the header line
        .raw("cond", "init", "i", 2, 3)
        .raw("inc", "inc", "i", 3, 3)
        .raw("cond", "inc", "i", 3, 3)
        .raw("body", "inc", "i", 3, 4)
        // n: read-only
        .raw("cond", "init", "n", 2, 3)
        // sum: accumulated in the body, read after the loop
        .raw("body", "body", "sum", 4, 4)
        .dep(DependenceKind::Waw, "body", "body", "sum", 4, 4)
        .raw("print", "body", "sum", 4, 6)
        .build()
}
