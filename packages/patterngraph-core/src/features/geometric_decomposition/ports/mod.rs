//! Geometric decomposition ports
//!
//! The detector does not classify loops itself. Do-all and reduction
//! verdicts come from other detectors through `LoopVerdictSource`.

use crate::features::cu_graph::CuGraph;
use crate::features::geometric_decomposition::domain::LoopVerdict;
use petgraph::graph::NodeIndex;

/// Supplier of do-all / reduction verdicts for loop nodes
pub trait LoopVerdictSource {
    /// Verdict for `loop_node`; non-loop or unknown nodes get the default
    /// (neither do-all nor reduction)
    fn verdict(&self, graph: &CuGraph, loop_node: NodeIndex) -> LoopVerdict;
}

impl<T: LoopVerdictSource + ?Sized> LoopVerdictSource for &T {
    fn verdict(&self, graph: &CuGraph, loop_node: NodeIndex) -> LoopVerdict {
        (**self).verdict(graph, loop_node)
    }
}
