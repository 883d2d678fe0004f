//! Shared models

mod edge;
mod node;
mod source_line;

pub use edge::{CuEdge, Dependence, DependenceKind};
pub use node::{CuNode, NodeKind, NodePayload};
pub use source_line::SourceLine;
