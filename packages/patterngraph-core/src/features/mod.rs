//! Feature modules
//!
//! - `cu_graph`: graph model, builder, snapshot loading, subtree index
//! - `loop_iterations`: profile normalization per loop invocation
//! - `dependency_analysis`: benign vs blocking RAW dependences
//! - `workload`: instruction-count aggregation
//! - `geometric_decomposition`: the pattern detector

pub mod cu_graph;
pub mod dependency_analysis;
pub mod geometric_decomposition;
pub mod loop_iterations;
pub mod workload;
