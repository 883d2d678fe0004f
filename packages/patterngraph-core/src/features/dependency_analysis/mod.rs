//! Dependency classification
//!
//! Decides which RAW dependences actually block parallelization. Two kinds
//! are benign relative to an enclosing loop:
//! - **loop index**: self-referential update on a loop header line
//!   (`i = i + 1` in `for (...; ...; i++)`)
//! - **read-only**: the variable is only written on loop header lines,
//!   never in the body
//!
//! Used by the do-all, reduction and pipeline detectors sharing the graph.

pub mod infrastructure;

pub use infrastructure::DependencyClassifier;
