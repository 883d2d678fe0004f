//! Geometric decomposition detection
//!
//! A function exhibits geometric decomposition when every loop nest it
//! contains (including loops of nested functions) is do-all or reduction,
//! so the data can be split into chunks processed independently.
//!
//! Detection runs in two stages per function node:
//! 1. **Pattern match**: all loops in the function's subtree are do-all or
//!    reduction. The result is recorded on the node either way.
//! 2. **Chunk limit**: the loops directly in the function, or directly in a
//!    function nested one level down, must all run at least once per
//!    invocation. Only then is the function reported.
//!
//! # Example
//!
//! ```rust,ignore
//! use patterngraph_core::features::geometric_decomposition::GeometricDecompositionDetector;
//!
//! let detector = GeometricDecompositionDetector::new(DetectionConfig::default());
//! let report = detector.run(&mut graph, profile);
//! for function in report.reported() {
//!     println!("{}", function.name);
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{DetectionReport, FunctionOutcome, LoopVerdict};
pub use infrastructure::{GeometricDecompositionDetector, NodeVerdicts, SuitabilityScores};
pub use ports::LoopVerdictSource;
