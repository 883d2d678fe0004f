//! Infrastructure layer for geometric decomposition detection

pub mod detector;
pub mod verdicts;

pub use detector::GeometricDecompositionDetector;
pub use verdicts::{NodeVerdicts, SuitabilityScores};
