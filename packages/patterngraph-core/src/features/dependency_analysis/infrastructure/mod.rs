//! Infrastructure layer for dependency classification

pub mod classifier;

pub use classifier::DependencyClassifier;
