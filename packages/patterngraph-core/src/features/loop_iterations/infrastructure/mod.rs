//! Infrastructure layer for loop iteration estimation

pub mod estimator;

pub use estimator::IterationEstimator;
