//! Infrastructure layer for workload estimation

pub mod estimator;

pub use estimator::WorkloadEstimator;
