//! Shared utilities

pub mod similarity;

pub use similarity::correlation_coefficient;
