//! Loop iteration estimation
//!
//! Turns raw profiled iteration counts into per-invocation counts: a loop
//! nested in another loop is measured across all invocations, so its raw
//! count is divided by the nearest enclosing loop's count.

pub mod domain;
pub mod infrastructure;

pub use domain::LoopIterationProfile;
pub use infrastructure::IterationEstimator;
