//! Workload estimation
//!
//! Instruction counts aggregated over the containment tree:
//! - `workload` weights loop-contained units by effective iterations
//! - `total_instructions` is the static sum, no loop multiplication

pub mod domain;
pub mod infrastructure;

pub use domain::BlockRole;
pub use infrastructure::WorkloadEstimator;
