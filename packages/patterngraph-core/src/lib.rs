/*
 * patterngraph-core - Parallel Pattern Detection Core
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (CuNode, CuEdge, SourceLine) and utilities
 * - features/    : Vertical slices (cu_graph → loop_iterations → dependency_analysis
 *                  → workload → geometric_decomposition)
 * - pipeline/    : Per-run analysis session
 * - config/      : Detection configuration (YAML)
 *
 * Input is a CU graph built from compiler instrumentation plus profiled loop
 * iteration counts; output is, per function, whether its loop nests form a
 * geometric decomposition.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // CU, RAW, WAW naming

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Analysis session
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{DetectionConfig, Validatable};
pub use errors::{PatternError, Result};
pub use features::cu_graph::{CuGraph, CuGraphBuilder, GraphSnapshot, SubtreeIndex};
pub use features::dependency_analysis::DependencyClassifier;
pub use features::geometric_decomposition::{
    DetectionReport, FunctionOutcome, GeometricDecompositionDetector, LoopVerdict,
    LoopVerdictSource, SuitabilityScores,
};
pub use features::loop_iterations::LoopIterationProfile;
pub use features::workload::WorkloadEstimator;
pub use pipeline::AnalysisSession;
pub use shared::models::{CuEdge, CuNode, Dependence, DependenceKind, NodeKind, NodePayload, SourceLine};
pub use shared::utils::correlation_coefficient;
