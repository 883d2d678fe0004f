//! Computational-unit graph
//!
//! The dependency graph every detector works on: functions, loops and
//! computational units (CUs) joined by containment edges, with RAW/WAW/WAR
//! dependence edges between CUs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - CuGraph (petgraph DiGraph)           │
//! │  - DependenceRef (edge + endpoints)     │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - CuGraphBuilder (validated build)     │
//! │  - GraphSnapshot (JSON loading)         │
//! │  - SubtreeIndex (pre-order intervals)   │
//! └─────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{CuGraph, DependenceRef};
pub use infrastructure::{CuGraphBuilder, GraphSnapshot, SubtreeIndex};
