//! CU graph domain model

pub mod graph;

pub use graph::{CuGraph, DependenceRef};
