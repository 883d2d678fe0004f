//! Error types for patterngraph-core
//!
//! Missing profile data never surfaces here: it degrades to zero iterations.
//! What does surface is graph corruption (wrong node/edge kinds, broken
//! containment tree) and failures while loading snapshots or configuration.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for pattern detection
#[derive(Debug, Error)]
pub enum PatternError {
    /// Node index does not belong to the graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Node identifier referenced by an edge or query is unknown
    #[error("Unknown node id '{0}'")]
    UnknownNode(String),

    /// Two nodes share the same identifier
    #[error("Duplicate node id '{0}'")]
    DuplicateNode(String),

    /// Node type tag outside {func, loop, cu, dummy}
    #[error("Invalid node type '{found}' for node '{node}'. Valid types: func, loop, cu, dummy")]
    InvalidNodeType { node: String, found: String },

    /// Edge violates the graph contract (bad tag, dependence between non-CUs, ...)
    #[error("Invalid edge {source_id} -> {target_id}: {reason}")]
    InvalidEdge {
        source_id: String,
        target_id: String,
        reason: String,
    },

    /// Node already has a containment parent
    #[error("Node '{child}' already has parent '{existing}', cannot attach to '{parent}'")]
    MultipleParents {
        child: String,
        existing: String,
        parent: String,
    },

    /// Containment edge would close a cycle
    #[error("Containment edge {parent} -> {child} would create a cycle")]
    ContainmentCycle { parent: String, child: String },

    /// Malformed source line ("file:line")
    #[error("Invalid source line '{0}', expected 'file:line' or 'line'")]
    InvalidSourceLine(String),

    /// Snapshot JSON could not be decoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PatternError {
    /// Create an invalid edge error
    pub fn invalid_edge(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PatternError::InvalidEdge {
            source_id: source_id.into(),
            target_id: target_id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for pattern detection
pub type Result<T> = std::result::Result<T, PatternError>;
