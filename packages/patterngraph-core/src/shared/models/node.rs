//! CU graph nodes
//!
//! Every node is exactly one of function, loop, computational unit or dummy.
//! The kind is fixed at construction; the payload carries the attributes
//! that only make sense for that kind.

use super::SourceLine;
use crate::errors::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag-only view of a node's kind (used for subtree filters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Loop,
    ComputationalUnit,
    Dummy,
}

impl NodeKind {
    /// Tag used by the upstream graph builder
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "func",
            Self::Loop => "loop",
            Self::ComputationalUnit => "cu",
            Self::Dummy => "dummy",
        }
    }

    /// Parse an upstream type tag
    ///
    /// `node` is only used to make the error readable.
    pub fn parse_tag(tag: &str, node: &str) -> Result<Self, PatternError> {
        match tag {
            "func" | "function" => Ok(Self::Function),
            "loop" => Ok(Self::Loop),
            "cu" => Ok(Self::ComputationalUnit),
            "dummy" => Ok(Self::Dummy),
            _ => Err(PatternError::InvalidNodeType {
                node: node.to_string(),
                found: tag.to_string(),
            }),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific node attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodePayload {
    /// Basic-block level code fragment
    ComputationalUnit {
        instructions_count: u64,
        basic_block_id: String,
    },
    /// Loop with the verdicts of the do-all and reduction detectors
    Loop { is_do_all: bool, is_reduction: bool },
    Function { name: String },
    Dummy,
}

/// Node of the CU graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuNode {
    /// Identifier assigned by the upstream graph builder
    pub id: String,

    /// Line where the construct begins (loop header line for loops)
    pub start_line: SourceLine,

    pub payload: NodePayload,

    /// Written by the geometric decomposition detector on function nodes
    #[serde(default)]
    geometric_decomposition: Option<bool>,
}

impl CuNode {
    pub fn new(id: impl Into<String>, start_line: SourceLine, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            start_line,
            payload,
            geometric_decomposition: None,
        }
    }

    /// Computational unit node
    pub fn unit(
        id: impl Into<String>,
        start_line: SourceLine,
        instructions_count: u64,
        basic_block_id: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            start_line,
            NodePayload::ComputationalUnit {
                instructions_count,
                basic_block_id: basic_block_id.into(),
            },
        )
    }

    /// Loop node; `start_line` is the loop header line
    pub fn loop_node(
        id: impl Into<String>,
        start_line: SourceLine,
        is_do_all: bool,
        is_reduction: bool,
    ) -> Self {
        Self::new(
            id,
            start_line,
            NodePayload::Loop {
                is_do_all,
                is_reduction,
            },
        )
    }

    pub fn function(id: impl Into<String>, start_line: SourceLine, name: impl Into<String>) -> Self {
        Self::new(id, start_line, NodePayload::Function { name: name.into() })
    }

    pub fn dummy(id: impl Into<String>, start_line: SourceLine) -> Self {
        Self::new(id, start_line, NodePayload::Dummy)
    }

    pub fn kind(&self) -> NodeKind {
        match self.payload {
            NodePayload::ComputationalUnit { .. } => NodeKind::ComputationalUnit,
            NodePayload::Loop { .. } => NodeKind::Loop,
            NodePayload::Function { .. } => NodeKind::Function,
            NodePayload::Dummy => NodeKind::Dummy,
        }
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    /// Raw instruction count (0 for anything but computational units)
    pub fn instructions_count(&self) -> u64 {
        match self.payload {
            NodePayload::ComputationalUnit {
                instructions_count, ..
            } => instructions_count,
            _ => 0,
        }
    }

    pub fn basic_block_id(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::ComputationalUnit { basic_block_id, .. } => Some(basic_block_id),
            _ => None,
        }
    }

    /// Function name, or the node id for other kinds
    pub fn display_name(&self) -> &str {
        match &self.payload {
            NodePayload::Function { name } => name,
            _ => &self.id,
        }
    }

    pub fn geometric_decomposition(&self) -> Option<bool> {
        self.geometric_decomposition
    }

    pub(crate) fn set_geometric_decomposition(&mut self, value: bool) {
        self.geometric_decomposition = Some(value);
    }
}
