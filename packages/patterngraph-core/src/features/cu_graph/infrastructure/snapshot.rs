//! JSON snapshot of a CU graph
//!
//! The upstream graph builder emits string-tagged nodes (`func`, `loop`,
//! `cu`, `dummy`) and edges (`child`, `dependence` + `dtype`). Tags are
//! checked here, once, so the rest of the crate works on closed enums.
//!
//! ```json
//! {
//!   "nodes": [
//!     {"id": "0:1", "type": "func", "startsAtLine": "1:3", "name": "main"},
//!     {"id": "0:2", "type": "loop", "startsAtLine": "1:5", "doAll": true},
//!     {"id": "0:3", "type": "cu", "startsAtLine": "1:6",
//!      "instructionsCount": 12, "BasicBlockID": "for.body"}
//!   ],
//!   "edges": [
//!     {"source": "0:1", "target": "0:2", "type": "child"},
//!     {"source": "0:3", "target": "0:3", "type": "dependence",
//!      "dtype": "RAW", "var": "i", "sourceLine": "1:5", "sinkLine": "1:5"}
//!   ]
//! }
//! ```

use crate::errors::{PatternError, Result};
use crate::features::cu_graph::domain::CuGraph;
use crate::features::cu_graph::infrastructure::CuGraphBuilder;
use crate::shared::models::{CuNode, Dependence, DependenceKind, NodeKind, NodePayload, SourceLine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(alias = "startsAtLine")]
    pub start_line: SourceLine,

    #[serde(default)]
    pub instructions_count: u64,

    #[serde(default, alias = "BasicBlockID")]
    pub basic_block_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub do_all: bool,

    #[serde(default)]
    pub reduction: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,

    #[serde(rename = "type")]
    pub edge_type: String,

    #[serde(default)]
    pub dtype: Option<String>,

    #[serde(default)]
    pub var: Option<String>,

    #[serde(default)]
    pub source_line: Option<SourceLine>,

    #[serde(default)]
    pub sink_line: Option<SourceLine>,
}

impl NodeRecord {
    fn into_node(self) -> Result<CuNode> {
        let kind = NodeKind::parse_tag(&self.node_type, &self.id)?;
        let payload = match kind {
            NodeKind::ComputationalUnit => NodePayload::ComputationalUnit {
                instructions_count: self.instructions_count,
                basic_block_id: self.basic_block_id,
            },
            NodeKind::Loop => NodePayload::Loop {
                is_do_all: self.do_all,
                is_reduction: self.reduction,
            },
            NodeKind::Function => NodePayload::Function {
                name: self.name.unwrap_or_else(|| self.id.clone()),
            },
            NodeKind::Dummy => NodePayload::Dummy,
        };
        Ok(CuNode::new(self.id, self.start_line, payload))
    }
}

impl EdgeRecord {
    fn invalid(&self, reason: impl Into<String>) -> PatternError {
        PatternError::invalid_edge(self.source.clone(), self.target.clone(), reason)
    }

    fn to_dependence(&self) -> Result<Dependence> {
        let dtype = self
            .dtype
            .as_deref()
            .ok_or_else(|| self.invalid("dependence edge without 'dtype'"))?;
        let kind = DependenceKind::parse_tag(dtype)
            .ok_or_else(|| self.invalid(format!("unknown dependence type '{}'", dtype)))?;
        let var = self
            .var
            .clone()
            .ok_or_else(|| self.invalid("dependence edge without 'var'"))?;
        let source_line = self
            .source_line
            .ok_or_else(|| self.invalid("dependence edge without 'sourceLine'"))?;
        let sink_line = self
            .sink_line
            .ok_or_else(|| self.invalid("dependence edge without 'sinkLine'"))?;
        Ok(Dependence::new(kind, var, source_line, sink_line))
    }
}

impl GraphSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate tags and structure, producing the analysis graph
    pub fn into_graph(self) -> Result<CuGraph> {
        let mut builder = CuGraphBuilder::new();

        for record in self.nodes {
            builder.add_node(record.into_node()?)?;
        }

        for edge in &self.edges {
            match edge.edge_type.as_str() {
                "child" => builder.add_child_by_id(&edge.source, &edge.target)?,
                "dependence" => {
                    let dependence = edge.to_dependence()?;
                    builder.add_dependence_by_id(&edge.source, &edge.target, dependence)?
                }
                other => return Err(edge.invalid(format!("unknown edge type '{}'", other))),
            }
        }

        Ok(builder.build())
    }
}

impl CuGraph {
    /// Load a graph from its JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        GraphSnapshot::from_json(json)?.into_graph()
    }
}
