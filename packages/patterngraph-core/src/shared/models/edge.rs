//! CU graph edges

use super::SourceLine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data dependence kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependenceKind {
    /// Read after write (true dependence)
    #[serde(rename = "RAW")]
    Raw,
    /// Write after write (output dependence)
    #[serde(rename = "WAW")]
    Waw,
    /// Write after read (anti dependence)
    #[serde(rename = "WAR")]
    War,
}

impl DependenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Waw => "WAW",
            Self::War => "WAR",
        }
    }

    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag {
            "RAW" => Some(Self::Raw),
            "WAW" => Some(Self::Waw),
            "WAR" => Some(Self::War),
            _ => None,
        }
    }

    /// WAW and WAR both imply a write at the sink
    pub fn is_write_sink(&self) -> bool {
        matches!(self, Self::Waw | Self::War)
    }
}

impl fmt::Display for DependenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data dependence between two computational units
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependence {
    pub kind: DependenceKind,
    /// Variable carrying the dependence
    pub var: String,
    pub source_line: SourceLine,
    pub sink_line: SourceLine,
}

impl Dependence {
    pub fn new(
        kind: DependenceKind,
        var: impl Into<String>,
        source_line: SourceLine,
        sink_line: SourceLine,
    ) -> Self {
        Self {
            kind,
            var: var.into(),
            source_line,
            sink_line,
        }
    }

    pub fn raw(var: impl Into<String>, source_line: SourceLine, sink_line: SourceLine) -> Self {
        Self::new(DependenceKind::Raw, var, source_line, sink_line)
    }

    /// Source and sink on the same line (e.g. `i++` in a loop header)
    pub fn is_self_referential(&self) -> bool {
        self.source_line == self.sink_line
    }
}

/// Edge of the CU graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CuEdge {
    /// Containment (parent -> child)
    Child,
    Dependence(Dependence),
}

impl CuEdge {
    pub fn is_child(&self) -> bool {
        matches!(self, Self::Child)
    }

    pub fn dependence(&self) -> Option<&Dependence> {
        match self {
            Self::Dependence(dep) => Some(dep),
            Self::Child => None,
        }
    }

    pub fn is_dependence_of(&self, kind: DependenceKind) -> bool {
        self.dependence().map_or(false, |dep| dep.kind == kind)
    }
}
