//! Source line identifiers
//!
//! The instrumentation identifies source positions as `file_id:line`.
//! Loop headers, CU start lines and dependence endpoints all use this form,
//! and the iteration profile is keyed by it.

use crate::errors::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a construct in the instrumented sources (`file_id:line`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceLine {
    pub file_id: u32,
    pub line: u32,
}

impl SourceLine {
    pub fn new(file_id: u32, line: u32) -> Self {
        Self { file_id, line }
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_id, self.line)
    }
}

impl FromStr for SourceLine {
    type Err = PatternError;

    /// Parse `"file:line"`; a bare `"line"` belongs to file 0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PatternError::InvalidSourceLine(s.to_string());
        let trimmed = s.trim();

        match trimmed.split_once(':') {
            Some((file, line)) => Ok(Self {
                file_id: file.trim().parse().map_err(|_| invalid())?,
                line: line.trim().parse().map_err(|_| invalid())?,
            }),
            None => Ok(Self {
                file_id: 0,
                line: trimmed.parse().map_err(|_| invalid())?,
            }),
        }
    }
}

impl TryFrom<String> for SourceLine {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceLine> for String {
    fn from(value: SourceLine) -> Self {
        value.to_string()
    }
}
