//! Loop iteration profile
//!
//! Raw iteration counts measured by the profiler, keyed by loop header line.
//! A count is aggregated over every invocation of the loop, so a nested
//! loop's count includes all iterations of its enclosing loops.

use crate::errors::Result;
use crate::shared::models::SourceLine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoopIterationProfile {
    counts: HashMap<SourceLine, u64>,
}

impl LoopIterationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"1:5": 100, "1:7": 1000}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, line: SourceLine, count: u64) -> Option<u64> {
        self.counts.insert(line, count)
    }

    pub fn with(mut self, line: SourceLine, count: u64) -> Self {
        self.insert(line, count);
        self
    }

    /// Raw count for a header line (0 if the loop was never measured)
    pub fn get(&self, line: SourceLine) -> u64 {
        self.counts.get(&line).copied().unwrap_or(0)
    }

    pub fn contains(&self, line: SourceLine) -> bool {
        self.counts.contains_key(&line)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(SourceLine, u64)> for LoopIterationProfile {
    fn from_iter<I: IntoIterator<Item = (SourceLine, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
