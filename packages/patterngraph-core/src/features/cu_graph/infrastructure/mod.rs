//! Infrastructure layer for the CU graph

pub mod builder;
pub mod snapshot;
pub mod subtree_index;

pub use builder::CuGraphBuilder;
pub use snapshot::{EdgeRecord, GraphSnapshot, NodeRecord};
pub use subtree_index::SubtreeIndex;
