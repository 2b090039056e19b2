use std::collections::HashSet;

use crate::graph::NodeId;

/// Nodes finalized during a single search run.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    finalized: HashSet<NodeId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as finalized. Returns `false` if it already was.
    pub fn finalize(&mut self, node: NodeId) -> bool {
        self.finalized.insert(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.finalized.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.finalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finalized.is_empty()
    }
}
