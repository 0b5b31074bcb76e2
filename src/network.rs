//! The weighted name-similarity graph.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

use crate::bipartite::NameNode;

/// Undirected graph over names; edge weights are bigram-overlap similarities.
///
/// Backed by a `StableGraph` so that pruning keeps the remaining node
/// indices valid.
#[derive(Debug, Clone, Default)]
pub struct NameGraph {
    inner: StableUnGraph<NameNode, f64>,
    index: HashMap<String, NodeIndex>,
}

impl NameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the underlying petgraph graph.
    pub fn inner(&self) -> &StableUnGraph<NameNode, f64> {
        &self.inner
    }

    /// Add a name, or return the existing node for that label.
    pub fn add_name(&mut self, node: NameNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.label) {
            return idx;
        }
        let label = node.label.clone();
        let idx = self.inner.add_node(node);
        self.index.insert(label, idx);
        idx
    }

    /// Set the similarity between two distinct names. Self-pairs are ignored.
    pub fn set_similarity(&mut self, a: NodeIndex, b: NodeIndex, weight: f64) {
        if a == b {
            return;
        }
        self.inner.update_edge(a, b, weight);
    }

    /// Remove a name and all its edges.
    pub fn remove_name(&mut self, idx: NodeIndex) -> Option<NameNode> {
        let node = self.inner.remove_node(idx)?;
        self.index.remove(&node.label);
        Some(node)
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Attributes of a name.
    pub fn name(&self, name: &str) -> Option<&NameNode> {
        self.find(name).and_then(|idx| self.inner.node_weight(idx))
    }

    /// Similarity between two names, if they are linked.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let edge = self.inner.find_edge(self.find(a)?, self.find(b)?)?;
        self.inner.edge_weight(edge).copied()
    }

    /// Number of neighbours of a name.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.inner.neighbors(idx).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut StableUnGraph<NameNode, f64> {
        &mut self.inner
    }
}
