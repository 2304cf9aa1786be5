//! Adjacency Index
//!
//! Derived mapping from each node to the set of edges incident to it. It is
//! what lets a drag touch only the edges of the dragged node instead of
//! scanning the whole graph.
//!
//! Invariant: for every edge `e = (a, b)` in the model, `e` is in the entry
//! of `a` and in the entry of `b`, and in no other entry. Entries that
//! become empty are dropped, so a node without edges has no entry at all.
//!
//! Both maps are insertion ordered, which keeps every traversal (and hence
//! every paint order derived from one) deterministic.

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::warn;

use super::edge::EdgeId;
use super::node::NodeId;

/// Edge ids collected out of the index so the model can be mutated while
/// walking them. Most nodes have only a handful of edges.
pub type EdgeList = SmallVec<[EdgeId; 8]>;

#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    entries: IndexMap<NodeId, IndexSet<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `edge` under both endpoints.
    pub fn connect(&mut self, edge: &EdgeId, first: &NodeId, second: &NodeId) {
        self.entries
            .entry(first.clone())
            .or_default()
            .insert(edge.clone());
        self.entries
            .entry(second.clone())
            .or_default()
            .insert(edge.clone());
    }

    /// Remove `edge` from both endpoints' entries.
    ///
    /// A missing entry or membership is reported and otherwise ignored.
    pub fn disconnect(&mut self, edge: &EdgeId, first: &NodeId, second: &NodeId) {
        self.disconnect_one(edge, first);
        if second != first {
            self.disconnect_one(edge, second);
        }
    }

    /// Remove `edge` from a single node's entry.
    pub fn disconnect_one(&mut self, edge: &EdgeId, node: &NodeId) {
        let Some(set) = self.entries.get_mut(node) else {
            warn!(%edge, %node, "edge set not found while unlinking edge");
            return;
        };
        if !set.shift_remove(edge) {
            warn!(%edge, %node, "edge not found in edge set");
        }
        if set.is_empty() {
            self.entries.shift_remove(node);
        }
    }

    /// Edges incident to `node`, if it has any.
    pub fn incident(&self, node: &NodeId) -> Option<&IndexSet<EdgeId>> {
        self.entries.get(node)
    }

    /// Owned copy of the edges incident to `node`, in insertion order.
    pub fn incident_list(&self, node: &NodeId) -> EdgeList {
        self.entries
            .get(node)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove and return the entry for `node`.
    pub fn take(&mut self, node: &NodeId) -> Option<IndexSet<EdgeId>> {
        self.entries.shift_remove(node)
    }

    /// Whether `node` has no incident edges.
    pub fn is_singleton(&self, node: &NodeId) -> bool {
        self.entries.get(node).map_or(true, IndexSet::is_empty)
    }

    pub fn contains(&self, node: &NodeId, edge: &EdgeId) -> bool {
        self.entries
            .get(node)
            .is_some_and(|set| set.contains(edge))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &IndexSet<EdgeId>)> {
        self.entries.iter()
    }

    /// Number of nodes with at least one incident edge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
