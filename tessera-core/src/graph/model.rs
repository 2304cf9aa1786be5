//! Graph Model
//!
//! The model owns every node and edge, keyed by name, together with the
//! adjacency index derived from them. All topology changes go through the
//! methods here so the index can never drift from the edge map.
//!
//! Removal returns what was removed instead of reaching into the viewport
//! or selection bookkeeping; the owner of those views prunes them from the
//! returned [`NodeRemoval`] in the same call.

use indexmap::IndexMap;
use tracing::{trace, warn};

use super::adjacency::{AdjacencyIndex, EdgeList};
use super::edge::{Edge, EdgeId};
use super::node::{Node, NodeId};
use crate::error::{GraphError, Result};
use crate::ingest::{Refreshed, UpdateIngestor, UpdateMessage};
use crate::style::VisualStyle;

/// A node removed from the model together with the edges that went with it.
#[derive(Debug)]
pub struct NodeRemoval {
    pub node: Node,
    pub edges: Vec<Edge>,
}

/// Canonical node/edge state of the diagram.
#[derive(Debug, Default, Clone)]
pub struct GraphModel {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    adjacency: AdjacencyIndex,
}

impl GraphModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole state with the contents of a snapshot message.
    pub fn load_snapshot(&mut self, message: &UpdateMessage, style: &VisualStyle) {
        UpdateIngestor::new(style).load_snapshot(self, message);
    }

    /// Refresh attributes of existing entities from a partial message.
    pub fn apply_partial_update(
        &mut self,
        message: &UpdateMessage,
        style: &VisualStyle,
    ) -> Result<Refreshed> {
        UpdateIngestor::new(style).apply_partial_update(self, message)
    }

    /// Drop every node, edge and adjacency entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    /// Add a node. Names are unique.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Add an edge whose endpoints are both already in the model.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [edge.first(), edge.second()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::UnknownNode(endpoint.clone()));
            }
        }
        if self.edges.contains_key(edge.id()) {
            return Err(GraphError::DuplicateEdge(edge.id().clone()));
        }
        self.adjacency.connect(edge.id(), edge.first(), edge.second());
        self.edges.insert(edge.id().clone(), edge);
        Ok(())
    }

    /// Insert an edge, replacing and unlinking any edge of the same name.
    ///
    /// Returns the replaced edge.
    pub fn upsert_edge(&mut self, edge: Edge) -> Result<Option<Edge>> {
        let replaced = match self.edges.contains_key(edge.id()) {
            true => Some(self.remove_edge(edge.id())?),
            false => None,
        };
        self.add_edge(edge)?;
        Ok(replaced)
    }

    /// Remove an edge and unlink it from both endpoints.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge> {
        let edge = self
            .edges
            .shift_remove(id)
            .ok_or_else(|| GraphError::UnknownEdge(id.clone()))?;
        self.adjacency.disconnect(edge.id(), edge.first(), edge.second());
        Ok(edge)
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Each cascaded edge is also unlinked from its other endpoint, so a
    /// neighbour left without edges loses its adjacency entry.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<NodeRemoval> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))?;

        let incident = self.adjacency.take(id).unwrap_or_default();
        let mut edges = Vec::with_capacity(incident.len());
        for edge_id in incident {
            let Some(edge) = self.edges.shift_remove(&edge_id) else {
                warn!(edge = %edge_id, node = %id, "edge not found while removing node");
                continue;
            };
            let other = edge.opposite(id);
            if other != id {
                self.adjacency.disconnect_one(edge.id(), other);
            }
            edges.push(edge);
        }

        trace!(node = %id, edges = edges.len(), "removed node");
        Ok(NodeRemoval { node, edges })
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.keys()
    }

    /// Owned list of the edges incident to `node`.
    pub fn incident_edges(&self, node: &NodeId) -> EdgeList {
        self.adjacency.incident_list(node)
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check the adjacency invariant against the edge map.
    ///
    /// Every edge must sit in both endpoints' entries, every indexed edge
    /// must exist and touch the node it is indexed under, and every indexed
    /// node must exist.
    pub fn is_consistent(&self) -> bool {
        let edges_indexed = self.edges.values().all(|edge| {
            self.adjacency.contains(edge.first(), edge.id())
                && self.adjacency.contains(edge.second(), edge.id())
        });
        let index_valid = self.adjacency.iter().all(|(node, set)| {
            self.nodes.contains_key(node)
                && !set.is_empty()
                && set
                    .iter()
                    .all(|id| self.edges.get(id).is_some_and(|edge| edge.touches(node)))
        });
        edges_indexed && index_valid
    }
}
