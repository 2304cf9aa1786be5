//! Selection
//!
//! Tracks which nodes and edges are selected and swaps their colors for the
//! selection colors of the style. The colors live on the entities
//! themselves; this module only owns the membership sets.
//!
//! Selection never touches the drawing surface. The caller re-syncs the
//! changed shape through the render path.

use indexmap::IndexSet;

use crate::error::{GraphError, Result};
use crate::graph::{EdgeId, GraphModel, NodeId};
use crate::style::VisualStyle;

#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    nodes: IndexSet<NodeId>,
    edges: IndexSet<EdgeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect a node.
    ///
    /// Selecting stores the node's fill and shows the node selection color;
    /// deselecting restores the stored fill. Returns whether membership
    /// changed.
    pub fn set_node_selected(
        &mut self,
        model: &mut GraphModel,
        style: &VisualStyle,
        id: &NodeId,
        selected: bool,
    ) -> Result<bool> {
        let node = model
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))?;
        if selected {
            node.highlight(&style.node_selection_color);
            Ok(self.nodes.insert(id.clone()))
        } else {
            node.unhighlight();
            Ok(self.nodes.shift_remove(id))
        }
    }

    /// Select or deselect an edge, swapping its stroke.
    pub fn set_edge_selected(
        &mut self,
        model: &mut GraphModel,
        style: &VisualStyle,
        id: &EdgeId,
        selected: bool,
    ) -> Result<bool> {
        let edge = model
            .edge_mut(id)
            .ok_or_else(|| GraphError::UnknownEdge(id.clone()))?;
        if selected {
            edge.highlight(&style.edge_selection_color);
            Ok(self.edges.insert(id.clone()))
        } else {
            edge.unhighlight();
            Ok(self.edges.shift_remove(id))
        }
    }

    pub fn is_node_selected(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn is_edge_selected(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn selected_edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.iter()
    }

    /// Drop a removed node from the selection.
    pub fn forget_node(&mut self, id: &NodeId) -> bool {
        self.nodes.shift_remove(id)
    }

    /// Drop a removed edge from the selection.
    pub fn forget_edge(&mut self, id: &EdgeId) -> bool {
        self.edges.shift_remove(id)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
