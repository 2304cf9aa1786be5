//! Graph View
//!
//! The aggregate a host talks to. It owns the model, the selection, the
//! render engine (with its viewport bookkeeping and surface) and the current
//! style, and exposes the user-event entry points. Each entry point runs to
//! completion synchronously: mutate the model, prune the side bookkeeping,
//! then re-sync the surface.

use tracing::debug;

use crate::config::ViewConfig;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeId, GraphModel, Node, NodeId, NodeRemoval};
use crate::ingest::UpdateMessage;
use crate::render::{RenderSync, ShapeId, Surface};
use crate::selection::SelectionManager;
use crate::style::VisualStyle;
use crate::viewport::{PaintedArea, ViewportTracker};

pub struct GraphView<S> {
    model: GraphModel,
    selection: SelectionManager,
    render: RenderSync<S>,
    style: VisualStyle,
}

impl<S: Surface> GraphView<S> {
    /// Create an empty view drawing onto `surface`.
    pub fn new(config: ViewConfig, surface: S) -> Self {
        Self {
            model: GraphModel::new(),
            selection: SelectionManager::new(),
            render: RenderSync::new(surface, ViewportTracker::new(config.width, config.height)),
            style: config.style,
        }
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportTracker {
        self.render.viewport()
    }

    pub fn surface(&self) -> &S {
        self.render.surface()
    }

    /// See [`RenderSync::surface_mut`].
    pub fn surface_mut(&mut self) -> &mut S {
        self.render.surface_mut()
    }

    pub fn style(&self) -> &VisualStyle {
        &self.style
    }

    /// Replace the painted-area predicate. Takes effect on the next paint.
    pub fn set_painted_area(&mut self, area: impl PaintedArea + 'static) {
        self.render.set_painted_area(area);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render.resize(width, height);
    }

    /// Rebuild the graph from a snapshot and repaint everything.
    pub fn repaint_graph(&mut self, message: &UpdateMessage) {
        self.model.load_snapshot(message, &self.style);
        self.selection.clear();
        self.render.set_moved_node(None);
        self.render.paint_all(&self.model, &self.style);
    }

    /// Refresh existing entities from a partial update and repaint.
    ///
    /// Fails without touching the model or the surface if any record names
    /// an entity that does not exist.
    pub fn refresh_graph(&mut self, message: &UpdateMessage) -> Result<()> {
        let refreshed = self.model.apply_partial_update(message, &self.style)?;
        for node in &refreshed.nodes {
            self.render.update_edges(&mut self.model, &self.style, node, false);
        }
        self.render.paint_all(&self.model, &self.style);
        Ok(())
    }

    /// Full repaint of the current state.
    pub fn paint_all(&mut self) {
        self.render.paint_all(&self.model, &self.style);
    }

    /// Install a new style, re-apply radius and text visibility to every
    /// node, and re-render each node with its edges.
    pub fn update_graph_properties(&mut self, style: VisualStyle) {
        self.style = style;
        for node in self.model.nodes_mut() {
            node.set_text_visible(self.style.texts_visible);
            node.set_radius(self.style.node_size);
        }
        let ids: Vec<NodeId> = self.model.node_ids().cloned().collect();
        for id in &ids {
            self.render.update_edges(&mut self.model, &self.style, id, true);
        }
        debug!(nodes = ids.len(), "applied graph properties");
    }

    /// Mark `node` as the one being dragged so it stays on top.
    pub fn begin_move(&mut self, node: &NodeId) -> Result<()> {
        if !self.model.contains_node(node) {
            return Err(GraphError::UnknownNode(node.clone()));
        }
        self.render.set_moved_node(Some(node.clone()));
        Ok(())
    }

    pub fn end_move(&mut self) {
        self.render.set_moved_node(None);
    }

    /// Move a node by a delta and re-sync its incident edges.
    pub fn move_node(&mut self, node: &NodeId, dx: f64, dy: f64) -> Result<()> {
        self.model
            .node_mut(node)
            .ok_or_else(|| GraphError::UnknownNode(node.clone()))?
            .translate(dx, dy);
        self.render.update_edges(&mut self.model, &self.style, node, true);
        Ok(())
    }

    /// Scroll the whole graph by `(dx, dy)`.
    pub fn translate_graph(&mut self, dx: f64, dy: f64) {
        self.render
            .translate_graph(&mut self.model, &self.style, dx, dy);
    }

    /// Select or deselect a node. Returns whether membership changed.
    pub fn set_node_selected(&mut self, node: &NodeId, selected: bool) -> Result<bool> {
        let changed = self
            .selection
            .set_node_selected(&mut self.model, &self.style, node, selected)?;
        if self.render.viewport().is_node_painted(node) {
            self.render
                .paint_subset(&self.model, &self.style, &[ShapeId::Node(node.clone())]);
        }
        Ok(changed)
    }

    /// Select or deselect an edge. Returns whether membership changed.
    pub fn set_edge_selected(&mut self, edge: &EdgeId, selected: bool) -> Result<bool> {
        let changed = self
            .selection
            .set_edge_selected(&mut self.model, &self.style, edge, selected)?;
        if self.render.viewport().is_edge_painted(edge) {
            self.render
                .sync_edge_to_surface(&self.model, &self.style, edge, None, true);
        }
        Ok(changed)
    }

    /// Add a node and materialize it.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        let id = node.id().clone();
        self.model.add_node(node)?;
        self.render.show_node(&self.model, &id);
        Ok(())
    }

    /// Add an edge between existing nodes and draw it beneath them.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let id = edge.id().clone();
        self.model.add_edge(edge)?;
        self.render
            .sync_edge_to_surface(&self.model, &self.style, &id, None, true);
        Ok(())
    }

    /// Remove a node and its incident edges from the model, the surface and
    /// the selection.
    pub fn remove_node(&mut self, node: &NodeId) -> Result<NodeRemoval> {
        let removal = self.model.remove_node(node)?;
        for edge in &removal.edges {
            self.render.forget_edge(edge.id());
            self.selection.forget_edge(edge.id());
        }
        self.render.forget_node(node);
        self.selection.forget_node(node);
        Ok(removal)
    }

    /// Remove an edge from the model, the surface and the selection.
    pub fn remove_edge(&mut self, edge: &EdgeId) -> Result<Edge> {
        let removed = self.model.remove_edge(edge)?;
        self.render.forget_edge(edge);
        self.selection.forget_edge(edge);
        Ok(removed)
    }

    /// Tear the view down and hand back its surface.
    pub fn into_surface(self) -> S {
        self.render.into_surface()
    }
}
