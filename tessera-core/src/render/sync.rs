//! Render Sync
//!
//! The incremental repaint engine. It is the only code that changes what is
//! on the drawing surface, and it keeps the painted-shape bookkeeping of the
//! viewport tracker in step with those changes.
//!
//! # Paint order
//!
//! A full repaint draws the background, then every edge (and label), then
//! the nodes, so nodes always sit above edges. Incremental updates re-add
//! the node opposite the one that moved (or both ends, on request) after the
//! edge itself, relying on "add raises to top". The node that moved is
//! re-added after its edges, and the dragged node is raised last through the
//! moved-shape marker.
//!
//! Shapes are snapshots, so a node is only redrawn at its new position when
//! it is re-added. Every re-add goes through the painted-area predicate: a
//! node outside it is taken off the surface instead.
//!
//! # Hot path
//!
//! Dragging a node runs [`RenderSync::update_edges`], which touches only the
//! edges found in the adjacency index for that node.

use tracing::{debug, trace, warn};

use super::shape::{Shape, ShapeId};
use super::surface::Surface;
use crate::error::Endpoint;
use crate::graph::{EdgeId, GraphModel, Node, NodeId};
use crate::style::VisualStyle;
use crate::viewport::{PaintedArea, ViewportTracker};

pub struct RenderSync<S> {
    surface: S,
    viewport: ViewportTracker,
    /// Node being dragged; kept topmost after every incremental update.
    moved: Option<NodeId>,
}

impl<S: Surface> RenderSync<S> {
    pub fn new(surface: S, viewport: ViewportTracker) -> Self {
        Self {
            surface,
            viewport,
            moved: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host-side work such as draining a journal or
    /// flushing to a backend. Adding or removing shapes through it bypasses
    /// the painted-shape bookkeeping.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give back the surface, dropping the bookkeeping.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    pub fn set_painted_area(&mut self, area: impl PaintedArea + 'static) {
        self.viewport.set_area(area);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    pub fn moved_node(&self) -> Option<&NodeId> {
        self.moved.as_ref()
    }

    /// Set or clear the moved-shape marker.
    pub fn set_moved_node(&mut self, node: Option<NodeId>) {
        self.moved = node;
    }

    /// Clear the surface and redraw the whole graph.
    pub fn paint_all(&mut self, model: &GraphModel, style: &VisualStyle) {
        self.surface.clear();
        self.viewport.clear();

        self.surface.add(Shape::background(
            self.viewport.width(),
            self.viewport.height(),
            &style.background_color,
        ));

        for edge in model.edges() {
            self.surface.add(Shape::edge(edge));
            if style.texts_visible {
                self.surface.add(Shape::label(edge));
            }
            self.viewport.mark_edge_painted(edge.id());
        }

        // Endpoints in edge order, second before first.
        for edge in model.edges() {
            for id in [edge.second(), edge.first()] {
                match model.node(id) {
                    Some(node) => self.paint_once(node),
                    None => warn!(node = %id, edge = %edge.id(), "endpoint not found while painting"),
                }
            }
        }

        // Nodes without edges.
        for node in model.nodes() {
            self.paint_once(node);
        }

        debug!(
            nodes = self.viewport.painted_node_count(),
            edges = self.viewport.painted_edge_count(),
            "painted graph"
        );
    }

    fn paint_once(&mut self, node: &Node) {
        if self.viewport.is_node_painted(node.id()) || !self.viewport.is_in_painted_area(node) {
            return;
        }
        self.surface.add(Shape::node(node));
        self.viewport.mark_node_painted(node.id());
    }

    /// Remove and re-add each of `shapes`, raising them above their siblings.
    ///
    /// Nodes outside the painted area are removed and not re-added.
    pub fn paint_subset(&mut self, model: &GraphModel, style: &VisualStyle, shapes: &[ShapeId]) {
        for id in shapes {
            let shape = match id {
                ShapeId::Node(node) => {
                    self.raise_node(model, node);
                    continue;
                }
                ShapeId::Background => Some(Shape::background(
                    self.viewport.width(),
                    self.viewport.height(),
                    &style.background_color,
                )),
                ShapeId::Edge(edge) => model.edge(edge).map(Shape::edge),
                ShapeId::Label(edge) => model.edge(edge).map(Shape::label),
            };
            self.surface.remove(id);
            let Some(shape) = shape else {
                warn!(shape = ?id, "shape not found in model while repainting");
                continue;
            };
            self.surface.add(shape);
            if let ShapeId::Edge(edge) = id {
                self.viewport.mark_edge_painted(edge);
            }
        }
    }

    /// Re-derive the geometry of every edge incident to `node` after it moved.
    ///
    /// A node without edges is simply re-materialized. Otherwise the end of
    /// each incident edge that `node` drives is moved to its position and the
    /// label is re-centered. With `repaint` each touched edge is re-synced to
    /// the surface and `node` itself is redrawn above them. The moved node,
    /// if any, is raised last.
    pub fn update_edges(
        &mut self,
        model: &mut GraphModel,
        style: &VisualStyle,
        node: &NodeId,
        repaint: bool,
    ) {
        let incident = model.incident_edges(node);
        if incident.is_empty() {
            self.raise_node(model, node);
            return;
        }

        for edge_id in &incident {
            if !reshape_edge(model, edge_id, Some(node)) {
                continue;
            }
            if repaint {
                self.sync_edge_to_surface(model, style, edge_id, Some(node), false);
            }
        }
        trace!(%node, edges = incident.len(), repaint, "updated incident edges");

        if repaint && self.moved.as_ref() != Some(node) {
            self.raise_node(model, node);
        }
        if let Some(moved) = self.moved.clone() {
            self.raise_node(model, &moved);
        }
    }

    /// Re-add an edge (and its label) and raise the node(s) around it.
    ///
    /// Without `both_endpoints`, only the endpoint opposite `node` is raised;
    /// with it, both endpoints are.
    pub fn sync_edge_to_surface(
        &mut self,
        model: &GraphModel,
        style: &VisualStyle,
        edge: &EdgeId,
        node: Option<&NodeId>,
        both_endpoints: bool,
    ) {
        let Some(entry) = model.edge(edge) else {
            warn!(%edge, "edge not found while syncing to surface");
            return;
        };

        self.surface.remove(&ShapeId::Edge(edge.clone()));
        self.surface.remove(&ShapeId::Label(edge.clone()));
        self.surface.add(Shape::edge(entry));
        if style.texts_visible {
            self.surface.add(Shape::label(entry));
        }
        self.viewport.mark_edge_painted(edge);

        if both_endpoints {
            self.surface.remove(&ShapeId::Node(entry.second().clone()));
            self.surface.remove(&ShapeId::Node(entry.first().clone()));
            self.add_node(model, entry.second());
            self.add_node(model, entry.first());
        } else {
            let other = match node {
                Some(node) if node == entry.first() => entry.second(),
                _ => entry.first(),
            };
            self.raise_node(model, other);
        }
    }

    /// Shift every node by `(-dx, -dy)`, as when scrolling the view, then
    /// repaint everything once.
    ///
    /// Culled nodes move too, so the diagram keeps its shape and they can
    /// scroll into the painted area.
    pub fn translate_graph(&mut self, model: &mut GraphModel, style: &VisualStyle, dx: f64, dy: f64) {
        for node in model.nodes_mut() {
            node.translate(-dx, -dy);
        }
        let edges: Vec<EdgeId> = model.edge_ids().cloned().collect();
        for edge in &edges {
            reshape_edge(model, edge, None);
        }
        self.paint_all(model, style);
    }

    /// Materialize a newly added node, if it lies in the painted area.
    pub fn show_node(&mut self, model: &GraphModel, id: &NodeId) {
        match model.node(id) {
            Some(node) if self.viewport.is_in_painted_area(node) => {
                self.surface.add(Shape::node(node));
                self.viewport.mark_node_painted(id);
            }
            Some(_) => trace!(node = %id, "node outside painted area"),
            None => warn!(node = %id, "node not found while showing"),
        }
    }

    /// Take a removed node off the surface.
    pub fn forget_node(&mut self, id: &NodeId) {
        self.surface.remove(&ShapeId::Node(id.clone()));
        self.viewport.forget_node(id);
        if self.moved.as_ref() == Some(id) {
            self.moved = None;
        }
    }

    /// Take a removed edge and its label off the surface.
    pub fn forget_edge(&mut self, id: &EdgeId) {
        self.surface.remove(&ShapeId::Edge(id.clone()));
        self.surface.remove(&ShapeId::Label(id.clone()));
        self.viewport.forget_edge(id);
    }

    fn raise_node(&mut self, model: &GraphModel, id: &NodeId) {
        self.surface.remove(&ShapeId::Node(id.clone()));
        self.add_node(model, id);
    }

    /// Add `id` on top, or drop it from the painted set when it lies
    /// outside the painted area. Expects the old shape to be removed.
    fn add_node(&mut self, model: &GraphModel, id: &NodeId) {
        match model.node(id) {
            Some(node) if self.viewport.is_in_painted_area(node) => {
                self.surface.add(Shape::node(node));
                self.viewport.mark_node_painted(id);
            }
            Some(_) => {
                self.viewport.forget_node(id);
                trace!(node = %id, "node outside painted area");
            }
            None => warn!(node = %id, "node not found while raising"),
        }
    }
}

/// Move the end(s) of `edge` driven by `driver` to the current node
/// positions and re-center its label. `None` re-derives both ends.
///
/// Returns false if the edge or one of its endpoints is missing.
fn reshape_edge(model: &mut GraphModel, edge_id: &EdgeId, driver: Option<&NodeId>) -> bool {
    let Some(edge) = model.edge(edge_id) else {
        warn!(edge = %edge_id, "edge not found while reshaping");
        return false;
    };
    let ends = (model.node(edge.first()), model.node(edge.second()));
    let (Some(first), Some(second)) = ends else {
        warn!(edge = %edge_id, "endpoint not found while reshaping");
        return false;
    };
    let (first_pos, second_pos) = (first.position(), second.position());
    let drives = match driver {
        Some(node) => (first.id() == node, second.id() == node),
        None => (true, true),
    };

    if let Some(edge) = model.edge_mut(edge_id) {
        if drives.0 {
            edge.set_endpoint(Endpoint::First, first_pos.0, first_pos.1);
        }
        if drives.1 {
            edge.set_endpoint(Endpoint::Second, second_pos.0, second_pos.1);
        }
        edge.recenter_label(first_pos, second_pos);
    }
    true
}

impl<S: std::fmt::Debug> std::fmt::Debug for RenderSync<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSync")
            .field("surface", &self.surface)
            .field("viewport", &self.viewport)
            .field("moved", &self.moved)
            .finish()
    }
}
