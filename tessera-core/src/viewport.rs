//! Viewport Tracking
//!
//! Two questions are answered here: may a node be painted at all (is it
//! inside the painted area), and which nodes and edges are currently
//! materialized on the drawing surface.
//!
//! The painted area is a pluggable predicate. The default, [`Unbounded`],
//! accepts every node; [`Bounds`] culls nodes outside a rectangle, and any
//! closure over `&Node` works as well. Nothing outside this module needs to
//! change to switch between them.

use indexmap::IndexSet;

use crate::graph::{EdgeId, Node, NodeId};

/// Decides whether a node lies in the region eligible for painting.
pub trait PaintedArea {
    fn contains(&self, node: &Node) -> bool;
}

impl<F> PaintedArea for F
where
    F: Fn(&Node) -> bool,
{
    fn contains(&self, node: &Node) -> bool {
        self(node)
    }
}

/// An infinite canvas: every node is eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl PaintedArea for Unbounded {
    fn contains(&self, _node: &Node) -> bool {
        true
    }
}

/// Axis-aligned region, inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl PaintedArea for Bounds {
    fn contains(&self, node: &Node) -> bool {
        let (x, y) = node.position();
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Painted-area test plus the bookkeeping of what is on the surface.
pub struct ViewportTracker {
    width: u32,
    height: u32,
    area: Box<dyn PaintedArea>,
    painted_nodes: IndexSet<NodeId>,
    painted_edges: IndexSet<EdgeId>,
}

impl ViewportTracker {
    /// Tracker for a surface of the given size over an unbounded canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            area: Box::new(Unbounded),
            painted_nodes: IndexSet::new(),
            painted_edges: IndexSet::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Install a new painted-area predicate.
    pub fn set_area(&mut self, area: impl PaintedArea + 'static) {
        self.area = Box::new(area);
    }

    pub fn is_in_painted_area(&self, node: &Node) -> bool {
        self.area.contains(node)
    }

    /// Record a node as painted. Returns `false` if it already was.
    pub fn mark_node_painted(&mut self, id: &NodeId) -> bool {
        self.painted_nodes.insert(id.clone())
    }

    pub fn mark_edge_painted(&mut self, id: &EdgeId) -> bool {
        self.painted_edges.insert(id.clone())
    }

    /// Drop a node from the painted set. Returns whether it was there.
    pub fn forget_node(&mut self, id: &NodeId) -> bool {
        self.painted_nodes.shift_remove(id)
    }

    pub fn forget_edge(&mut self, id: &EdgeId) -> bool {
        self.painted_edges.shift_remove(id)
    }

    pub fn is_node_painted(&self, id: &NodeId) -> bool {
        self.painted_nodes.contains(id)
    }

    pub fn is_edge_painted(&self, id: &EdgeId) -> bool {
        self.painted_edges.contains(id)
    }

    /// Painted nodes in the order they were first painted.
    pub fn painted_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.painted_nodes.iter()
    }

    pub fn painted_edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.painted_edges.iter()
    }

    pub fn painted_node_count(&self) -> usize {
        self.painted_nodes.len()
    }

    pub fn painted_edge_count(&self) -> usize {
        self.painted_edges.len()
    }

    /// Forget everything painted, as after a surface clear.
    pub fn clear(&mut self) {
        self.painted_nodes.clear();
        self.painted_edges.clear();
    }
}

impl std::fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("painted_nodes", &self.painted_nodes)
            .field("painted_edges", &self.painted_edges)
            .finish_non_exhaustive()
    }
}
