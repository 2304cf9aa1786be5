//! Graph Edges
//!
//! An edge joins exactly two nodes. The order of the endpoints matters only
//! for which end of the line a node drives (`x1/y1` for the first node,
//! `x2/y2` for the second); for display the edge is undirected.
//!
//! Line and label coordinates are integers: node positions are truncated
//! toward zero when copied onto the edge.

use std::borrow::Borrow;

use indexmap::IndexMap;

use super::node::{Node, NodeId};
use crate::error::Endpoint;
use crate::style::{Color, VisualStyle};

/// Stable identity of an edge: the name it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for EdgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer line geometry of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Text shape attached to an edge, drawn at the midpoint of its endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Truncated average of two coordinates: the sum is truncated toward zero
/// first, then halved with integer division.
pub fn midpoint(a: f64, b: f64) -> i32 {
    (a + b) as i32 / 2
}

/// An edge in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    first: NodeId,
    second: NodeId,
    line: Line,

    stroke: Color,
    /// Stroke to restore once the edge is deselected.
    original_stroke: Option<Color>,
    width: f64,

    label: Label,
    attributes: IndexMap<String, String>,
}

impl Edge {
    /// Create an edge between two existing nodes, taking its geometry from
    /// their current positions.
    pub fn new(id: impl Into<EdgeId>, first: &Node, second: &Node, style: &VisualStyle) -> Self {
        let mut edge = Self {
            id: id.into(),
            first: first.id().clone(),
            second: second.id().clone(),
            line: Line::default(),
            stroke: style.edge_color.clone(),
            original_stroke: None,
            width: style.edge_width,
            label: Label::default(),
            attributes: IndexMap::new(),
        };
        edge.set_endpoint(Endpoint::First, first.x(), first.y());
        edge.set_endpoint(Endpoint::Second, second.x(), second.y());
        edge.recenter_label(first.position(), second.position());
        edge
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label.text = text.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Color>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn first(&self) -> &NodeId {
        &self.first
    }

    pub fn second(&self) -> &NodeId {
        &self.second
    }

    /// Get the node at the given end.
    pub fn node(&self, endpoint: Endpoint) -> &NodeId {
        match endpoint {
            Endpoint::First => &self.first,
            Endpoint::Second => &self.second,
        }
    }

    /// Whether `node` is one of this edge's endpoints.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.first == node || &self.second == node
    }

    /// The endpoint opposite `node`. For a self-loop this is `node` itself.
    pub fn opposite(&self, node: &NodeId) -> &NodeId {
        if &self.first == node {
            &self.second
        } else {
            &self.first
        }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    /// Move one end of the line to a node position.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, x: f64, y: f64) {
        match endpoint {
            Endpoint::First => {
                self.line.x1 = x as i32;
                self.line.y1 = y as i32;
            }
            Endpoint::Second => {
                self.line.x2 = x as i32;
                self.line.y2 = y as i32;
            }
        }
    }

    /// Place the label at the midpoint of both endpoint positions, each axis
    /// averaged independently.
    pub fn recenter_label(&mut self, first: (f64, f64), second: (f64, f64)) {
        self.label.x = midpoint(first.0, second.0);
        self.label.y = midpoint(first.1, second.1);
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.label.text = text.into();
    }

    pub fn stroke(&self) -> &Color {
        &self.stroke
    }

    pub fn base_stroke(&self) -> &Color {
        self.original_stroke.as_ref().unwrap_or(&self.stroke)
    }

    /// Change the edge's own stroke, keeping a selection color in front of it.
    pub fn set_stroke(&mut self, stroke: Color) {
        match self.original_stroke.as_mut() {
            Some(original) => *original = stroke,
            None => self.stroke = stroke,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.original_stroke.is_some()
    }

    pub fn highlight(&mut self, color: &Color) {
        if self.original_stroke.is_none() {
            self.original_stroke = Some(std::mem::replace(&mut self.stroke, color.clone()));
        } else {
            self.stroke = color.clone();
        }
    }

    pub fn unhighlight(&mut self) {
        if let Some(original) = self.original_stroke.take() {
            self.stroke = original;
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}
