//! Graph Nodes
//!
//! This module defines the node entity that lives in the graph model.

use std::borrow::Borrow;

use indexmap::IndexMap;

use crate::style::{Color, VisualStyle};

/// Stable identity of a node: the name it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node in the diagram.
///
/// Positions are unbounded floating point and are only ever supplied by
/// update records or by user drags; the core never lays nodes out.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    x: f64,
    y: f64,

    radius: f64,

    /// Fill currently shown on the surface.
    fill: Color,

    /// Fill to restore once the node is deselected. `Some` only while a
    /// selection color is applied.
    original_fill: Option<Color>,

    text_visible: bool,

    /// Style-driven display attributes the core carries but never reads.
    attributes: IndexMap<String, String>,
}

impl Node {
    /// Create a node at the given position, styled with the defaults of `style`.
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64, style: &VisualStyle) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            radius: style.node_size,
            fill: style.node_fill_color.clone(),
            original_fill: None,
            text_visible: style.texts_visible,
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style fill override.
    pub fn with_fill(mut self, fill: impl Into<Color>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Get the node's ID.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Shift the node by a delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The fill currently shown, which is the selection color while selected.
    pub fn fill(&self) -> &Color {
        &self.fill
    }

    /// The node's own fill, regardless of selection.
    pub fn base_fill(&self) -> &Color {
        self.original_fill.as_ref().unwrap_or(&self.fill)
    }

    /// Change the node's own fill.
    ///
    /// While a selection color is applied the new value is stored as the
    /// color to restore, so the selection stays visible.
    pub fn set_fill(&mut self, fill: Color) {
        match self.original_fill.as_mut() {
            Some(original) => *original = fill,
            None => self.fill = fill,
        }
    }

    /// Whether a selection fill is currently applied.
    pub fn is_highlighted(&self) -> bool {
        self.original_fill.is_some()
    }

    /// Show `color` in place of the node's own fill. The first call stores
    /// the fill to restore; repeated calls keep that first value.
    pub fn highlight(&mut self, color: &Color) {
        if self.original_fill.is_none() {
            self.original_fill = Some(std::mem::replace(&mut self.fill, color.clone()));
        } else {
            self.fill = color.clone();
        }
    }

    /// Restore the fill stored by [`Node::highlight`]. No-op when not highlighted.
    pub fn unhighlight(&mut self) {
        if let Some(original) = self.original_fill.take() {
            self.fill = original;
        }
    }

    pub fn text_visible(&self) -> bool {
        self.text_visible
    }

    pub fn set_text_visible(&mut self, visible: bool) {
        self.text_visible = visible;
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}
