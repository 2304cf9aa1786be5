//! Visual Style
//!
//! The style object is read-only from the core's point of view. It carries
//! the handful of parameters the core needs to materialize shapes: colors
//! for the background and selections, the node radius, default colors for
//! entities whose records do not name one, and whether labels are drawn.
//!
//! Anything richer (fonts, dash patterns, gradients) belongs to the drawing
//! surface and never passes through here.

use serde::{Deserialize, Serialize};

/// An opaque color value, compared byte-for-byte.
///
/// The core never interprets colors; it only stores, swaps and restores
/// them, so any CSS-like string the surface understands is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style parameters consumed by the render and selection paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualStyle {
    /// Fill and stroke of the background rectangle.
    pub background_color: Color,
    /// Fill applied to a node while it is selected.
    pub node_selection_color: Color,
    /// Stroke applied to an edge while it is selected.
    pub edge_selection_color: Color,
    /// Fill for nodes whose record carries no color.
    pub node_fill_color: Color,
    /// Stroke for edges whose record carries no color.
    pub edge_color: Color,
    /// Stroke width for edges whose record carries no width.
    pub edge_width: f64,
    /// Radius applied to every node.
    pub node_size: f64,
    /// Whether node names and edge labels are drawn.
    pub texts_visible: bool,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from("#ffffff"),
            node_selection_color: Color::from("#ff0000"),
            edge_selection_color: Color::from("#ff0000"),
            node_fill_color: Color::from("#3399ff"),
            edge_color: Color::from("#888888"),
            edge_width: 1.0,
            node_size: 10.0,
            texts_visible: true,
        }
    }
}
