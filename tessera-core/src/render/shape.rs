//! Shapes handed to the drawing surface.
//!
//! Every shape is a snapshot of the entity it was built from, tagged with
//! the identity of that entity. The surface keys its membership on
//! [`ShapeId`], so re-adding a shape with the same id replaces the old
//! snapshot and raises it.

use crate::graph::{Edge, EdgeId, Line, Node, NodeId};
use crate::style::Color;

/// Identity of a shape on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Background,
    Node(NodeId),
    Edge(EdgeId),
    /// The text shape attached to an edge.
    Label(EdgeId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundShape {
    pub width: u32,
    pub height: u32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Color,
    /// Node name, present only when the node shows its text.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    pub id: EdgeId,
    pub line: Line,
    pub stroke: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelShape {
    pub edge: EdgeId,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Background(BackgroundShape),
    Node(NodeShape),
    Edge(EdgeShape),
    Label(LabelShape),
}

impl Shape {
    pub fn background(width: u32, height: u32, color: &Color) -> Self {
        Shape::Background(BackgroundShape {
            width,
            height,
            color: color.clone(),
        })
    }

    pub fn node(node: &Node) -> Self {
        Shape::Node(NodeShape {
            id: node.id().clone(),
            x: node.x(),
            y: node.y(),
            radius: node.radius(),
            fill: node.fill().clone(),
            text: node.text_visible().then(|| node.id().to_string()),
        })
    }

    pub fn edge(edge: &Edge) -> Self {
        Shape::Edge(EdgeShape {
            id: edge.id().clone(),
            line: edge.line(),
            stroke: edge.stroke().clone(),
            width: edge.width(),
        })
    }

    pub fn label(edge: &Edge) -> Self {
        let label = edge.label();
        Shape::Label(LabelShape {
            edge: edge.id().clone(),
            text: label.text.clone(),
            x: label.x,
            y: label.y,
        })
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Background(_) => ShapeId::Background,
            Shape::Node(shape) => ShapeId::Node(shape.id.clone()),
            Shape::Edge(shape) => ShapeId::Edge(shape.id.clone()),
            Shape::Label(shape) => ShapeId::Label(shape.edge.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::VisualStyle;

    #[test]
    fn node_text_follows_visibility() {
        let style = VisualStyle::default();
        let mut node = Node::new("a", 1.0, 2.0, &style);

        let Shape::Node(shape) = Shape::node(&node) else {
            panic!("expected a node shape");
        };
        assert_eq!(shape.text.as_deref(), Some("a"));

        node.set_text_visible(false);
        let Shape::Node(shape) = Shape::node(&node) else {
            panic!("expected a node shape");
        };
        assert_eq!(shape.text, None);
    }

    #[test]
    fn label_shares_edge_identity() {
        let style = VisualStyle::default();
        let a = Node::new("a", 0.0, 0.0, &style);
        let b = Node::new("b", 4.0, 8.0, &style);
        let edge = Edge::new("e", &a, &b, &style).with_label("uses");

        let label = Shape::label(&edge);
        assert_eq!(label.id(), ShapeId::Label("e".into()));
        assert_ne!(label.id(), Shape::edge(&edge).id());
        let Shape::Label(label) = label else {
            panic!("expected a label shape");
        };
        assert_eq!((label.x, label.y, label.text.as_str()), (2, 4, "uses"));
    }
}
