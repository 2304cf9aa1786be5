//! Diagram Graph
//!
//! This module holds the authoritative in-memory diagram: nodes and edges
//! keyed by their stable names, plus the adjacency index that maps each node
//! to its incident edges.
//!
//! # Overview
//!
//! - Nodes carry a position, radius, fill and display attributes.
//! - Edges join exactly two existing nodes and carry integer line geometry
//!   and a label placed at the midpoint of the two endpoints.
//! - The adjacency index is strictly derived: every edge insertion and
//!   removal updates both endpoints' entries in the same call.
//!
//! # Design Decisions
//!
//! 1. The model is a single owned aggregate. Viewport and selection
//!    bookkeeping refer to entities by id only and are pruned by their
//!    owner from the removal report the model returns.
//!
//! 2. Maps are insertion ordered so that full repaints, which walk them,
//!    produce the same draw order for the same input.

mod adjacency;
mod edge;
mod model;
mod node;

pub use adjacency::{AdjacencyIndex, EdgeList};
pub use edge::{midpoint, Edge, EdgeId, Label, Line};
pub use model::{GraphModel, NodeRemoval};
pub use node::{Node, NodeId};
