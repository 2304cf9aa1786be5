//! Tessera Core
//!
//! This crate provides the state-and-rendering core of an interactive
//! node/edge diagram editor. It implements:
//!
//! - The authoritative graph model (nodes, edges, adjacency index)
//! - Ingestion of snapshot and partial update messages
//! - Viewport and painted-shape bookkeeping
//! - Node and edge selection
//! - An incremental repaint engine driving an abstract drawing surface
//!
//! Pixel drawing, transport of update messages, input decoding and layout
//! all live outside this crate.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Nodes, edges and the adjacency index, owned by `GraphModel`
//! - `ingest`: Update messages and their translation into model mutations
//! - `viewport`: Painted-area predicate and painted-shape bookkeeping
//! - `selection`: Selected-node and selected-edge sets
//! - `render`: Shapes, the surface contract and the repaint engine
//! - `view`: `GraphView`, the aggregate exposing user-event entry points
//!
//! Data flows ingest → model → render → surface. User moves and selections
//! go straight to the model or selection, then to render.
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{DisplayList, GraphView, UpdateMessage, UpdateRecord, ViewConfig};
//!
//! let mut view = GraphView::new(ViewConfig::default(), DisplayList::new());
//! view.repaint_graph(&UpdateMessage::new(vec![UpdateRecord::edge("e1", "a", "b")]));
//!
//! view.move_node(&"a".into(), 5.0, 3.0).unwrap();
//! assert_eq!(view.model().edge(&"e1".into()).unwrap().line().x1, 5);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod render;
pub mod selection;
pub mod style;
pub mod view;
pub mod viewport;

pub use config::ViewConfig;
pub use error::{Endpoint, GraphError, Result};
pub use graph::{Edge, EdgeId, GraphModel, Node, NodeId};
pub use ingest::{UpdateIngestor, UpdateMessage, UpdateRecord};
pub use render::{DisplayList, RenderSync, Shape, ShapeId, Surface};
pub use selection::SelectionManager;
pub use style::{Color, VisualStyle};
pub use view::GraphView;
pub use viewport::{Bounds, PaintedArea, Unbounded, ViewportTracker};
