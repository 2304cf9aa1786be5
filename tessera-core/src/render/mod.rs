//! Rendering
//!
//! This module turns model state into shapes on an abstract drawing surface
//! and keeps that surface in step with the model using minimal add/remove
//! traffic.
//!
//! - `shape`: the tagged drawable primitives and their identities
//! - `surface`: the surface contract and a retained display list
//! - `sync`: the repaint engine (full paint, subset paint, incremental
//!   edge updates and viewport translation)

mod shape;
mod surface;
mod sync;

pub use shape::{BackgroundShape, EdgeShape, LabelShape, NodeShape, Shape, ShapeId};
pub use surface::{DisplayList, Surface, SurfaceOp};
pub use sync::RenderSync;
