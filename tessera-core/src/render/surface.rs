//! Drawing Surface
//!
//! The surface is an external capability with three operations. Paint order
//! is insertion order: adding a shape that is already present raises it to
//! the top, and removing an absent shape does nothing.
//!
//! [`DisplayList`] is a retained implementation of that contract. Hosts can
//! walk it in paint order to rasterize, and its optional journal records
//! every call so the traffic of an incremental update can be inspected.

use indexmap::IndexMap;

use super::shape::{Shape, ShapeId};

/// Abstract drawing surface driven by the render sync engine.
pub trait Surface {
    /// Add `shape` on top of everything else, replacing any shape with the
    /// same id.
    fn add(&mut self, shape: Shape);

    /// Remove the shape with this id. No-op if absent.
    fn remove(&mut self, id: &ShapeId);

    /// Remove every shape.
    fn clear(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn add(&mut self, shape: Shape) {
        (**self).add(shape);
    }

    fn remove(&mut self, id: &ShapeId) {
        (**self).remove(id);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn add(&mut self, shape: Shape) {
        (**self).add(shape);
    }

    fn remove(&mut self, id: &ShapeId) {
        (**self).remove(id);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// One call made against a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Add(ShapeId),
    Remove(ShapeId),
    Clear,
}

/// Retained, ordered list of the shapes on a surface.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    shapes: IndexMap<ShapeId, Shape>,
    journal: Option<Vec<SurfaceOp>>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A display list that also records every call made against it.
    pub fn with_journal() -> Self {
        Self {
            shapes: IndexMap::new(),
            journal: Some(Vec::new()),
        }
    }

    /// Shapes from bottom to top.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Paint-order position of a shape, 0 being the bottom.
    pub fn z_index(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.get_index_of(id)
    }

    /// The topmost shape.
    pub fn top(&self) -> Option<&Shape> {
        self.shapes.last().map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Take the calls recorded since the last take. Empty without a journal.
    pub fn take_journal(&mut self) -> Vec<SurfaceOp> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn record(&mut self, op: SurfaceOp) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(op);
        }
    }
}

impl Surface for DisplayList {
    fn add(&mut self, shape: Shape) {
        let id = shape.id();
        self.record(SurfaceOp::Add(id.clone()));
        self.shapes.shift_remove(&id);
        self.shapes.insert(id, shape);
    }

    fn remove(&mut self, id: &ShapeId) {
        self.record(SurfaceOp::Remove(id.clone()));
        self.shapes.shift_remove(id);
    }

    fn clear(&mut self) {
        self.record(SurfaceOp::Clear);
        self.shapes.clear();
    }
}
