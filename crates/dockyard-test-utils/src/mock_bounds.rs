//! Recording bounds provider.

use dockyard::{BoundsMap, BoundsProvider, ElementId, Layout};
use dockyard_core::geometry::Rect;
use parking_lot::Mutex;

use crate::geometry::layout_bounds;

/// Bounds provider for tests.
///
/// Rectangles can be changed through `&self` between pointer events, and
/// every lookup is recorded so tests can check that geometry is re-queried
/// rather than cached.
#[derive(Debug, Default)]
pub struct MockBounds {
    rects: Mutex<BoundsMap>,
    queries: Mutex<Vec<ElementId>>,
}

impl MockBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles for every element of `layout` inside `root`.
    pub fn for_layout(layout: &Layout, root: Rect) -> Self {
        Self {
            rects: Mutex::new(layout_bounds(layout, root)),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with(self, element: ElementId, rect: Rect) -> Self {
        self.set(element, rect);
        self
    }

    pub fn set(&self, element: ElementId, rect: Rect) {
        self.rects.lock().insert(element, rect);
    }

    pub fn remove(&self, element: &ElementId) -> Option<Rect> {
        self.rects.lock().remove(element)
    }

    /// Replace every rectangle with a fresh layout pass.
    pub fn relayout(&self, layout: &Layout, root: Rect) {
        *self.rects.lock() = layout_bounds(layout, root);
    }

    /// Every query made so far, in order.
    pub fn queries(&self) -> Vec<ElementId> {
        self.queries.lock().clone()
    }

    pub fn count_queries(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn count_queries_for(&self, element: &ElementId) -> usize {
        self.queries.lock().iter().filter(|q| *q == element).count()
    }

    pub fn clear_queries(&self) {
        self.queries.lock().clear();
    }
}

impl BoundsProvider for MockBounds {
    fn rect_of(&self, element: &ElementId) -> Option<Rect> {
        self.queries.lock().push(element.clone());
        self.rects.lock().rect_of(element)
    }
}
