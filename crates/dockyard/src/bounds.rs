//! Geometry queries supplied by the rendering layer.

use dockyard_core::alloc::HashMap;
use dockyard_core::geometry::Rect;

use crate::id::{FloatId, GroupId, PanelId, TabId};
use crate::model::Edge;

/// Any element whose on-screen rectangle the engine may ask for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// The whole docking area.
    Root,
    Container(Edge),
    Float(FloatId),
    Group(GroupId),
    Panel(PanelId),
    Tab(TabId),
}

/// Supplies current on-screen rectangles.
///
/// Queried on every pointer move; implementations should not assume results
/// are cached. `None` means the element is not currently rendered.
pub trait BoundsProvider {
    fn rect_of(&self, element: &ElementId) -> Option<Rect>;
}

impl<F> BoundsProvider for F
where
    F: Fn(&ElementId) -> Option<Rect>,
{
    fn rect_of(&self, element: &ElementId) -> Option<Rect> {
        self(element)
    }
}

/// Rectangles captured once per frame by the host.
#[derive(Debug, Clone, Default)]
pub struct BoundsMap {
    rects: HashMap<ElementId, Rect>,
}

impl BoundsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: ElementId, rect: Rect) -> Option<Rect> {
        self.rects.insert(element, rect)
    }

    pub fn with(mut self, element: ElementId, rect: Rect) -> Self {
        self.rects.insert(element, rect);
        self
    }

    pub fn remove(&mut self, element: &ElementId) -> Option<Rect> {
        self.rects.remove(element)
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl BoundsProvider for BoundsMap {
    fn rect_of(&self, element: &ElementId) -> Option<Rect> {
        self.rects.get(element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_closure_providers() {
        let map = BoundsMap::new().with(ElementId::Root, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(map.rect_of(&ElementId::Root).map(|r| r.width), Some(800.0));
        assert!(map.rect_of(&ElementId::Container(Edge::Left)).is_none());

        let closure = |element: &ElementId| match element {
            ElementId::Root => Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            _ => None,
        };
        assert!(closure.rect_of(&ElementId::Root).is_some());
    }
}
