//! Synthetic rectangles for a layout, standing in for a renderer.
//!
//! Left and right containers span the full root height and are as wide as
//! their widest group; top and bottom containers span the full root width.
//! Groups stack along their container's edge, panels stack along their
//! group's resize axis, and tabs sit left to right in each panel's tab bar.

use dockyard::config::DEFAULT_TAB_BAR_HEIGHT;
use dockyard::model::{Axis, Edge, PanelGroup};
use dockyard::{BoundsMap, ElementId, Layout};
use dockyard_core::geometry::Rect;

/// Width given to every tab header.
pub const TAB_WIDTH: f32 = 80.0;

/// Rectangles for every element of `layout` laid out inside `root`.
pub fn layout_bounds(layout: &Layout, root: Rect) -> BoundsMap {
    let mut map = BoundsMap::new().with(ElementId::Root, root);

    for container in layout.containers.iter() {
        if container.groups.is_empty() {
            continue;
        }
        let edge = container.edge;
        let vertical = edge.stacking_axis() == Axis::Vertical;
        let thickness = container
            .groups
            .iter()
            .map(|g| if vertical { g.width } else { g.height })
            .fold(0.0, f32::max);
        let area = match edge {
            Edge::Left => Rect::new(root.x, root.y, thickness, root.height),
            Edge::Right => Rect::new(root.right() - thickness, root.y, thickness, root.height),
            Edge::Top => Rect::new(root.x, root.y, root.width, thickness),
            Edge::Bottom => Rect::new(root.x, root.bottom() - thickness, root.width, thickness),
        };
        map.insert(ElementId::Container(edge), area);

        let mut cursor = if vertical { area.y } else { area.x };
        for group in &container.groups {
            let rect = if vertical {
                Rect::new(area.x, cursor, thickness, group.height)
            } else {
                Rect::new(cursor, area.y, group.width, thickness)
            };
            cursor += if vertical { group.height } else { group.width };
            place_group(&mut map, group, rect);
        }
    }

    for window in &layout.floating {
        let size = window.size();
        map.insert(
            ElementId::Float(window.id.clone()),
            Rect::new(window.x, window.y, size.width, size.height),
        );
        let mut y = window.y;
        for group in &window.groups {
            place_group(&mut map, group, Rect::new(window.x, y, group.width, group.height));
            y += group.height;
        }
    }

    map
}

fn place_group(map: &mut BoundsMap, group: &PanelGroup, rect: Rect) {
    map.insert(ElementId::Group(group.id.clone()), rect);

    let axis = group.direction.resize_axis();
    let mut cursor = match axis {
        Axis::Vertical => rect.y,
        Axis::Horizontal => rect.x,
    };
    for panel in &group.panels {
        let panel_rect = match axis {
            Axis::Vertical => Rect::new(rect.x, cursor, rect.width, panel.height),
            Axis::Horizontal => Rect::new(cursor, rect.y, panel.width, rect.height),
        };
        cursor += panel.extent(axis);
        map.insert(ElementId::Panel(panel.id.clone()), panel_rect);

        for (index, tab) in panel.tabs.iter().enumerate() {
            map.insert(
                ElementId::Tab(tab.id.clone()),
                Rect::new(
                    panel_rect.x + index as f32 * TAB_WIDTH,
                    panel_rect.y,
                    TAB_WIDTH,
                    DEFAULT_TAB_BAR_HEIGHT,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use dockyard::{BoundsProvider, GroupId, PanelId, TabId};

    #[test]
    fn test_ide_layout_geometry() {
        let layout = fixtures::ide_layout();
        let bounds = layout_bounds(&layout, Rect::new(0.0, 0.0, 1200.0, 800.0));

        assert_eq!(
            bounds.rect_of(&ElementId::Group(GroupId::new("explorer"))),
            Some(Rect::new(0.0, 0.0, 250.0, 600.0))
        );
        assert_eq!(
            bounds.rect_of(&ElementId::Panel(PanelId::new("outline"))),
            Some(Rect::new(0.0, 300.0, 250.0, 300.0))
        );
        assert_eq!(
            bounds.rect_of(&ElementId::Tab(TabId::new("git-tab"))),
            Some(Rect::new(TAB_WIDTH, 0.0, TAB_WIDTH, DEFAULT_TAB_BAR_HEIGHT))
        );
        assert_eq!(
            bounds.rect_of(&ElementId::Container(Edge::Bottom)).map(|r| r.y),
            Some(600.0)
        );
    }
}
