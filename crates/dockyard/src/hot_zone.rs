//! Hot-zone detection during a drag.
//!
//! A pointer position resolves to at most one zone, tried in priority order:
//!
//! 1. A panel's tab bar (floating panels first, frontmost first)
//! 2. The outer edge of the docking area
//! 3. The edge of an already docked group or panel
//!
//! Anything else is empty space. Geometry comes from a [`BoundsProvider`]
//! on every call and is never cached.

use dockyard_core::geometry::{Rect, Size};
use dockyard_core::math::Vec2;
use dockyard_core::profiling::profile_function;

use crate::bounds::{BoundsProvider, ElementId};
use crate::config::DockConfig;
use crate::drag::DragPayload;
use crate::id::{FloatId, GroupId, PanelId};
use crate::model::{Axis, Edge, Layout, Panel, PanelGroup};

/// A resolved drop target.
#[derive(Debug, Clone, PartialEq)]
pub enum HotZone {
    /// Pointer is over a panel's tab bar. `insert_index` is `None` when the
    /// drop would leave a tab where it already is.
    TabBar {
        panel: PanelId,
        insert_index: Option<usize>,
    },
    /// Pointer is near an outer edge; the payload docks as a new group.
    ContainerEdge {
        edge: Edge,
        insert_index: usize,
        preview: Rect,
    },
    /// Pointer is near the leading or trailing edge of a docked group; the
    /// payload docks as a new group next to it.
    GroupEdge {
        edge: Edge,
        group: GroupId,
        insert_index: usize,
        preview: Rect,
    },
    /// Pointer is near an interior edge of a docked panel; the payload joins
    /// that panel's group.
    PanelEdge {
        group: GroupId,
        panel: PanelId,
        insert_index: usize,
        preview: Rect,
    },
}

impl HotZone {
    /// Whether both zones point at the same element, ignoring insertion
    /// index and preview.
    pub fn same_target(&self, other: &HotZone) -> bool {
        match (self, other) {
            (HotZone::TabBar { panel: a, .. }, HotZone::TabBar { panel: b, .. }) => a == b,
            (HotZone::ContainerEdge { edge: a, .. }, HotZone::ContainerEdge { edge: b, .. }) => a == b,
            (HotZone::GroupEdge { group: a, .. }, HotZone::GroupEdge { group: b, .. }) => a == b,
            (HotZone::PanelEdge { panel: a, .. }, HotZone::PanelEdge { panel: b, .. }) => a == b,
            _ => false,
        }
    }

    pub fn preview(&self) -> Option<Rect> {
        match self {
            HotZone::TabBar { .. } => None,
            HotZone::ContainerEdge { preview, .. }
            | HotZone::GroupEdge { preview, .. }
            | HotZone::PanelEdge { preview, .. } => Some(*preview),
        }
    }
}

/// What the resolver must not hit: the dragged element itself and the
/// floating window following the pointer.
#[derive(Debug, Clone, Copy)]
pub struct DragExclusion<'a> {
    pub payload: &'a DragPayload,
    pub lifted: Option<&'a FloatId>,
}

impl DragExclusion<'_> {
    fn skips_panel(&self, panel: &Panel, group: &PanelGroup) -> bool {
        match self.payload {
            DragPayload::Panel(id) => &panel.id == id,
            DragPayload::Group(id) => &group.id == id,
            DragPayload::Tab(_) => false,
        }
    }

    fn skips_group(&self, group: &PanelGroup) -> bool {
        match self.payload {
            DragPayload::Group(id) => &group.id == id,
            DragPayload::Panel(id) => group.panels.len() == 1 && &group.panels[0].id == id,
            DragPayload::Tab(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HotZoneResolver {
    pub hot_zone_size: f32,
    pub edge_zone_size: f32,
    pub tab_bar_height: f32,
    /// Preview thickness for container docks when the container has no rect.
    pub default_panel_size: Size,
}

impl Default for HotZoneResolver {
    fn default() -> Self {
        Self::from_config(&DockConfig::default())
    }
}

impl HotZoneResolver {
    pub fn from_config(config: &DockConfig) -> Self {
        Self {
            hot_zone_size: config.hot_zone_size,
            edge_zone_size: config.edge_zone_size,
            tab_bar_height: config.tab_bar_height,
            default_panel_size: config.default_panel_size,
        }
    }

    /// Resolve `pointer` to a hot zone, or `None` for empty space.
    pub fn resolve(
        &self,
        layout: &Layout,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        exclusion: DragExclusion<'_>,
    ) -> Option<HotZone> {
        profile_function!();

        self.tab_bar(layout, bounds, pointer, exclusion)
            .or_else(|| self.container_edge(layout, bounds, pointer, exclusion))
            .or_else(|| self.docked_edge(layout, bounds, pointer, exclusion))
    }

    fn tab_bar(
        &self,
        layout: &Layout,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        exclusion: DragExclusion<'_>,
    ) -> Option<HotZone> {
        let floating = layout
            .floating_by_z()
            .into_iter()
            .filter(|f| Some(&f.id) != exclusion.lifted)
            .flat_map(|f| f.groups.iter());
        let docked = layout.containers.iter().flat_map(|c| c.groups.iter());

        for group in floating.chain(docked) {
            for panel in &group.panels {
                if exclusion.skips_panel(panel, group) {
                    continue;
                }
                let Some(rect) = bounds.rect_of(&ElementId::Panel(panel.id.clone())) else {
                    continue;
                };
                let band = Rect::new(rect.x, rect.y, rect.width, self.tab_bar_height);
                if band.contains(pointer) {
                    let insert_index = self.tab_insert_index(panel, bounds, pointer, exclusion);
                    return Some(HotZone::TabBar {
                        panel: panel.id.clone(),
                        insert_index,
                    });
                }
            }
        }
        None
    }

    fn tab_insert_index(
        &self,
        panel: &Panel,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        exclusion: DragExclusion<'_>,
    ) -> Option<usize> {
        let index = panel
            .tabs
            .iter()
            .position(|tab| {
                bounds
                    .rect_of(&ElementId::Tab(tab.id.clone()))
                    .is_some_and(|r| r.center_x() > pointer.x)
            })
            .unwrap_or(panel.tabs.len());

        if let DragPayload::Tab(tab) = exclusion.payload
            && let Some(source) = panel.tab_index(tab)
            && (index == source || index == source + 1)
        {
            return None;
        }
        Some(index)
    }

    fn container_edge(
        &self,
        layout: &Layout,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        exclusion: DragExclusion<'_>,
    ) -> Option<HotZone> {
        let root = bounds.rect_of(&ElementId::Root)?;
        if !root.contains(pointer) {
            return None;
        }

        let edge = Edge::ALL.into_iter().find(|edge| match edge {
            Edge::Left => pointer.x - root.left() < self.hot_zone_size,
            Edge::Right => root.right() - pointer.x < self.hot_zone_size,
            Edge::Top => pointer.y - root.top() < self.hot_zone_size,
            Edge::Bottom => root.bottom() - pointer.y < self.hot_zone_size,
        })?;

        let groups = &layout.container(edge).groups;
        let docked = groups.iter().filter(|g| !exclusion.skips_group(g)).count();
        let preview = self.container_preview(bounds, root, edge, docked);
        // Insertion points index the live group list, which still holds the
        // dragged group when it was docked here.
        Some(HotZone::ContainerEdge {
            edge,
            insert_index: groups.len(),
            preview,
        })
    }

    /// Where a new group appended to `edge` would sit: one share of the
    /// edge's extent, split between `docked + 1` groups.
    fn container_preview(&self, bounds: &dyn BoundsProvider, root: Rect, edge: Edge, docked: usize) -> Rect {
        let slots = (docked + 1) as f32;
        let thickness = bounds
            .rect_of(&ElementId::Container(edge))
            .filter(|r| !r.is_empty())
            .map(|r| match edge.stacking_axis() {
                Axis::Vertical => r.width,
                Axis::Horizontal => r.height,
            })
            .unwrap_or(match edge.stacking_axis() {
                Axis::Vertical => self.default_panel_size.width,
                Axis::Horizontal => self.default_panel_size.height,
            });

        match edge {
            Edge::Left | Edge::Right => {
                let share = root.height / slots;
                let x = if edge == Edge::Left { root.left() } else { root.right() - thickness };
                Rect::new(x, root.top() + share * docked as f32, thickness, share)
            }
            Edge::Top | Edge::Bottom => {
                let share = root.width / slots;
                let y = if edge == Edge::Top { root.top() } else { root.bottom() - thickness };
                Rect::new(root.left() + share * docked as f32, y, share, thickness)
            }
        }
    }

    fn docked_edge(
        &self,
        layout: &Layout,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        exclusion: DragExclusion<'_>,
    ) -> Option<HotZone> {
        for container in layout.containers.iter() {
            let axis = container.edge.stacking_axis();
            for (group_index, group) in container.groups.iter().enumerate() {
                if exclusion.skips_group(group) {
                    continue;
                }
                let Some(rect) = bounds.rect_of(&ElementId::Group(group.id.clone())) else {
                    continue;
                };
                if let Some((after, preview)) = self.near_edge(rect, axis, pointer) {
                    return Some(HotZone::GroupEdge {
                        edge: container.edge,
                        group: group.id.clone(),
                        insert_index: group_index + usize::from(after),
                        preview,
                    });
                }
                if !rect.contains(pointer) {
                    continue;
                }
                for (panel_index, panel) in group.panels.iter().enumerate() {
                    if exclusion.skips_panel(panel, group) {
                        continue;
                    }
                    let Some(panel_rect) = bounds.rect_of(&ElementId::Panel(panel.id.clone())) else {
                        continue;
                    };
                    if let Some((after, preview)) = self.near_edge(panel_rect, axis, pointer) {
                        return Some(HotZone::PanelEdge {
                            group: group.id.clone(),
                            panel: panel.id.clone(),
                            insert_index: panel_index + usize::from(after),
                            preview,
                        });
                    }
                }
            }
        }
        None
    }

    /// Whether `pointer` is within the edge zone of `rect`'s leading or
    /// trailing edge along `axis`. Returns `true` for the trailing edge,
    /// plus the half of `rect` a drop there would occupy.
    fn near_edge(&self, rect: Rect, axis: Axis, pointer: Vec2) -> Option<(bool, Rect)> {
        match axis {
            Axis::Vertical => {
                if pointer.x < rect.left() || pointer.x >= rect.right() {
                    return None;
                }
                let half = rect.height / 2.0;
                if (pointer.y - rect.top()).abs() <= self.edge_zone_size {
                    Some((false, Rect::new(rect.x, rect.y, rect.width, half)))
                } else if (pointer.y - rect.bottom()).abs() <= self.edge_zone_size {
                    Some((true, Rect::new(rect.x, rect.y + half, rect.width, half)))
                } else {
                    None
                }
            }
            Axis::Horizontal => {
                if pointer.y < rect.top() || pointer.y >= rect.bottom() {
                    return None;
                }
                let half = rect.width / 2.0;
                if (pointer.x - rect.left()).abs() <= self.edge_zone_size {
                    Some((false, Rect::new(rect.x, rect.y, half, rect.height)))
                } else if (pointer.x - rect.right()).abs() <= self.edge_zone_size {
                    Some((true, Rect::new(rect.x + half, rect.y, half, rect.height)))
                } else {
                    None
                }
            }
        }
    }
}

/// Remembers the active zone so switching zones reports a leave and an enter.
#[derive(Debug, Clone, Default)]
pub struct HotZoneTracker {
    current: Option<HotZone>,
}

/// Change produced by [`HotZoneTracker::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTransition {
    pub left: Option<HotZone>,
    pub entered: Option<HotZone>,
}

impl HotZoneTracker {
    pub fn current(&self) -> Option<&HotZone> {
        self.current.as_ref()
    }

    /// Record the zone under the pointer. Moving within the same target only
    /// refreshes the stored zone.
    pub fn update(&mut self, next: Option<HotZone>) -> ZoneTransition {
        let same = match (&self.current, &next) {
            (Some(a), Some(b)) => a.same_target(b),
            (None, None) => true,
            _ => false,
        };
        if same {
            self.current = next;
            return ZoneTransition::default();
        }
        let left = std::mem::replace(&mut self.current, next.clone());
        ZoneTransition { left, entered: next }
    }

    pub fn clear(&mut self) -> Option<HotZone> {
        self.current.take()
    }
}
