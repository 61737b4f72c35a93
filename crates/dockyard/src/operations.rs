//! Mutation engine: every structural change to the layout tree.
//!
//! Each operation resolves all ids before the first write, so a failed
//! operation leaves the tree untouched. Nodes emptied by a move are removed
//! afterwards, cascading panel -> group -> floating window. Containers are
//! never removed.

use dockyard_core::geometry::{Rect, Size};
use dockyard_core::math::Vec2;

use crate::context::DockingContext;
use crate::error::{DockError, DockResult};
use crate::id::{FloatId, GroupId, PanelId, TabId};
use crate::locate::{GroupLocation, PanelLocation, TabLocation};
use crate::model::{Axis, Direction, Edge, FloatingWindow, Layout, Panel, PanelGroup, RootRef, Tab};

/// Result of [`Layout::resize_panel_with_adjacent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentResize {
    /// New extent of the resized panel on the group's resize axis.
    pub panel: f32,
    /// New extent of the next sibling, when one took part.
    pub neighbor: Option<f32>,
}

/// A structural change, as chosen by a drop commit.
#[derive(Debug, Clone, PartialEq)]
pub enum DockOperation {
    MoveToGroup {
        panel: PanelId,
        group: GroupId,
        index: usize,
    },
    CreateGroupInContainer {
        panel: PanelId,
        edge: Edge,
        index: usize,
        direction: Direction,
    },
    CreateFloatWindow {
        panel: PanelId,
        origin: Vec2,
        size: Option<Size>,
    },
    MoveFloatWindow {
        float: FloatId,
        origin: Vec2,
    },
    CreatePanelFromTab {
        tab: TabId,
        group: GroupId,
        index: usize,
    },
    CreateGroupFromTab {
        tab: TabId,
        edge: Edge,
        index: usize,
        direction: Direction,
    },
    CreateFloatWindowFromTab {
        tab: TabId,
        origin: Vec2,
        size: Option<Size>,
    },
    InsertTabToPanel {
        tab: TabId,
        panel: PanelId,
        index: usize,
    },
    MergePanelTabsToPanel {
        source: PanelId,
        target: PanelId,
        index: usize,
    },
    MoveGroupToContainer {
        group: GroupId,
        edge: Edge,
        index: usize,
    },
    CreateFloatWindowFromGroup {
        group: GroupId,
        origin: Vec2,
        size: Option<Size>,
    },
    MergeGroupIntoPanel {
        group: GroupId,
        panel: PanelId,
        index: usize,
    },
    MergeGroupIntoGroup {
        group: GroupId,
        target: GroupId,
        index: usize,
    },
}

impl DockOperation {
    /// Apply the operation to `layout`.
    pub fn apply(&self, layout: &mut Layout, ctx: &mut DockingContext) -> DockResult<()> {
        match self {
            DockOperation::MoveToGroup { panel, group, index } => {
                layout.move_to_group(panel, group, *index)
            }
            DockOperation::CreateGroupInContainer {
                panel,
                edge,
                index,
                direction,
            } => layout
                .create_group_in_container(ctx, panel, *edge, *index, *direction)
                .map(drop),
            DockOperation::CreateFloatWindow {
                panel,
                origin,
                size,
            } => layout.create_float_window(ctx, panel, *origin, *size).map(drop),
            DockOperation::MoveFloatWindow { float, origin } => {
                layout.move_float_window(float, origin.x, origin.y)
            }
            DockOperation::CreatePanelFromTab { tab, group, index } => layout
                .create_panel_from_tab(ctx, tab, group, *index)
                .map(drop),
            DockOperation::CreateGroupFromTab {
                tab,
                edge,
                index,
                direction,
            } => layout
                .create_group_from_tab(ctx, tab, *edge, *index, *direction)
                .map(drop),
            DockOperation::CreateFloatWindowFromTab { tab, origin, size } => layout
                .create_float_window_from_tab(ctx, tab, *origin, *size)
                .map(drop),
            DockOperation::InsertTabToPanel { tab, panel, index } => {
                layout.insert_tab_to_panel(tab, panel, *index)
            }
            DockOperation::MergePanelTabsToPanel {
                source,
                target,
                index,
            } => layout.merge_panel_tabs_to_panel(source, target, *index),
            DockOperation::MoveGroupToContainer { group, edge, index } => {
                layout.move_group_to_container(group, *edge, *index)
            }
            DockOperation::CreateFloatWindowFromGroup {
                group,
                origin,
                size,
            } => layout
                .create_float_window_from_group(ctx, group, *origin, *size)
                .map(drop),
            DockOperation::MergeGroupIntoPanel {
                group,
                panel,
                index,
            } => layout.merge_group_into_panel(group, panel, *index),
            DockOperation::MergeGroupIntoGroup {
                group,
                target,
                index,
            } => layout.merge_group_into_group(group, target, *index),
        }
    }

    /// The edge this operation docks into, if any.
    pub fn docked_edge(&self) -> Option<Edge> {
        match self {
            DockOperation::CreateGroupInContainer { edge, .. }
            | DockOperation::CreateGroupFromTab { edge, .. }
            | DockOperation::MoveGroupToContainer { edge, .. } => Some(*edge),
            _ => None,
        }
    }
}

/// Target index for moving an item from `from` to insertion point `to`
/// within the same list, or `None` when the item would not move.
/// The source's own size, or the configured default when it has none.
fn float_size(ctx: &DockingContext, width: f32, height: f32) -> Size {
    if width > 0.0 && height > 0.0 {
        Size::new(width, height)
    } else {
        ctx.default_float_size
    }
}

fn reorder_index(from: usize, to: usize) -> Option<usize> {
    if to == from || to == from + 1 {
        return None;
    }
    Some(if to > from { to - 1 } else { to })
}

impl Layout {
    fn locate_or_err(&self, panel: &PanelId) -> DockResult<PanelLocation> {
        self.locate(panel)
            .ok_or_else(|| DockError::PanelNotFound(panel.clone()))
    }

    fn locate_tab_or_err(&self, tab: &TabId) -> DockResult<TabLocation> {
        self.locate_tab(tab)
            .ok_or_else(|| DockError::TabNotFound(tab.clone()))
    }

    fn locate_group_or_err(&self, group: &GroupId) -> DockResult<GroupLocation> {
        self.locate_group(group)
            .ok_or_else(|| DockError::GroupNotFound(group.clone()))
    }

    fn group_or_err(&mut self, group: &GroupId) -> DockResult<&mut PanelGroup> {
        self.group_mut(group)
            .ok_or_else(|| DockError::GroupNotFound(group.clone()))
    }

    fn panel_or_err(&mut self, panel: &PanelId) -> DockResult<&mut Panel> {
        self.panel_mut(panel)
            .ok_or_else(|| DockError::PanelNotFound(panel.clone()))
    }

    /// Remove a panel from its group without cascading.
    fn take_panel(&mut self, loc: &PanelLocation) -> DockResult<Panel> {
        let group = self.group_or_err(&loc.group_id)?;
        if loc.panel_index >= group.panels.len() {
            return Err(DockError::InvalidTarget(format!(
                "panel index {} out of range in group `{}`",
                loc.panel_index, loc.group_id
            )));
        }
        Ok(group.panels.remove(loc.panel_index))
    }

    /// Remove a tab from its panel without cascading.
    fn take_tab(&mut self, loc: &TabLocation) -> DockResult<Tab> {
        let panel = self.panel_or_err(&loc.panel_id)?;
        if loc.tab_index >= panel.tabs.len() {
            return Err(DockError::InvalidTarget(format!(
                "tab index {} out of range in panel `{}`",
                loc.tab_index, loc.panel_id
            )));
        }
        let tab = panel.tabs.remove(loc.tab_index);
        panel.repair_active_tab(&tab.id, loc.tab_index);
        Ok(tab)
    }

    /// Remove a group from its root without cascading.
    fn take_group(&mut self, loc: &GroupLocation) -> DockResult<PanelGroup> {
        let groups = self
            .root_groups_mut(&loc.root)
            .ok_or_else(|| DockError::GroupNotFound(loc.group_id.clone()))?;
        if loc.group_index >= groups.len() {
            return Err(DockError::GroupNotFound(loc.group_id.clone()));
        }
        Ok(groups.remove(loc.group_index))
    }

    /// Drop tab-less panels from `group`, then the group if it is empty, then
    /// its floating window if that is empty too.
    fn cascade_empty(&mut self, root: &RootRef, group: &GroupId) {
        if let Some(g) = self.group_mut(group) {
            g.panels.retain(|p| !p.tabs.is_empty());
        }
        self.cascade_empty_root(root);
    }

    fn cascade_empty_root(&mut self, root: &RootRef) {
        if let Some(groups) = self.root_groups_mut(root) {
            groups.retain(|g| !g.panels.is_empty());
        }
        if let RootRef::Float(id) = root {
            let emptied = self.floating_window(id).is_some_and(|f| f.groups.is_empty());
            if emptied {
                self.floating.retain(|f| &f.id != id);
                tracing::debug!(float = %id, "removed empty floating window");
            }
        }
    }

    /// Build a single-panel panel around a detached tab, inheriting the
    /// source panel's original size and constraints.
    fn panel_for_tab(&self, ctx: &mut DockingContext, loc: &TabLocation) -> DockResult<Panel> {
        let source = self
            .panel(&loc.panel_id)
            .ok_or_else(|| DockError::PanelNotFound(loc.panel_id.clone()))?;
        let tab = source
            .tabs
            .get(loc.tab_index)
            .ok_or_else(|| {
                DockError::InvalidTarget(format!(
                    "tab index {} out of range in panel `{}`",
                    loc.tab_index, loc.panel_id
                ))
            })?;
        let original = source.original();
        let mut panel = Panel::new(ctx.new_panel_id(self), tab.title.clone())
            .size(original.width, original.height)
            .constraints(source.constraints);
        panel.original_size = Some(original);
        Ok(panel)
    }

    fn insert_float(
        &mut self,
        ctx: &mut DockingContext,
        group: PanelGroup,
        origin: Vec2,
    ) -> FloatId {
        let id = ctx.new_float_id(self);
        let window = FloatingWindow {
            id: id.clone(),
            x: origin.x,
            y: origin.y,
            z_index: ctx.next_z_index(),
            groups: vec![group],
        };
        tracing::debug!(float = %id, z = window.z_index, "created floating window");
        self.floating.push(window);
        id
    }

    /// Move a panel into `target` at insertion point `index`.
    ///
    /// Within the same group the index is an insertion point: moving forward
    /// lands one slot earlier to account for the removed panel.
    pub fn move_to_group(&mut self, panel: &PanelId, target: &GroupId, index: usize) -> DockResult<()> {
        let source = self.locate_or_err(panel)?;
        self.locate_group_or_err(target)?;

        if &source.group_id == target {
            let Some(to) = reorder_index(source.panel_index, index) else {
                return Ok(());
            };
            let group = self.group_or_err(target)?;
            let moved = group.panels.remove(source.panel_index);
            let to = to.min(group.panels.len());
            group.panels.insert(to, moved);
            tracing::debug!(panel = %panel, group = %target, index = to, "reordered panel");
            return Ok(());
        }

        let moved = self.take_panel(&source)?;
        let group = self.group_or_err(target)?;
        let to = index.min(group.panels.len());
        group.panels.insert(to, moved);
        self.cascade_empty(&source.root, &source.group_id);
        tracing::debug!(panel = %panel, group = %target, index = to, "moved panel");
        Ok(())
    }

    /// Wrap a panel in a new group docked on `edge` at `index`.
    pub fn create_group_in_container(
        &mut self,
        ctx: &mut DockingContext,
        panel: &PanelId,
        edge: Edge,
        index: usize,
        direction: Direction,
    ) -> DockResult<GroupId> {
        let source = self.locate_or_err(panel)?;
        let group_id = ctx.new_group_id(self);
        let moved = self.take_panel(&source)?;
        let group = PanelGroup::new(group_id.clone(), direction)
            .size(moved.width, moved.height)
            .panel(moved);
        self.place_in_container(group, edge, index);
        self.cascade_empty(&source.root, &source.group_id);
        tracing::debug!(panel = %panel, group = %group_id, %edge, "docked panel in new group");
        Ok(group_id)
    }

    fn place_in_container(&mut self, group: PanelGroup, edge: Edge, index: usize) {
        let groups = &mut self.container_mut(edge).groups;
        let to = index.min(groups.len());
        groups.insert(to, group);
    }

    /// Detach a panel into a new floating window at `origin`.
    ///
    /// The window takes `size` when given, otherwise the panel's current size.
    pub fn create_float_window(
        &mut self,
        ctx: &mut DockingContext,
        panel: &PanelId,
        origin: Vec2,
        size: Option<Size>,
    ) -> DockResult<FloatId> {
        let source = self.locate_or_err(panel)?;
        let moved = self.take_panel(&source)?;
        let size = size.unwrap_or_else(|| float_size(ctx, moved.width, moved.height));
        let group = PanelGroup::new(ctx.new_group_id(self), Direction::Column)
            .size(size.width, size.height)
            .panel(moved);
        let id = self.insert_float(ctx, group, origin);
        self.cascade_empty(&source.root, &source.group_id);
        Ok(id)
    }

    pub fn move_float_window(&mut self, id: &FloatId, x: f32, y: f32) -> DockResult<()> {
        let window = self
            .floating_window_mut(id)
            .ok_or_else(|| DockError::FloatNotFound(id.clone()))?;
        window.x = x;
        window.y = y;
        Ok(())
    }

    /// Give a floating window the next z-index.
    pub fn bring_to_front(&mut self, ctx: &mut DockingContext, id: &FloatId) -> DockResult<u64> {
        let window = self
            .floating_window_mut(id)
            .ok_or_else(|| DockError::FloatNotFound(id.clone()))?;
        window.z_index = ctx.next_z_index();
        Ok(window.z_index)
    }

    /// Set a floating window's position and size. The size applies to its
    /// primary group.
    pub fn resize_float_window(&mut self, id: &FloatId, rect: Rect) -> DockResult<()> {
        let window = self
            .floating_window_mut(id)
            .ok_or_else(|| DockError::FloatNotFound(id.clone()))?;
        window.x = rect.x;
        window.y = rect.y;
        if let Some(group) = window.groups.first_mut() {
            group.width = rect.width;
            group.height = rect.height;
        }
        Ok(())
    }

    /// Detach a tab into a new panel inserted into `group` at `index`.
    pub fn create_panel_from_tab(
        &mut self,
        ctx: &mut DockingContext,
        tab: &TabId,
        group: &GroupId,
        index: usize,
    ) -> DockResult<PanelId> {
        let source = self.locate_tab_or_err(tab)?;
        self.locate_group_or_err(group)?;
        let mut panel = self.panel_for_tab(ctx, &source)?;
        let panel_id = panel.id.clone();
        let moved = self.take_tab(&source)?;
        panel = panel.tab(moved);

        let target = self.group_or_err(group)?;
        let to = index.min(target.panels.len());
        target.panels.insert(to, panel);
        self.cascade_empty(&source.panel.root, &source.panel.group_id);
        tracing::debug!(tab = %tab, panel = %panel_id, group = %group, "split tab into new panel");
        Ok(panel_id)
    }

    /// Detach a tab into a new single-panel group docked on `edge`.
    pub fn create_group_from_tab(
        &mut self,
        ctx: &mut DockingContext,
        tab: &TabId,
        edge: Edge,
        index: usize,
        direction: Direction,
    ) -> DockResult<GroupId> {
        let source = self.locate_tab_or_err(tab)?;
        let panel = self.panel_for_tab(ctx, &source)?;
        let group_id = ctx.new_group_id(self);
        let moved = self.take_tab(&source)?;
        let group = PanelGroup::new(group_id.clone(), direction)
            .size(panel.width, panel.height)
            .panel(panel.tab(moved));
        self.place_in_container(group, edge, index);
        self.cascade_empty(&source.panel.root, &source.panel.group_id);
        tracing::debug!(tab = %tab, group = %group_id, %edge, "docked tab in new group");
        Ok(group_id)
    }

    /// Detach a tab into a new floating window at `origin`.
    pub fn create_float_window_from_tab(
        &mut self,
        ctx: &mut DockingContext,
        tab: &TabId,
        origin: Vec2,
        size: Option<Size>,
    ) -> DockResult<FloatId> {
        let source = self.locate_tab_or_err(tab)?;
        let panel = self.panel_for_tab(ctx, &source)?;
        let size = size.unwrap_or_else(|| float_size(ctx, panel.width, panel.height));
        let group_id = ctx.new_group_id(self);
        let moved = self.take_tab(&source)?;
        let group = PanelGroup::new(group_id, Direction::Column)
            .size(size.width, size.height)
            .panel(panel.tab(moved));
        let id = self.insert_float(ctx, group, origin);
        self.cascade_empty(&source.panel.root, &source.panel.group_id);
        Ok(id)
    }

    /// Move a tab into `target` at insertion point `index` and make it active.
    ///
    /// Inserting into the tab's own panel reorders it; landing on its own
    /// slot or the one after it is a no-op.
    pub fn insert_tab_to_panel(&mut self, tab: &TabId, target: &PanelId, index: usize) -> DockResult<()> {
        let source = self.locate_tab_or_err(tab)?;
        self.locate_or_err(target)?;

        if &source.panel_id == target {
            let Some(to) = reorder_index(source.tab_index, index) else {
                return Ok(());
            };
            let panel = self.panel_or_err(target)?;
            let moved = panel.tabs.remove(source.tab_index);
            let to = to.min(panel.tabs.len());
            panel.tabs.insert(to, moved);
            tracing::debug!(tab = %tab, panel = %target, index = to, "reordered tab");
            return Ok(());
        }

        let moved = self.take_tab(&source)?;
        let panel = self.panel_or_err(target)?;
        let to = index.min(panel.tabs.len());
        panel.active_tab = Some(moved.id.clone());
        panel.tabs.insert(to, moved);
        self.cascade_empty(&source.panel.root, &source.panel.group_id);
        tracing::debug!(tab = %tab, panel = %target, index = to, "moved tab");
        Ok(())
    }

    /// Move every tab of `source` into `target` at `index`; `source` is destroyed.
    pub fn merge_panel_tabs_to_panel(
        &mut self,
        source: &PanelId,
        target: &PanelId,
        index: usize,
    ) -> DockResult<()> {
        if source == target {
            return Err(DockError::InvalidTarget(format!(
                "cannot merge panel `{source}` into itself"
            )));
        }
        let from = self.locate_or_err(source)?;
        self.locate_or_err(target)?;

        let moved = self.take_panel(&from)?;
        let panel = self.panel_or_err(target)?;
        let active = moved
            .active_tab
            .clone()
            .or_else(|| moved.tabs.first().map(|t| t.id.clone()));
        let to = index.min(panel.tabs.len());
        panel.tabs.splice(to..to, moved.tabs);
        if active.is_some() {
            panel.active_tab = active;
        }
        self.cascade_empty(&from.root, &from.group_id);
        tracing::debug!(source = %source, target = %target, index = to, "merged panel tabs");
        Ok(())
    }

    /// Move a group to `edge` at insertion point `index`.
    pub fn move_group_to_container(&mut self, group: &GroupId, edge: Edge, index: usize) -> DockResult<()> {
        let source = self.locate_group_or_err(group)?;

        if source.root == RootRef::Container(edge) {
            let Some(to) = reorder_index(source.group_index, index) else {
                return Ok(());
            };
            let groups = &mut self.container_mut(edge).groups;
            let moved = groups.remove(source.group_index);
            let to = to.min(groups.len());
            groups.insert(to, moved);
            return Ok(());
        }

        let moved = self.take_group(&source)?;
        self.place_in_container(moved, edge, index);
        self.cascade_empty_root(&source.root);
        tracing::debug!(group = %group, %edge, "docked group");
        Ok(())
    }

    /// Detach a group into a new floating window at `origin`.
    pub fn create_float_window_from_group(
        &mut self,
        ctx: &mut DockingContext,
        group: &GroupId,
        origin: Vec2,
        size: Option<Size>,
    ) -> DockResult<FloatId> {
        let source = self.locate_group_or_err(group)?;
        let mut moved = self.take_group(&source)?;
        let size = size.unwrap_or_else(|| float_size(ctx, moved.width, moved.height));
        moved.width = size.width;
        moved.height = size.height;
        let id = self.insert_float(ctx, moved, origin);
        self.cascade_empty_root(&source.root);
        Ok(id)
    }

    /// Move every tab of every panel in `group` into `target` at `index`.
    pub fn merge_group_into_panel(&mut self, group: &GroupId, target: &PanelId, index: usize) -> DockResult<()> {
        let source = self.locate_group_or_err(group)?;
        let target_loc = self.locate_or_err(target)?;
        if &target_loc.group_id == group {
            return Err(DockError::InvalidTarget(format!(
                "panel `{target}` belongs to group `{group}`"
            )));
        }

        let moved = self.take_group(&source)?;
        let active = moved.panels.first().and_then(|p| p.active_tab.clone());
        let tabs: Vec<Tab> = moved.panels.into_iter().flat_map(|p| p.tabs).collect();
        let panel = self.panel_or_err(target)?;
        let to = index.min(panel.tabs.len());
        panel.tabs.splice(to..to, tabs);
        if active.is_some() {
            panel.active_tab = active;
        }
        self.cascade_empty_root(&source.root);
        tracing::debug!(group = %group, panel = %target, "merged group into panel");
        Ok(())
    }

    /// Move every panel of `group` into `target` at `index`.
    pub fn merge_group_into_group(&mut self, group: &GroupId, target: &GroupId, index: usize) -> DockResult<()> {
        if group == target {
            return Err(DockError::InvalidTarget(format!(
                "cannot merge group `{group}` into itself"
            )));
        }
        let source = self.locate_group_or_err(group)?;
        self.locate_group_or_err(target)?;

        let moved = self.take_group(&source)?;
        let target_group = self.group_or_err(target)?;
        let to = index.min(target_group.panels.len());
        target_group.panels.splice(to..to, moved.panels);
        self.cascade_empty_root(&source.root);
        tracing::debug!(group = %group, target = %target, "merged groups");
        Ok(())
    }

    /// Mark a tab active in its panel.
    pub fn set_active_tab(&mut self, tab: &TabId) -> DockResult<()> {
        let loc = self.locate_tab_or_err(tab)?;
        self.panel_or_err(&loc.panel_id)?.active_tab = Some(tab.clone());
        Ok(())
    }

    /// Remove a closable tab. The owning panel cascades away when emptied.
    pub fn close_tab(&mut self, tab: &TabId) -> DockResult<Tab> {
        let loc = self.locate_tab_or_err(tab)?;
        let closable = self.tab(tab).is_some_and(|t| t.closable);
        if !closable {
            return Err(DockError::InvalidTarget(format!("tab `{tab}` is not closable")));
        }
        let removed = self.take_tab(&loc)?;
        self.cascade_empty(&loc.panel.root, &loc.panel.group_id);
        tracing::debug!(tab = %tab, "closed tab");
        Ok(removed)
    }

    /// Resize a panel along `direction`'s axis, handing the delta to its next
    /// sibling.
    ///
    /// Both sides are clamped to their own constraints. When the sibling would
    /// cross a bound it is pinned there and the panel absorbs the remainder,
    /// so the pair's total extent is preserved. The last panel of a group is
    /// never used as the sibling.
    pub fn resize_panel_with_adjacent(
        &mut self,
        panel: &PanelId,
        width: f32,
        height: f32,
        direction: Direction,
    ) -> DockResult<AdjacentResize> {
        let loc = self.locate_or_err(panel)?;
        let axis = direction.resize_axis();
        let requested = match axis {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        };

        let group = self.group_or_err(&loc.group_id)?;
        let index = loc.panel_index;
        let current = &group.panels[index];
        let old = current.extent(axis);
        let desired = current.constraints.clamp(axis, requested);

        let next_index = index + 1;
        if next_index + 1 >= group.panels.len() {
            group.panels[index].set_extent(axis, desired);
            return Ok(AdjacentResize {
                panel: desired,
                neighbor: None,
            });
        }

        let next = &group.panels[next_index];
        let next_old = next.extent(axis);
        let next_min = next.constraints.min_on(axis);
        let next_max = next.constraints.max_on(axis);
        let next_desired = next_old - (desired - old);

        let (new_panel, new_next) = if next_desired < next_min {
            (desired.min(old + (next_old - next_min)), next_min)
        } else if next_desired > next_max {
            (desired.max(old - (next_max - next_old)), next_max)
        } else {
            (desired, next_desired)
        };

        group.panels[index].set_extent(axis, new_panel);
        group.panels[next_index].set_extent(axis, new_next);
        tracing::trace!(panel = %panel, new_panel, new_next, "resized panel pair");
        Ok(AdjacentResize {
            panel: new_panel,
            neighbor: Some(new_next),
        })
    }

    /// Set a panel's size, clamped to its constraints.
    pub fn resize_panel(&mut self, panel: &PanelId, width: f32, height: f32) -> DockResult<Size> {
        let target = self.panel_or_err(panel)?;
        target.width = target.constraints.clamp(Axis::Horizontal, width);
        target.height = target.constraints.clamp(Axis::Vertical, height);
        Ok(Size::new(target.width, target.height))
    }

    /// Set a group's size, no smaller than `min`.
    pub fn resize_panel_group(&mut self, group: &GroupId, width: f32, height: f32, min: Size) -> DockResult<Size> {
        let target = self.group_or_err(group)?;
        target.width = width.max(min.width);
        target.height = height.max(min.height);
        Ok(Size::new(target.width, target.height))
    }

    /// Split `extent` evenly between the groups docked on `edge`, along the
    /// edge's stacking axis. Panels are rescaled to fill their group.
    pub fn distribute_container(&mut self, edge: Edge, extent: f32) {
        let axis = edge.stacking_axis();
        let groups = &mut self.container_mut(edge).groups;
        if groups.is_empty() || extent <= 0.0 {
            return;
        }
        let share = extent / groups.len() as f32;
        for group in groups.iter_mut() {
            group.set_extent(axis, share);
            if group.direction.resize_axis() == axis {
                let total: f32 = group.panels.iter().map(|p| p.extent(axis)).sum();
                let count = group.panels.len() as f32;
                for panel in &mut group.panels {
                    let value = if total > 0.0 {
                        panel.extent(axis) * share / total
                    } else {
                        share / count
                    };
                    panel.set_extent(axis, value);
                }
            } else {
                for panel in &mut group.panels {
                    panel.set_extent(axis, share);
                }
            }
        }
        tracing::debug!(%edge, extent, share, "distributed container extent");
    }
}
