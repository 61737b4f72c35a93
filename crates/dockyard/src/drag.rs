//! Drag state machine for panels, tabs and groups.
//!
//! `idle -> armed -> dragging -> idle`. Pointer-down arms a drag; moving past
//! the threshold starts it. Once dragging, docked sources are lifted into a
//! floating window that follows the pointer (unless detaching is disabled,
//! in which case only a preview position moves). Release commits against
//! the hot zone under the pointer.

use dockyard_core::geometry::{Rect, Size};
use dockyard_core::math::Vec2;
use dockyard_core::profiling::profile_function;

use crate::bounds::{BoundsProvider, ElementId};
use crate::config::DockConfig;
use crate::context::DockingContext;
use crate::error::{DockError, DockResult};
use crate::event::DockEvent;
use crate::hot_zone::{DragExclusion, HotZone, HotZoneResolver, HotZoneTracker};
use crate::id::{FloatId, GroupId, PanelId, TabId};
use crate::model::{Axis, Edge, Layout, RootRef};
use crate::operations::DockOperation;
use crate::snap::{SnapCalculator, SnapGuide};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragPayload {
    Panel(PanelId),
    Tab(TabId),
    Group(GroupId),
}

impl DragPayload {
    fn exists_in(&self, layout: &Layout) -> DockResult<()> {
        match self {
            DragPayload::Panel(id) => layout
                .locate(id)
                .map(drop)
                .ok_or_else(|| DockError::PanelNotFound(id.clone())),
            DragPayload::Tab(id) => layout
                .locate_tab(id)
                .map(drop)
                .ok_or_else(|| DockError::TabNotFound(id.clone())),
            DragPayload::Group(id) => layout
                .locate_group(id)
                .map(drop)
                .ok_or_else(|| DockError::GroupNotFound(id.clone())),
        }
    }

    /// The floating window this payload is the sole content of, if any.
    pub fn sole_float(&self, layout: &Layout) -> Option<FloatId> {
        let (root, single) = match self {
            DragPayload::Panel(id) => {
                let loc = layout.locate(id)?;
                let group = layout.group(&loc.group_id)?;
                (loc.root, group.panels.len() == 1)
            }
            DragPayload::Group(id) => (layout.locate_group(id)?.root, true),
            DragPayload::Tab(id) => {
                let loc = layout.locate_tab(id)?;
                let group = layout.group(&loc.panel.group_id)?;
                let panel = layout.panel(&loc.panel_id)?;
                (loc.panel.root, group.panels.len() == 1 && panel.tabs.len() == 1)
            }
        };
        match root {
            RootRef::Float(float) if single => {
                let window = layout.floating_window(&float)?;
                (window.groups.len() == 1).then_some(float)
            }
            _ => None,
        }
    }
}

/// How an active drag is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    /// A floating window holding the payload follows the pointer.
    Follow { float: FloatId },
    /// The payload stays in place; only a preview position moves.
    Preview,
}

/// Result of a release.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Applied(DockOperation),
    /// Released on a no-op slot, or released before the threshold.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Armed,
    Dragging,
}

/// State of the drag holding the context's slot.
#[derive(Debug, Clone)]
pub struct DragState {
    pub payload: DragPayload,
    pub start_pos: Vec2,
    pub current_pos: Vec2,
    /// Pointer offset from the dragged element's top-left corner.
    pub grab_offset: Vec2,
    /// On-screen rectangle of the element when the pointer went down.
    pub element_rect: Rect,
    pub is_active: bool,
    pub mode: DragMode,
    /// Top-left corner of the dragged element right now.
    pub position: Vec2,
    /// Layout as it was when the drag started; restored on cancel.
    snapshot: Option<Layout>,
}

impl DragState {
    fn new(payload: DragPayload, start_pos: Vec2, element_rect: Rect) -> Self {
        Self {
            payload,
            start_pos,
            current_pos: start_pos,
            grab_offset: start_pos - element_rect.origin(),
            element_rect,
            is_active: false,
            mode: DragMode::Preview,
            position: element_rect.origin(),
            snapshot: None,
        }
    }

    /// Get the drag delta from start.
    pub fn delta(&self) -> Vec2 {
        self.current_pos - self.start_pos
    }

    fn lifted(&self) -> Option<&FloatId> {
        match &self.mode {
            DragMode::Follow { float } => Some(float),
            DragMode::Preview => None,
        }
    }

    fn element_size(&self) -> Option<Size> {
        (!self.element_rect.is_empty()).then(|| self.element_rect.size())
    }
}

/// Read-only view of the current drag for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSnapshot {
    pub payload: DragPayload,
    pub phase: DragPhase,
    pub pointer: Vec2,
    pub position: Vec2,
    pub following: Option<FloatId>,
    pub hot_zone: Option<HotZone>,
    pub guides: Vec<SnapGuide>,
}

/// Everything a drag step needs from its owner.
pub struct DragEnv<'a> {
    pub layout: &'a mut Layout,
    pub ctx: &'a mut DockingContext,
    pub config: &'a DockConfig,
    pub bounds: &'a dyn BoundsProvider,
}

/// Manages drag operations for the docking system.
#[derive(Debug, Default)]
pub struct DragManager {
    drag_state: Option<DragState>,
    zones: HotZoneTracker,
    guides: Vec<SnapGuide>,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        match &self.drag_state {
            None => DragPhase::Idle,
            Some(state) if state.is_active => DragPhase::Dragging,
            Some(_) => DragPhase::Armed,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Check if there's a pending drag (pointer down but threshold not exceeded).
    pub fn has_pending_drag(&self) -> bool {
        self.phase() == DragPhase::Armed
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag_state.as_ref()
    }

    pub fn hot_zone(&self) -> Option<&HotZone> {
        self.zones.current()
    }

    pub fn snapshot(&self) -> Option<DragSnapshot> {
        let state = self.drag_state.as_ref()?;
        Some(DragSnapshot {
            payload: state.payload.clone(),
            phase: self.phase(),
            pointer: state.current_pos,
            position: state.position,
            following: state.lifted().cloned(),
            hot_zone: self.zones.current().cloned(),
            guides: self.guides.clone(),
        })
    }

    /// Check if a position exceeds the drag threshold from the start position.
    pub fn exceeds_threshold(start: Vec2, current: Vec2, threshold: f32) -> bool {
        (current - start).length() >= threshold
    }

    /// Arm a drag. Fails if another drag holds the context's slot.
    pub fn pointer_down(
        &mut self,
        layout: &Layout,
        ctx: &mut DockingContext,
        payload: DragPayload,
        pointer: Vec2,
        element_rect: Rect,
    ) -> DockResult<()> {
        payload.exists_in(layout)?;
        ctx.claim_drag(payload.clone())?;
        tracing::debug!(?payload, "drag armed");
        ctx.emit(DockEvent::DragArmed(payload.clone()));
        self.drag_state = Some(DragState::new(payload, pointer, element_rect));
        Ok(())
    }

    /// Track the pointer. Starts the drag once the threshold is exceeded.
    pub fn pointer_move(&mut self, env: DragEnv<'_>, pointer: Vec2, suppress_snap: bool) -> DockResult<DragPhase> {
        profile_function!();

        let DragEnv {
            layout,
            ctx,
            config,
            bounds,
        } = env;
        let state = self.drag_state.as_mut().ok_or(DockError::NoActiveDrag)?;
        state.current_pos = pointer;

        if !state.is_active {
            if !Self::exceeds_threshold(state.start_pos, pointer, config.drag_threshold) {
                return Ok(DragPhase::Armed);
            }
            Self::begin(state, layout, ctx, config)?;
        }

        self.track(layout, ctx, config, bounds, pointer, suppress_snap)?;
        Ok(DragPhase::Dragging)
    }

    /// Lift the payload and mark the drag active.
    fn begin(
        state: &mut DragState,
        layout: &mut Layout,
        ctx: &mut DockingContext,
        config: &DockConfig,
    ) -> DockResult<()> {
        state.is_active = true;
        state.snapshot = Some(layout.clone());

        if let DragPayload::Tab(tab) = &state.payload {
            let single = layout
                .locate_tab(tab)
                .and_then(|loc| layout.panel(&loc.panel_id))
                .filter(|panel| panel.tabs.len() == 1)
                .map(|panel| panel.id.clone());
            if let Some(panel) = single {
                state.payload = DragPayload::Panel(panel);
                ctx.rebind_drag(state.payload.clone());
            }
        }

        if let Some(float) = state.payload.sole_float(layout) {
            layout.bring_to_front(ctx, &float)?;
            if let Some(window) = layout.floating_window(&float) {
                state.position = Vec2::new(window.x, window.y);
                state.grab_offset = state.start_pos - state.position;
            }
            state.mode = DragMode::Follow { float };
        } else if config.detach_on_drag {
            let origin = state.element_rect.origin();
            let size = state.element_size();
            let float = match &state.payload {
                DragPayload::Panel(id) => layout.create_float_window(ctx, id, origin, size)?,
                DragPayload::Tab(id) => layout.create_float_window_from_tab(ctx, id, origin, None)?,
                DragPayload::Group(id) => layout.create_float_window_from_group(ctx, id, origin, size)?,
            };
            state.position = origin;
            state.mode = DragMode::Follow { float };
        }

        tracing::debug!(payload = ?state.payload, mode = ?state.mode, "drag started");
        ctx.emit(DockEvent::DragStarted(state.payload.clone()));
        Ok(())
    }

    /// Move the dragged element and refresh the hot zone.
    fn track(
        &mut self,
        layout: &mut Layout,
        ctx: &mut DockingContext,
        config: &DockConfig,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        suppress_snap: bool,
    ) -> DockResult<()> {
        let Some(state) = self.drag_state.as_mut() else {
            return Err(DockError::NoActiveDrag);
        };
        let root = bounds.rect_of(&ElementId::Root);
        let target = pointer - state.grab_offset;
        self.guides.clear();

        match state.mode.clone() {
            DragMode::Follow { float } => {
                let size = layout
                    .floating_window(&float)
                    .map(|w| w.size())
                    .ok_or_else(|| DockError::FloatNotFound(float.clone()))?;
                let mut rect = Rect::from_origin_size(target, size);

                if config.snap_enabled && !suppress_snap {
                    let others = other_float_rects(layout, bounds, &float);
                    let result = SnapCalculator::new(config.snap_tolerance).snap(rect, &others, root);
                    rect = rect.with_origin(result.position);
                    self.guides = result.guides;
                }
                if let Some(root) = root {
                    rect = constrain_to_root(rect, root, config.boundary_padding);
                }
                layout.move_float_window(&float, rect.x, rect.y)?;
                state.position = rect.origin();
            }
            DragMode::Preview => state.position = target,
        }

        let zone = HotZoneResolver::from_config(config).resolve(
            layout,
            bounds,
            pointer,
            DragExclusion {
                payload: &state.payload,
                lifted: state.lifted(),
            },
        );
        tracing::trace!(?zone, "hot zone");
        let transition = self.zones.update(zone);
        if let Some(left) = transition.left {
            ctx.emit(DockEvent::HotZoneLeft(left));
        }
        if let Some(entered) = transition.entered {
            ctx.emit(DockEvent::HotZoneEntered(entered));
        }
        Ok(())
    }

    /// Release the pointer and commit the drop.
    pub fn pointer_up(&mut self, env: DragEnv<'_>, pointer: Vec2) -> DockResult<DropOutcome> {
        let DragEnv {
            layout,
            ctx,
            config,
            bounds,
        } = env;
        let active = self
            .drag_state
            .as_ref()
            .map(|s| s.is_active)
            .ok_or(DockError::NoActiveDrag)?;

        if !active {
            self.finish(ctx);
            return Ok(DropOutcome::Unchanged);
        }

        let tracked = self.track(layout, ctx, config, bounds, pointer, false);
        let outcome = tracked.and_then(|()| self.commit(layout, ctx, bounds));
        if let Some(left) = self.zones.clear() {
            ctx.emit(DockEvent::HotZoneLeft(left));
        }
        let payload = self.finish(ctx);

        match outcome {
            Ok(outcome) => {
                if let Some(payload) = payload {
                    tracing::debug!(?payload, ?outcome, "drag committed");
                    ctx.emit(DockEvent::DragCommitted {
                        payload,
                        outcome: outcome.clone(),
                    });
                }
                if matches!(outcome, DropOutcome::Applied(_)) {
                    ctx.emit(DockEvent::LayoutChanged);
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(%err, "drop could not be committed");
                Err(err)
            }
        }
    }

    fn commit(
        &self,
        layout: &mut Layout,
        ctx: &mut DockingContext,
        bounds: &dyn BoundsProvider,
    ) -> DockResult<DropOutcome> {
        let state = self.drag_state.as_ref().ok_or(DockError::NoActiveDrag)?;
        let Some(operation) = drop_operation(state, self.zones.current(), layout) else {
            return Ok(DropOutcome::Unchanged);
        };
        operation.apply(layout, ctx)?;
        if let Some(edge) = operation.docked_edge()
            && let Some(extent) = edge_extent(bounds, edge)
        {
            layout.distribute_container(edge, extent);
        }
        Ok(DropOutcome::Applied(operation))
    }

    /// Abandon the drag. An active drag restores the layout it started from.
    pub fn cancel(&mut self, layout: &mut Layout, ctx: &mut DockingContext) -> DockResult<DragPayload> {
        let state = self.drag_state.as_mut().ok_or(DockError::NoActiveDrag)?;
        let restored = state.snapshot.take();
        let was_active = state.is_active;
        if let Some(left) = self.zones.clear() {
            ctx.emit(DockEvent::HotZoneLeft(left));
        }
        if let Some(snapshot) = restored {
            *layout = snapshot;
        }
        let payload = self
            .drag_state
            .as_ref()
            .map(|s| s.payload.clone())
            .ok_or(DockError::NoActiveDrag)?;
        self.finish(ctx);
        if was_active {
            tracing::debug!(?payload, "drag cancelled");
            ctx.emit(DockEvent::DragCancelled(payload.clone()));
        }
        Ok(payload)
    }

    fn finish(&mut self, ctx: &mut DockingContext) -> Option<DragPayload> {
        self.drag_state = None;
        self.guides.clear();
        self.zones.clear();
        ctx.release_drag()
    }
}

/// Choose the operation a release performs, in priority order: tab bar,
/// then dock edges, then empty space.
fn drop_operation(state: &DragState, zone: Option<&HotZone>, layout: &Layout) -> Option<DockOperation> {
    let payload = state.payload.clone();
    let operation = match (zone, payload) {
        (Some(HotZone::TabBar { insert_index: None, .. }), _) => return None,
        (Some(HotZone::TabBar { panel, insert_index: Some(index) }), payload) => {
            let (panel, index) = (panel.clone(), *index);
            match payload {
                DragPayload::Tab(tab) => DockOperation::InsertTabToPanel { tab, panel, index },
                DragPayload::Panel(source) => DockOperation::MergePanelTabsToPanel {
                    source,
                    target: panel,
                    index,
                },
                DragPayload::Group(group) => DockOperation::MergeGroupIntoPanel { group, panel, index },
            }
        }
        (
            Some(
                HotZone::ContainerEdge { edge, insert_index, .. }
                | HotZone::GroupEdge { edge, insert_index, .. },
            ),
            payload,
        ) => {
            let (edge, index) = (*edge, *insert_index);
            let direction = edge.default_direction();
            match payload {
                DragPayload::Panel(panel) => DockOperation::CreateGroupInContainer {
                    panel,
                    edge,
                    index,
                    direction,
                },
                DragPayload::Tab(tab) => DockOperation::CreateGroupFromTab {
                    tab,
                    edge,
                    index,
                    direction,
                },
                DragPayload::Group(group) => DockOperation::MoveGroupToContainer { group, edge, index },
            }
        }
        (Some(HotZone::PanelEdge { group, insert_index, .. }), payload) => {
            let (group, index) = (group.clone(), *insert_index);
            match payload {
                DragPayload::Panel(panel) => DockOperation::MoveToGroup { panel, group, index },
                DragPayload::Tab(tab) => DockOperation::CreatePanelFromTab { tab, group, index },
                DragPayload::Group(source) => DockOperation::MergeGroupIntoGroup {
                    group: source,
                    target: group,
                    index,
                },
            }
        }
        (None, payload) => {
            if let DragMode::Follow { float } = &state.mode {
                return Some(DockOperation::MoveFloatWindow {
                    float: float.clone(),
                    origin: state.position,
                });
            }
            let origin = state.position;
            if let Some(float) = payload.sole_float(layout) {
                return Some(DockOperation::MoveFloatWindow { float, origin });
            }
            let size = state.element_size();
            match payload {
                DragPayload::Panel(panel) => DockOperation::CreateFloatWindow { panel, origin, size },
                DragPayload::Tab(tab) => DockOperation::CreateFloatWindowFromTab {
                    tab,
                    origin,
                    size: None,
                },
                DragPayload::Group(group) => DockOperation::CreateFloatWindowFromGroup { group, origin, size },
            }
        }
    };
    Some(operation)
}

/// Extent shared by the groups docked on `edge`: the container's own rect
/// when rendered, else the docking area's.
fn edge_extent(bounds: &dyn BoundsProvider, edge: Edge) -> Option<f32> {
    let rect = bounds
        .rect_of(&ElementId::Container(edge))
        .filter(|r| !r.is_empty())
        .or_else(|| bounds.rect_of(&ElementId::Root))?;
    Some(match edge.stacking_axis() {
        Axis::Vertical => rect.height,
        Axis::Horizontal => rect.width,
    })
}

/// Rectangles of every floating window other than `skip`, preferring the
/// rendered rect over the model's.
fn other_float_rects(layout: &Layout, bounds: &dyn BoundsProvider, skip: &FloatId) -> Vec<Rect> {
    layout
        .floating
        .iter()
        .filter(|w| &w.id != skip)
        .map(|w| {
            bounds
                .rect_of(&ElementId::Float(w.id.clone()))
                .unwrap_or_else(|| Rect::from_origin_size(Vec2::new(w.x, w.y), w.size()))
        })
        .collect()
}

/// Keep at least `padding` pixels of `rect` inside `root` horizontally and
/// its top edge inside `root` vertically.
fn constrain_to_root(mut rect: Rect, root: Rect, padding: f32) -> Rect {
    let (min_x, max_x) = (root.left() - rect.width + padding, root.right() - padding);
    if min_x <= max_x {
        rect.x = rect.x.clamp(min_x, max_x);
    }
    let (min_y, max_y) = (root.top(), root.bottom() - padding);
    if min_y <= max_y {
        rect.y = rect.y.clamp(min_y, max_y);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundsMap;
    use crate::model::{Direction, Panel, PanelGroup, Tab};

    fn layout() -> Layout {
        let mut layout = Layout::new();
        layout.container_mut(Edge::Left).groups.push(
            PanelGroup::new("left", Direction::Row).panel(
                Panel::new("files", "Files")
                    .tab(Tab::new("files-tab", "Files"))
                    .tab(Tab::new("git-tab", "Git")),
            ),
        );
        layout
    }

    fn bounds() -> BoundsMap {
        BoundsMap::new().with(ElementId::Root, Rect::new(0.0, 0.0, 1000.0, 800.0))
    }

    #[test]
    fn test_threshold_gates_dragging() {
        let mut layout = layout();
        let mut ctx = DockingContext::default();
        let config = DockConfig::default();
        let bounds = bounds();
        let mut manager = DragManager::new();

        manager
            .pointer_down(
                &layout,
                &mut ctx,
                DragPayload::Panel(PanelId::new("files")),
                Vec2::new(100.0, 100.0),
                Rect::new(0.0, 0.0, 250.0, 400.0),
            )
            .unwrap();
        assert!(manager.has_pending_drag());

        let env = DragEnv {
            layout: &mut layout,
            ctx: &mut ctx,
            config: &config,
            bounds: &bounds,
        };
        assert_eq!(manager.pointer_move(env, Vec2::new(103.0, 100.0), false), Ok(DragPhase::Armed));
        assert_eq!(layout.floating.len(), 0);

        let env = DragEnv {
            layout: &mut layout,
            ctx: &mut ctx,
            config: &config,
            bounds: &bounds,
        };
        assert_eq!(manager.pointer_move(env, Vec2::new(110.0, 100.0), false), Ok(DragPhase::Dragging));
        assert!(manager.is_dragging());
        assert_eq!(layout.floating.len(), 1);
        assert!(layout.container(Edge::Left).groups.is_empty());
    }

    #[test]
    fn test_release_before_threshold_is_a_click() {
        let mut layout = layout();
        let mut ctx = DockingContext::default();
        let config = DockConfig::default();
        let bounds = bounds();
        let mut manager = DragManager::new();
        let before = layout.clone();

        manager
            .pointer_down(&layout, &mut ctx, DragPayload::Tab(TabId::new("git-tab")), Vec2::ZERO, Rect::default())
            .unwrap();
        let env = DragEnv {
            layout: &mut layout,
            ctx: &mut ctx,
            config: &config,
            bounds: &bounds,
        };
        assert_eq!(manager.pointer_up(env, Vec2::new(1.0, 1.0)), Ok(DropOutcome::Unchanged));
        assert_eq!(layout, before);
        assert!(ctx.current_drag().is_none());
    }

    #[test]
    fn test_unknown_payload_is_rejected() {
        let layout = layout();
        let mut ctx = DockingContext::default();
        let mut manager = DragManager::new();
        let err = manager
            .pointer_down(&layout, &mut ctx, DragPayload::Panel(PanelId::new("ghost")), Vec2::ZERO, Rect::default())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(manager.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_constrain_keeps_padding_visible() {
        let root = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let rect = constrain_to_root(Rect::new(-500.0, 900.0, 300.0, 200.0), root, 50.0);
        assert_eq!((rect.x, rect.y), (-250.0, 750.0));
    }
}
