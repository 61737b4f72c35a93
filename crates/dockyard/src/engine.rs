//! `DockEngine`: the single entry point a host talks to.
//!
//! The engine owns the layout tree, the docking context, the configuration
//! and the drag/resize controllers. Geometry is passed in on every pointer
//! call through a [`BoundsProvider`], so nothing is cached between frames.

use dockyard_core::geometry::{Rect, Size};
use dockyard_core::math::Vec2;
use dockyard_core::profiling::profile_function;

use crate::bounds::{BoundsProvider, ElementId};
use crate::config::DockConfig;
use crate::context::DockingContext;
use crate::drag::{DragEnv, DragManager, DragPayload, DragPhase, DragSnapshot, DropOutcome};
use crate::error::{DockError, DockResult};
use crate::event::{DockEvent, ObserverId};
use crate::hot_zone::HotZone;
use crate::id::{FloatId, GroupId, PanelId, TabId};
use crate::locate::{GroupLocation, PanelLocation, TabLocation};
use crate::model::{Axis, Direction, Edge, Layout, PanelConstraints, RootRef, Tab};
use crate::operations::{AdjacentResize, DockOperation};
use crate::resize::{ResizeController, ResizeHandle, ResizeHandles, ResizeSession, ResizeTarget};

/// Docking layout engine.
///
/// # Example
///
/// ```
/// use dockyard::{DockConfig, DockEngine, Layout};
///
/// let mut engine = DockEngine::new(Layout::new(), DockConfig::default()).unwrap();
/// assert_eq!(engine.layout().panel_count(), 0);
/// assert!(engine.cancel_drag().is_err());
/// ```
#[derive(Debug)]
pub struct DockEngine {
    layout: Layout,
    ctx: DockingContext,
    config: DockConfig,
    drag: DragManager,
    resize: ResizeController,
}

static_assertions::assert_impl_all!(DockEngine: Send);

impl DockEngine {
    /// Create an engine over `layout`. The layout must be structurally valid.
    pub fn new(layout: Layout, config: DockConfig) -> DockResult<Self> {
        let problems = layout.validate();
        if !problems.is_empty() {
            return Err(DockError::InvalidLayout(problems));
        }
        let mut ctx = DockingContext::from_config(&config);
        ctx.sync_z_order(&layout);
        tracing::debug!(panels = layout.panel_count(), floats = layout.floating.len(), "dock engine created");
        Ok(Self {
            layout,
            ctx,
            config,
            drag: DragManager::new(),
            resize: ResizeController::new(),
        })
    }

    /// Create an engine from a JSON layout supplied by the host.
    pub fn from_json(json: &str, config: DockConfig) -> DockResult<Self> {
        Self::new(Layout::from_json(json)?, config)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn to_json(&self) -> DockResult<String> {
        self.layout.to_json()
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&DockEvent) + Send + 'static) -> ObserverId {
        self.ctx.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.ctx.events.unsubscribe(id)
    }

    pub fn locate(&self, panel: &PanelId) -> Option<PanelLocation> {
        self.layout.locate(panel)
    }

    pub fn locate_tab(&self, tab: &TabId) -> Option<TabLocation> {
        self.layout.locate_tab(tab)
    }

    pub fn locate_group(&self, group: &GroupId) -> Option<GroupLocation> {
        self.layout.locate_group(group)
    }

    // Drag

    pub fn pointer_down(&mut self, payload: DragPayload, pointer: Vec2, element_rect: Rect) -> DockResult<()> {
        self.drag
            .pointer_down(&self.layout, &mut self.ctx, payload, pointer, element_rect)
            .inspect_err(|err| tracing::warn!(%err, "pointer down rejected"))
    }

    /// Track the pointer; `suppress_snap` disables snapping for this move.
    pub fn pointer_move(
        &mut self,
        bounds: &dyn BoundsProvider,
        pointer: Vec2,
        suppress_snap: bool,
    ) -> DockResult<DragPhase> {
        profile_function!();
        let env = DragEnv {
            layout: &mut self.layout,
            ctx: &mut self.ctx,
            config: &self.config,
            bounds,
        };
        self.drag
            .pointer_move(env, pointer, suppress_snap)
            .inspect_err(|err| tracing::warn!(%err, "pointer move failed"))
    }

    pub fn pointer_up(&mut self, bounds: &dyn BoundsProvider, pointer: Vec2) -> DockResult<DropOutcome> {
        let env = DragEnv {
            layout: &mut self.layout,
            ctx: &mut self.ctx,
            config: &self.config,
            bounds,
        };
        self.drag.pointer_up(env, pointer)
    }

    /// Abandon the drag, restoring the layout it started from.
    pub fn cancel_drag(&mut self) -> DockResult<DragPayload> {
        self.drag.cancel(&mut self.layout, &mut self.ctx)
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_snapshot(&self) -> Option<DragSnapshot> {
        self.drag.snapshot()
    }

    pub fn hot_zone(&self) -> Option<&HotZone> {
        self.drag.hot_zone()
    }

    // Resize

    /// Handles `target` exposes in the current layout.
    pub fn allowed_handles(&self, target: &ResizeTarget) -> DockResult<ResizeHandles> {
        match target {
            ResizeTarget::Panel(id) => {
                let loc = self
                    .layout
                    .locate(id)
                    .ok_or_else(|| DockError::PanelNotFound(id.clone()))?;
                let group = self
                    .layout
                    .group(&loc.group_id)
                    .ok_or_else(|| DockError::GroupNotFound(loc.group_id.clone()))?;
                Ok(match group.direction.resize_axis() {
                    Axis::Vertical => ResizeHandles::S,
                    Axis::Horizontal => ResizeHandles::E,
                })
            }
            ResizeTarget::Group(id) => {
                let loc = self
                    .layout
                    .locate_group(id)
                    .ok_or_else(|| DockError::GroupNotFound(id.clone()))?;
                Ok(match loc.root {
                    RootRef::Container(Edge::Left) => ResizeHandles::E,
                    RootRef::Container(Edge::Right) => ResizeHandles::W,
                    RootRef::Container(Edge::Top) => ResizeHandles::S,
                    RootRef::Container(Edge::Bottom) => ResizeHandles::N,
                    RootRef::Float(_) => ResizeHandles::all(),
                })
            }
            ResizeTarget::Float(id) => self
                .layout
                .floating_window(id)
                .map(|_| ResizeHandles::all())
                .ok_or_else(|| DockError::FloatNotFound(id.clone())),
        }
    }

    /// Begin a resize gesture on `target` from `handle`.
    pub fn start_resize(
        &mut self,
        bounds: &dyn BoundsProvider,
        target: ResizeTarget,
        handle: ResizeHandle,
        pointer: Vec2,
    ) -> DockResult<()> {
        let allowed = self
            .allowed_handles(&target)
            .inspect_err(|err| tracing::warn!(%err, "resize target not found"))?;
        if !allowed.contains(handle.flag()) {
            let err = DockError::InvalidTarget(format!("handle {handle:?} not allowed for {target:?}"));
            tracing::warn!(%err, "resize rejected");
            return Err(err);
        }

        let min = self.config.min_panel_size;
        let group_constraints = PanelConstraints {
            min_width: min.width,
            min_height: min.height,
            max_width: None,
            max_height: None,
        };
        let (element, model_rect, constraints, floating) = match &target {
            ResizeTarget::Panel(id) => {
                let panel = self
                    .layout
                    .panel(id)
                    .ok_or_else(|| DockError::PanelNotFound(id.clone()))?;
                let rect = Rect::new(0.0, 0.0, panel.width, panel.height);
                (ElementId::Panel(id.clone()), rect, panel.constraints, false)
            }
            ResizeTarget::Group(id) => {
                let group = self
                    .layout
                    .group(id)
                    .ok_or_else(|| DockError::GroupNotFound(id.clone()))?;
                let rect = Rect::new(0.0, 0.0, group.width, group.height);
                (ElementId::Group(id.clone()), rect, group_constraints, false)
            }
            ResizeTarget::Float(id) => {
                let window = self
                    .layout
                    .floating_window(id)
                    .ok_or_else(|| DockError::FloatNotFound(id.clone()))?;
                let rect = Rect::from_origin_size(Vec2::new(window.x, window.y), window.size());
                (ElementId::Float(id.clone()), rect, group_constraints, true)
            }
        };
        // Floats position from the model; docked elements only need a size.
        let start_rect = if floating {
            model_rect
        } else {
            bounds
                .rect_of(&element)
                .map(|r| Rect::new(r.x, r.y, model_rect.width, model_rect.height))
                .unwrap_or(model_rect)
        };

        tracing::debug!(?target, ?handle, "resize started");
        self.resize.start(ResizeSession {
            target,
            handle,
            start_pointer: pointer,
            start_rect,
            constraints,
            allow_position_change: floating,
        });
        Ok(())
    }

    /// Apply the active resize for `pointer`. Returns the applied rectangle.
    pub fn on_resize(&mut self, pointer: Vec2) -> DockResult<Rect> {
        profile_function!();
        let (target, rect) = self.resize.update(pointer)?;
        let handle = self.resize.session().map(|s| s.handle);
        self.apply_resize(&target, handle, rect)
    }

    pub fn end_resize(&mut self, pointer: Vec2) -> DockResult<Rect> {
        let handle = self.resize.session().map(|s| s.handle);
        let (target, rect) = self.resize.end(pointer)?;
        let applied = self.apply_resize(&target, handle, rect)?;
        tracing::debug!(?target, ?applied, "resize finished");
        self.ctx.emit(DockEvent::LayoutChanged);
        Ok(applied)
    }

    /// Abandon the resize and put the element back to its starting size.
    pub fn cancel_resize(&mut self) -> DockResult<()> {
        let handle = self.resize.session().map(|s| s.handle);
        let (target, rect) = self.resize.cancel().ok_or(DockError::NoActiveResize)?;
        self.apply_resize(&target, handle, rect).map(drop)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    fn apply_resize(&mut self, target: &ResizeTarget, handle: Option<ResizeHandle>, rect: Rect) -> DockResult<Rect> {
        match target {
            ResizeTarget::Panel(id) => {
                let direction = self
                    .layout
                    .locate(id)
                    .and_then(|loc| self.layout.group(&loc.group_id))
                    .map(|g| g.direction)
                    .ok_or_else(|| DockError::PanelNotFound(id.clone()))?;
                let chained = handle.is_some_and(|h| h.affects(direction.resize_axis()));
                if chained {
                    self.layout
                        .resize_panel_with_adjacent(id, rect.width, rect.height, direction)?;
                } else {
                    self.layout.resize_panel(id, rect.width, rect.height)?;
                }
                let panel = self
                    .layout
                    .panel(id)
                    .ok_or_else(|| DockError::PanelNotFound(id.clone()))?;
                Ok(Rect::new(rect.x, rect.y, panel.width, panel.height))
            }
            ResizeTarget::Group(id) => {
                let size = self
                    .layout
                    .resize_panel_group(id, rect.width, rect.height, self.config.min_panel_size)?;
                Ok(Rect::new(rect.x, rect.y, size.width, size.height))
            }
            ResizeTarget::Float(id) => {
                self.layout.resize_float_window(id, rect)?;
                Ok(rect)
            }
        }
    }

    // Mutations

    /// Run a mutation, reporting success to observers and failures to the log.
    fn mutate<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Layout, &mut DockingContext) -> DockResult<T>,
    ) -> DockResult<T> {
        match f(&mut self.layout, &mut self.ctx) {
            Ok(value) => {
                self.ctx.emit(DockEvent::LayoutChanged);
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(operation = name, %err, "operation skipped");
                Err(err)
            }
        }
    }

    /// Apply a prepared operation.
    pub fn apply(&mut self, operation: &DockOperation) -> DockResult<()> {
        self.mutate("apply", |layout, ctx| operation.apply(layout, ctx))
    }

    pub fn move_to_group(&mut self, panel: &PanelId, group: &GroupId, index: usize) -> DockResult<()> {
        self.mutate("move_to_group", |layout, _| layout.move_to_group(panel, group, index))
    }

    pub fn create_group_in_container(
        &mut self,
        panel: &PanelId,
        edge: Edge,
        index: usize,
        direction: Direction,
    ) -> DockResult<GroupId> {
        self.mutate("create_group_in_container", |layout, ctx| {
            layout.create_group_in_container(ctx, panel, edge, index, direction)
        })
    }

    pub fn create_float_window(&mut self, panel: &PanelId, origin: Vec2, size: Option<Size>) -> DockResult<FloatId> {
        self.mutate("create_float_window", |layout, ctx| {
            layout.create_float_window(ctx, panel, origin, size)
        })
    }

    pub fn move_float_window(&mut self, float: &FloatId, origin: Vec2) -> DockResult<()> {
        self.mutate("move_float_window", |layout, _| {
            layout.move_float_window(float, origin.x, origin.y)
        })
    }

    pub fn bring_to_front(&mut self, float: &FloatId) -> DockResult<u64> {
        self.mutate("bring_to_front", |layout, ctx| layout.bring_to_front(ctx, float))
    }

    pub fn resize_float_window(&mut self, float: &FloatId, rect: Rect) -> DockResult<()> {
        self.mutate("resize_float_window", |layout, _| layout.resize_float_window(float, rect))
    }

    pub fn create_panel_from_tab(&mut self, tab: &TabId, group: &GroupId, index: usize) -> DockResult<PanelId> {
        self.mutate("create_panel_from_tab", |layout, ctx| {
            layout.create_panel_from_tab(ctx, tab, group, index)
        })
    }

    pub fn create_group_from_tab(
        &mut self,
        tab: &TabId,
        edge: Edge,
        index: usize,
        direction: Direction,
    ) -> DockResult<GroupId> {
        self.mutate("create_group_from_tab", |layout, ctx| {
            layout.create_group_from_tab(ctx, tab, edge, index, direction)
        })
    }

    pub fn create_float_window_from_tab(
        &mut self,
        tab: &TabId,
        origin: Vec2,
        size: Option<Size>,
    ) -> DockResult<FloatId> {
        self.mutate("create_float_window_from_tab", |layout, ctx| {
            layout.create_float_window_from_tab(ctx, tab, origin, size)
        })
    }

    pub fn insert_tab_to_panel(&mut self, tab: &TabId, panel: &PanelId, index: usize) -> DockResult<()> {
        self.mutate("insert_tab_to_panel", |layout, _| layout.insert_tab_to_panel(tab, panel, index))
    }

    pub fn merge_panel_tabs_to_panel(&mut self, source: &PanelId, target: &PanelId, index: usize) -> DockResult<()> {
        self.mutate("merge_panel_tabs_to_panel", |layout, _| {
            layout.merge_panel_tabs_to_panel(source, target, index)
        })
    }

    pub fn move_group_to_container(&mut self, group: &GroupId, edge: Edge, index: usize) -> DockResult<()> {
        self.mutate("move_group_to_container", |layout, _| {
            layout.move_group_to_container(group, edge, index)
        })
    }

    pub fn create_float_window_from_group(
        &mut self,
        group: &GroupId,
        origin: Vec2,
        size: Option<Size>,
    ) -> DockResult<FloatId> {
        self.mutate("create_float_window_from_group", |layout, ctx| {
            layout.create_float_window_from_group(ctx, group, origin, size)
        })
    }

    pub fn merge_group_into_panel(&mut self, group: &GroupId, panel: &PanelId, index: usize) -> DockResult<()> {
        self.mutate("merge_group_into_panel", |layout, _| {
            layout.merge_group_into_panel(group, panel, index)
        })
    }

    pub fn merge_group_into_group(&mut self, group: &GroupId, target: &GroupId, index: usize) -> DockResult<()> {
        self.mutate("merge_group_into_group", |layout, _| {
            layout.merge_group_into_group(group, target, index)
        })
    }

    pub fn set_active_tab(&mut self, tab: &TabId) -> DockResult<()> {
        self.mutate("set_active_tab", |layout, _| layout.set_active_tab(tab))
    }

    pub fn close_tab(&mut self, tab: &TabId) -> DockResult<Tab> {
        self.mutate("close_tab", |layout, _| layout.close_tab(tab))
    }

    pub fn resize_panel_with_adjacent(
        &mut self,
        panel: &PanelId,
        width: f32,
        height: f32,
        direction: Direction,
    ) -> DockResult<AdjacentResize> {
        self.mutate("resize_panel_with_adjacent", |layout, _| {
            layout.resize_panel_with_adjacent(panel, width, height, direction)
        })
    }

    pub fn resize_panel(&mut self, panel: &PanelId, width: f32, height: f32) -> DockResult<Size> {
        self.mutate("resize_panel", |layout, _| layout.resize_panel(panel, width, height))
    }

    pub fn resize_panel_group(&mut self, group: &GroupId, width: f32, height: f32) -> DockResult<Size> {
        let min = self.config.min_panel_size;
        self.mutate("resize_panel_group", |layout, _| {
            layout.resize_panel_group(group, width, height, min)
        })
    }

    pub fn distribute_container(&mut self, edge: Edge, extent: f32) {
        self.layout.distribute_container(edge, extent);
        self.ctx.emit(DockEvent::LayoutChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundsMap;
    use crate::model::{Panel, PanelGroup};
    use std::sync::{Arc, Mutex};

    fn engine() -> DockEngine {
        let mut layout = Layout::new();
        layout.container_mut(Edge::Left).groups.push(
            PanelGroup::new("left", Direction::Row)
                .size(250.0, 800.0)
                .panel(Panel::new("files", "Files").tab(Tab::new("files-tab", "Files")).size(250.0, 400.0))
                .panel(Panel::new("outline", "Outline").tab(Tab::new("outline-tab", "Outline")).size(250.0, 400.0)),
        );
        DockEngine::new(layout, DockConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut layout = Layout::new();
        layout
            .container_mut(Edge::Left)
            .groups
            .push(PanelGroup::new("empty", Direction::Row));
        let err = DockEngine::new(layout, DockConfig::default()).unwrap_err();
        assert!(matches!(err, DockError::InvalidLayout(_)));
    }

    #[test]
    fn test_mutation_emits_layout_changed() {
        let mut engine = engine();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        engine.set_active_tab(&TabId::new("files-tab")).unwrap();
        assert!(engine.set_active_tab(&TabId::new("ghost")).is_err());
        assert_eq!(*seen.lock().unwrap(), vec![DockEvent::LayoutChanged]);
    }

    #[test]
    fn test_allowed_handles() {
        let engine = engine();
        assert_eq!(
            engine.allowed_handles(&ResizeTarget::Panel(PanelId::new("files"))),
            Ok(ResizeHandles::S)
        );
        assert_eq!(
            engine.allowed_handles(&ResizeTarget::Group(GroupId::new("left"))),
            Ok(ResizeHandles::E)
        );
    }

    #[test]
    fn test_disallowed_handle_is_invalid_target() {
        let mut engine = engine();
        let err = engine
            .start_resize(
                &BoundsMap::new(),
                ResizeTarget::Panel(PanelId::new("files")),
                ResizeHandle::E,
                Vec2::ZERO,
            )
            .unwrap_err();
        assert!(matches!(err, DockError::InvalidTarget(_)));
        assert!(!engine.is_resizing());
    }

    #[test]
    fn test_panel_resize_propagates_to_sibling() {
        let mut engine = engine();
        engine
            .start_resize(
                &BoundsMap::new(),
                ResizeTarget::Panel(PanelId::new("files")),
                ResizeHandle::S,
                Vec2::new(100.0, 400.0),
            )
            .unwrap();
        engine.on_resize(Vec2::new(100.0, 450.0)).unwrap();
        let rect = engine.end_resize(Vec2::new(100.0, 500.0)).unwrap();
        assert_eq!(rect.height, 500.0);

        let layout = engine.layout();
        let files = layout.panel(&PanelId::new("files")).unwrap().height;
        let outline = layout.panel(&PanelId::new("outline")).unwrap().height;
        // Outline is the last panel, so it never acts as the sibling.
        assert_eq!((files, outline), (500.0, 400.0));
    }

    #[test]
    fn test_float_resize_from_west_moves_origin() {
        let mut engine = engine();
        let float = engine
            .create_float_window(&PanelId::new("outline"), Vec2::new(400.0, 200.0), Some(Size::new(300.0, 200.0)))
            .unwrap();
        engine
            .start_resize(
                &BoundsMap::new(),
                ResizeTarget::Float(float.clone()),
                ResizeHandle::W,
                Vec2::new(400.0, 250.0),
            )
            .unwrap();
        engine.end_resize(Vec2::new(350.0, 250.0)).unwrap();

        let window = engine.layout().floating_window(&float).unwrap();
        assert_eq!((window.x, window.size().width), (350.0, 350.0));
    }
}
