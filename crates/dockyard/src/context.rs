//! Shared docking context: the single drag slot, z-order counter, id
//! allocator and observer list.
//!
//! One context is passed explicitly into the drag state machine and the
//! mutation engine so that there is no process-wide state.

use dockyard_core::geometry::Size;

use crate::config::{DEFAULT_FLOAT_SIZE, DockConfig};
use crate::drag::DragPayload;
use crate::error::{DockError, DockResult};
use crate::event::{DockEvent, EventBus};
use crate::id::{FloatId, GroupId, IdAllocator, PanelId};
use crate::model::Layout;

#[derive(Debug)]
pub struct DockingContext {
    ids: IdAllocator,
    next_z: u64,
    /// Payload of the drag currently holding the slot.
    drag_slot: Option<DragPayload>,
    /// Size given to new floating windows whose source has no size yet.
    pub default_float_size: Size,
    pub events: EventBus,
}

impl DockingContext {
    pub fn new(base_z_index: u64) -> Self {
        Self {
            ids: IdAllocator::new(),
            next_z: base_z_index,
            drag_slot: None,
            default_float_size: DEFAULT_FLOAT_SIZE,
            events: EventBus::new(),
        }
    }

    pub fn from_config(config: &DockConfig) -> Self {
        Self {
            default_float_size: config.default_float_size,
            ..Self::new(config.base_z_index)
        }
    }

    /// Make sure future z-indices exceed every window already in `layout`.
    pub fn sync_z_order(&mut self, layout: &Layout) {
        self.next_z = self.next_z.max(layout.max_z_index());
    }

    /// Next z-index; strictly greater than any handed out before.
    pub fn next_z_index(&mut self) -> u64 {
        self.next_z += 1;
        self.next_z
    }

    pub fn new_panel_id(&mut self, layout: &Layout) -> PanelId {
        PanelId::new(self.ids.allocate("panel", |id| layout.contains_id(id)))
    }

    pub fn new_group_id(&mut self, layout: &Layout) -> GroupId {
        GroupId::new(self.ids.allocate("group", |id| layout.contains_id(id)))
    }

    pub fn new_float_id(&mut self, layout: &Layout) -> FloatId {
        FloatId::new(self.ids.allocate("float", |id| layout.contains_id(id)))
    }

    /// Take the drag slot for `payload`.
    pub fn claim_drag(&mut self, payload: DragPayload) -> DockResult<()> {
        if self.drag_slot.is_some() {
            return Err(DockError::DragInProgress);
        }
        self.drag_slot = Some(payload);
        Ok(())
    }

    /// Re-point the slot after the payload was lifted into a new node.
    pub fn rebind_drag(&mut self, payload: DragPayload) {
        if self.drag_slot.is_some() {
            self.drag_slot = Some(payload);
        }
    }

    pub fn release_drag(&mut self) -> Option<DragPayload> {
        self.drag_slot.take()
    }

    pub fn current_drag(&self) -> Option<&DragPayload> {
        self.drag_slot.as_ref()
    }

    pub fn emit(&mut self, event: DockEvent) {
        self.events.emit(event);
    }
}

impl Default for DockingContext {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BASE_Z_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::PanelId;

    #[test]
    fn test_z_index_strictly_increases() {
        let mut ctx = DockingContext::new(1000);
        let a = ctx.next_z_index();
        let b = ctx.next_z_index();
        assert_eq!(a, 1001);
        assert!(b > a);
    }

    #[test]
    fn test_from_config() {
        let config = DockConfig::default().base_z_index(50).default_float_size(640.0, 480.0);
        let mut ctx = DockingContext::from_config(&config);
        assert_eq!(ctx.default_float_size, Size::new(640.0, 480.0));
        assert_eq!(ctx.next_z_index(), 51);
    }

    #[test]
    fn test_single_drag_slot() {
        let mut ctx = DockingContext::default();
        let payload = DragPayload::Panel(PanelId::new("a"));
        ctx.claim_drag(payload.clone()).unwrap();
        assert_eq!(
            ctx.claim_drag(DragPayload::Panel(PanelId::new("b"))),
            Err(DockError::DragInProgress)
        );
        assert_eq!(ctx.release_drag(), Some(payload));
        assert!(ctx.current_drag().is_none());
    }
}
