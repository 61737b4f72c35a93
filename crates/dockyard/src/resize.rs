//! Handle-based resizing of panels, groups and floating windows.

use bitflags::bitflags;
use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

use crate::error::{DockError, DockResult};
use crate::id::{FloatId, GroupId, PanelId};
use crate::model::{Axis, PanelConstraints};

/// A resize handle on an element's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    /// Bottom-right corner; resizes both axes.
    SE,
}

bitflags! {
    /// Set of handles an element exposes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizeHandles: u8 {
        const N = 1 << 0;
        const S = 1 << 1;
        const E = 1 << 2;
        const W = 1 << 3;
        const SE = 1 << 4;
    }
}

impl ResizeHandle {
    pub fn flag(self) -> ResizeHandles {
        match self {
            ResizeHandle::N => ResizeHandles::N,
            ResizeHandle::S => ResizeHandles::S,
            ResizeHandle::E => ResizeHandles::E,
            ResizeHandle::W => ResizeHandles::W,
            ResizeHandle::SE => ResizeHandles::SE,
        }
    }

    /// Whether this handle changes the extent on `axis`.
    pub fn affects(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => matches!(self, ResizeHandle::E | ResizeHandle::W | ResizeHandle::SE),
            Axis::Vertical => matches!(self, ResizeHandle::N | ResizeHandle::S | ResizeHandle::SE),
        }
    }
}

/// Element being resized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResizeTarget {
    Panel(PanelId),
    Group(GroupId),
    Float(FloatId),
}

/// Captured state of one resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub target: ResizeTarget,
    pub handle: ResizeHandle,
    pub start_pointer: Vec2,
    pub start_rect: Rect,
    pub constraints: PanelConstraints,
    /// N and W handles move the origin so the opposite edge stays put.
    /// Only floating windows allow this.
    pub allow_position_change: bool,
}

impl ResizeSession {
    /// Rectangle for the current pointer position.
    pub fn rect_at(&self, pointer: Vec2) -> Rect {
        let delta = pointer - self.start_pointer;
        let start = self.start_rect;
        let mut rect = start;

        match self.handle {
            ResizeHandle::E => {
                rect.width = self.constraints.clamp(Axis::Horizontal, start.width + delta.x);
            }
            ResizeHandle::S => {
                rect.height = self.constraints.clamp(Axis::Vertical, start.height + delta.y);
            }
            ResizeHandle::SE => {
                rect.width = self.constraints.clamp(Axis::Horizontal, start.width + delta.x);
                rect.height = self.constraints.clamp(Axis::Vertical, start.height + delta.y);
            }
            ResizeHandle::W => {
                rect.width = self.constraints.clamp(Axis::Horizontal, start.width - delta.x);
                if self.allow_position_change {
                    rect.x = start.x + (start.width - rect.width);
                }
            }
            ResizeHandle::N => {
                rect.height = self.constraints.clamp(Axis::Vertical, start.height - delta.y);
                if self.allow_position_change {
                    rect.y = start.y + (start.height - rect.height);
                }
            }
        }
        rect
    }
}

/// Tracks at most one resize gesture.
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a resize. Replaces any gesture still in progress.
    pub fn start(&mut self, session: ResizeSession) {
        if let Some(previous) = self.session.replace(session) {
            tracing::debug!(previous = ?previous.target, "resize replaced before release");
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Rectangle for `pointer` in the active gesture.
    pub fn update(&self, pointer: Vec2) -> DockResult<(ResizeTarget, Rect)> {
        let session = self.session.as_ref().ok_or(DockError::NoActiveResize)?;
        Ok((session.target.clone(), session.rect_at(pointer)))
    }

    /// Finish the gesture, returning the final rectangle.
    pub fn end(&mut self, pointer: Vec2) -> DockResult<(ResizeTarget, Rect)> {
        let session = self.session.take().ok_or(DockError::NoActiveResize)?;
        let rect = session.rect_at(pointer);
        Ok((session.target, rect))
    }

    /// Abandon the gesture, returning the rectangle it started from.
    pub fn cancel(&mut self) -> Option<(ResizeTarget, Rect)> {
        self.session.take().map(|s| (s.target, s.start_rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(handle: ResizeHandle, floating: bool) -> ResizeSession {
        ResizeSession {
            target: ResizeTarget::Float(FloatId::new("f")),
            handle,
            start_pointer: Vec2::new(500.0, 500.0),
            start_rect: Rect::new(100.0, 100.0, 300.0, 200.0),
            constraints: PanelConstraints::min(50.0).with_max(Axis::Horizontal, 400.0),
            allow_position_change: floating,
        }
    }

    #[test]
    fn test_east_handle_grows_width() {
        let rect = session(ResizeHandle::E, false).rect_at(Vec2::new(550.0, 900.0));
        assert_eq!(rect, Rect::new(100.0, 100.0, 350.0, 200.0));
    }

    #[test]
    fn test_width_clamped_to_max() {
        let rect = session(ResizeHandle::E, false).rect_at(Vec2::new(900.0, 500.0));
        assert_eq!(rect.width, 400.0);
    }

    #[test]
    fn test_floating_west_handle_keeps_right_edge() {
        let rect = session(ResizeHandle::W, true).rect_at(Vec2::new(450.0, 500.0));
        assert_eq!(rect.width, 350.0);
        assert_eq!(rect.x, 50.0);
        assert_eq!(rect.right(), 400.0);
    }

    #[test]
    fn test_floating_north_handle_clamps_then_shifts() {
        let rect = session(ResizeHandle::N, true).rect_at(Vec2::new(500.0, 700.0));
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.y, 250.0);
        assert_eq!(rect.bottom(), 300.0);
    }

    #[test]
    fn test_docked_north_handle_never_moves_origin() {
        let rect = session(ResizeHandle::N, false).rect_at(Vec2::new(500.0, 450.0));
        assert_eq!(rect.height, 250.0);
        assert_eq!(rect.y, 100.0);
    }

    #[test]
    fn test_south_east_resizes_both_axes() {
        let rect = session(ResizeHandle::SE, false).rect_at(Vec2::new(520.0, 530.0));
        assert_eq!((rect.width, rect.height), (320.0, 230.0));
    }

    #[test]
    fn test_controller_lifecycle() {
        let mut controller = ResizeController::new();
        assert_eq!(controller.update(Vec2::ZERO), Err(DockError::NoActiveResize));

        controller.start(session(ResizeHandle::S, false));
        let (_, rect) = controller.update(Vec2::new(500.0, 520.0)).unwrap();
        assert_eq!(rect.height, 220.0);

        let (target, rect) = controller.end(Vec2::new(500.0, 540.0)).unwrap();
        assert_eq!(target, ResizeTarget::Float(FloatId::new("f")));
        assert_eq!(rect.height, 240.0);
        assert!(!controller.is_resizing());
    }

    #[test]
    fn test_handle_flags() {
        let allowed = ResizeHandles::E | ResizeHandles::S;
        assert!(allowed.contains(ResizeHandle::S.flag()));
        assert!(!allowed.contains(ResizeHandle::W.flag()));
        assert!(ResizeHandle::SE.affects(Axis::Horizontal));
        assert!(!ResizeHandle::N.affects(Axis::Horizontal));
    }
}
