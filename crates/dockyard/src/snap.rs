//! Alignment snapping for floating windows.
//!
//! Each axis is solved independently. Alignment with another window wins
//! over alignment with the container; among candidates of the same kind the
//! closest one wins.

use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;
use dockyard_core::profiling::profile_function;

use crate::config::DEFAULT_SNAP_TOLERANCE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// A vertical line at an x coordinate.
    Vertical,
    /// A horizontal line at a y coordinate.
    Horizontal,
}

/// Guide line segment to draw while a snap is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub orientation: GuideOrientation,
    /// x for vertical guides, y for horizontal guides.
    pub position: f32,
    pub start: f32,
    pub end: f32,
}

/// What an axis snapped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Index into the `others` slice.
    Panel(usize),
    Container,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// Adjusted top-left corner.
    pub position: Vec2,
    pub guides: Vec<SnapGuide>,
    pub x: Option<SnapTarget>,
    pub y: Option<SnapTarget>,
}

impl SnapResult {
    pub fn is_snapped(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    offset: f32,
    distance: f32,
    target: SnapTarget,
    guide: SnapGuide,
}

fn closer(best: Option<Candidate>, next: Candidate) -> Option<Candidate> {
    match best {
        Some(current) if current.distance <= next.distance => Some(current),
        _ => Some(next),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SnapCalculator {
    /// Maximum distance, inclusive, at which edges snap.
    pub tolerance: f32,
}

impl Default for SnapCalculator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SNAP_TOLERANCE,
        }
    }
}

impl SnapCalculator {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Snap `dragged` against `others` and then `container`.
    pub fn snap(&self, dragged: Rect, others: &[Rect], container: Option<Rect>) -> SnapResult {
        profile_function!();

        let mut best_x = None;
        let mut best_y = None;
        for (index, other) in others.iter().enumerate() {
            let target = SnapTarget::Panel(index);
            if let Some(c) = self.panel_x(dragged, *other, target) {
                best_x = closer(best_x, c);
            }
            if let Some(c) = self.panel_y(dragged, *other, target) {
                best_y = closer(best_y, c);
            }
        }

        if let Some(container) = container {
            if best_x.is_none() {
                best_x = self.container_x(dragged, container);
            }
            if best_y.is_none() {
                best_y = self.container_y(dragged, container);
            }
        }

        let mut position = dragged.origin();
        let mut guides = Vec::new();
        if let Some(c) = best_x {
            position.x += c.offset;
            guides.push(c.guide);
        }
        if let Some(c) = best_y {
            position.y += c.offset;
            guides.push(c.guide);
        }
        SnapResult {
            position,
            guides,
            x: best_x.map(|c| c.target),
            y: best_y.map(|c| c.target),
        }
    }

    /// First matching pair wins, in the order given.
    fn first_match(
        &self,
        pairs: &[(f32, f32)],
        target: SnapTarget,
        guide: impl Fn(f32) -> SnapGuide,
    ) -> Option<Candidate> {
        pairs.iter().find_map(|&(ours, theirs)| {
            let distance = (ours - theirs).abs();
            (distance <= self.tolerance).then(|| Candidate {
                offset: theirs - ours,
                distance,
                target,
                guide: guide(theirs),
            })
        })
    }

    fn panel_x(&self, dragged: Rect, other: Rect, target: SnapTarget) -> Option<Candidate> {
        let pairs = [
            (dragged.left(), other.left()),
            (dragged.right(), other.right()),
            (dragged.center_x(), other.center_x()),
            (dragged.left(), other.right()),
            (dragged.right(), other.left()),
        ];
        let start = dragged.top().min(other.top());
        let end = dragged.bottom().max(other.bottom());
        self.first_match(&pairs, target, |x| SnapGuide {
            orientation: GuideOrientation::Vertical,
            position: x,
            start,
            end,
        })
    }

    fn panel_y(&self, dragged: Rect, other: Rect, target: SnapTarget) -> Option<Candidate> {
        let pairs = [
            (dragged.top(), other.top()),
            (dragged.bottom(), other.bottom()),
            (dragged.center_y(), other.center_y()),
            (dragged.top(), other.bottom()),
            (dragged.bottom(), other.top()),
        ];
        let start = dragged.left().min(other.left());
        let end = dragged.right().max(other.right());
        self.first_match(&pairs, target, |y| SnapGuide {
            orientation: GuideOrientation::Horizontal,
            position: y,
            start,
            end,
        })
    }

    fn container_x(&self, dragged: Rect, container: Rect) -> Option<Candidate> {
        let pairs = [
            (dragged.left(), container.left()),
            (dragged.right(), container.right()),
        ];
        self.first_match(&pairs, SnapTarget::Container, |x| SnapGuide {
            orientation: GuideOrientation::Vertical,
            position: x,
            start: container.top(),
            end: container.bottom(),
        })
    }

    fn container_y(&self, dragged: Rect, container: Rect) -> Option<Candidate> {
        let pairs = [
            (dragged.top(), container.top()),
            (dragged.bottom(), container.bottom()),
        ];
        self.first_match(&pairs, SnapTarget::Container, |y| SnapGuide {
            orientation: GuideOrientation::Horizontal,
            position: y,
            start: container.left(),
            end: container.right(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn test_left_edges_within_tolerance_snap() {
        let snap = SnapCalculator::new(8.0);
        let other = Rect::new(200.0, 100.0, 150.0, 100.0);
        let dragged = Rect::new(207.0, 400.0, 60.0, 90.0);

        let result = snap.snap(dragged, &[other], None);
        assert_eq!(result.position.x, 200.0);
        assert_eq!(result.x, Some(SnapTarget::Panel(0)));
        assert_eq!(result.guides[0].orientation, GuideOrientation::Vertical);
        assert_eq!(result.guides[0].position, 200.0);
        assert_eq!((result.guides[0].start, result.guides[0].end), (100.0, 490.0));
    }

    #[test]
    fn test_left_edges_outside_tolerance_do_not_snap() {
        let snap = SnapCalculator::new(8.0);
        let other = Rect::new(200.0, 100.0, 150.0, 100.0);
        let dragged = Rect::new(209.0, 400.0, 60.0, 90.0);

        let result = snap.snap(dragged, &[other], None);
        assert_eq!(result.position, dragged.origin());
        assert!(result.guides.is_empty());
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let snap = SnapCalculator::new(8.0);
        let other = Rect::new(200.0, 100.0, 150.0, 100.0);
        let dragged = Rect::new(208.0, 400.0, 60.0, 90.0);
        assert_eq!(snap.snap(dragged, &[other], None).position.x, 200.0);
    }

    #[test]
    fn test_abutting_edges_snap() {
        let snap = SnapCalculator::default();
        let other = Rect::new(100.0, 100.0, 100.0, 100.0);
        // Dragged left edge 4px right of the other's right edge.
        let dragged = Rect::new(204.0, 300.0, 50.0, 50.0);
        assert_eq!(snap.snap(dragged, &[other], None).position.x, 200.0);
    }

    #[test]
    fn test_center_alignment() {
        let snap = SnapCalculator::default();
        let other = Rect::new(100.0, 100.0, 200.0, 100.0);
        let dragged = Rect::new(153.0, 500.0, 100.0, 60.0);
        // Dragged center 203 vs other center 200.
        assert_eq!(snap.snap(dragged, &[other], None).position.x, 150.0);
    }

    #[test]
    fn test_panel_wins_over_container_per_axis() {
        let snap = SnapCalculator::default();
        let other = Rect::new(6.0, 300.0, 100.0, 100.0);
        let dragged = Rect::new(3.0, 5.0, 100.0, 100.0);

        let result = snap.snap(dragged, &[other], Some(CONTAINER));
        assert_eq!(result.x, Some(SnapTarget::Panel(0)));
        assert_eq!(result.position.x, 6.0);
        assert_eq!(result.y, Some(SnapTarget::Container));
        assert_eq!(result.position.y, 0.0);
        assert_eq!(result.guides.len(), 2);
    }

    #[test]
    fn test_container_right_edge() {
        let snap = SnapCalculator::default();
        let dragged = Rect::new(895.0, 300.0, 100.0, 100.0);
        let result = snap.snap(dragged, &[], Some(CONTAINER));
        assert_eq!(result.position.x, 900.0);
        assert_eq!(result.guides[0].start, 0.0);
        assert_eq!(result.guides[0].end, 800.0);
    }

    #[test]
    fn test_closest_panel_wins() {
        let snap = SnapCalculator::default();
        let far = Rect::new(106.0, 0.0, 50.0, 50.0);
        let near = Rect::new(101.0, 600.0, 50.0, 50.0);
        let dragged = Rect::new(100.0, 300.0, 50.0, 50.0);
        let result = snap.snap(dragged, &[far, near], None);
        assert_eq!(result.x, Some(SnapTarget::Panel(1)));
        assert_eq!(result.position.x, 101.0);
    }
}
