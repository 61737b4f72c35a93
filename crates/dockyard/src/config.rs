//! Tunables for drag detection, hot zones, snapping and default sizing.

use dockyard_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::error::DockResult;
use crate::model::{DEFAULT_MIN_PANEL_SIZE, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH};

/// Distance from an outer edge that activates a container hot zone.
pub const DEFAULT_HOT_ZONE_SIZE: f32 = 50.0;
/// Distance from a docked element's edge that activates an adjacent-insert zone.
pub const DEFAULT_EDGE_ZONE_SIZE: f32 = 30.0;
/// Height of a panel's tab bar band.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 36.0;
/// Pointer travel in pixels before a pressed element starts dragging.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;
/// Snap tolerance in pixels (inclusive).
pub const DEFAULT_SNAP_TOLERANCE: f32 = 8.0;
/// Pixels of a floating window that must stay inside the root rectangle.
pub const DEFAULT_BOUNDARY_PADDING: f32 = 50.0;
/// First z-index handed out to floating windows.
pub const DEFAULT_BASE_Z_INDEX: u64 = 1000;

pub const DEFAULT_FLOAT_SIZE: Size = Size::new(300.0, 400.0);

/// Engine configuration.
///
/// Built with chained setters or deserialized from JSON; absent fields keep
/// their defaults.
///
/// ```
/// use dockyard::DockConfig;
///
/// let config = DockConfig::default().hot_zone_size(80.0).snap_enabled(false);
/// assert_eq!(config.hot_zone_size, 80.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub hot_zone_size: f32,
    pub edge_zone_size: f32,
    pub tab_bar_height: f32,
    pub drag_threshold: f32,
    pub snap_tolerance: f32,
    pub snap_enabled: bool,
    /// Lift docked elements into a floating window once a drag starts.
    /// When off, drags only move a preview until release.
    pub detach_on_drag: bool,
    pub default_float_size: Size,
    pub default_panel_size: Size,
    /// Lower bound for direct group resizes.
    pub min_panel_size: Size,
    pub boundary_padding: f32,
    pub base_z_index: u64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            hot_zone_size: DEFAULT_HOT_ZONE_SIZE,
            edge_zone_size: DEFAULT_EDGE_ZONE_SIZE,
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            snap_enabled: true,
            detach_on_drag: true,
            default_float_size: DEFAULT_FLOAT_SIZE,
            default_panel_size: Size::new(DEFAULT_PANEL_WIDTH, DEFAULT_PANEL_HEIGHT),
            min_panel_size: Size::new(DEFAULT_MIN_PANEL_SIZE, DEFAULT_MIN_PANEL_SIZE),
            boundary_padding: DEFAULT_BOUNDARY_PADDING,
            base_z_index: DEFAULT_BASE_Z_INDEX,
        }
    }
}

impl DockConfig {
    pub fn from_json(json: &str) -> DockResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the container hot zone size.
    pub fn hot_zone_size(mut self, size: f32) -> Self {
        self.hot_zone_size = size;
        self
    }

    /// Set the docked-element edge zone size.
    pub fn edge_zone_size(mut self, size: f32) -> Self {
        self.edge_zone_size = size;
        self
    }

    /// Set the tab bar height.
    pub fn tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = height;
        self
    }

    /// Set the drag threshold.
    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the snap tolerance.
    pub fn snap_tolerance(mut self, tolerance: f32) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    pub fn snap_enabled(mut self, enabled: bool) -> Self {
        self.snap_enabled = enabled;
        self
    }

    pub fn detach_on_drag(mut self, detach: bool) -> Self {
        self.detach_on_drag = detach;
        self
    }

    /// Set the size given to floating windows whose content has no size of its own.
    pub fn default_float_size(mut self, width: f32, height: f32) -> Self {
        self.default_float_size = Size::new(width, height);
        self
    }

    pub fn default_panel_size(mut self, width: f32, height: f32) -> Self {
        self.default_panel_size = Size::new(width, height);
        self
    }

    pub fn min_panel_size(mut self, width: f32, height: f32) -> Self {
        self.min_panel_size = Size::new(width, height);
        self
    }

    pub fn boundary_padding(mut self, padding: f32) -> Self {
        self.boundary_padding = padding;
        self
    }

    pub fn base_z_index(mut self, z: u64) -> Self {
        self.base_z_index = z;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DockConfig::from_json(r#"{ "hot_zone_size": 80.0, "snap_enabled": false }"#).unwrap();
        assert_eq!(config.hot_zone_size, 80.0);
        assert!(!config.snap_enabled);
        assert_eq!(config.tab_bar_height, DEFAULT_TAB_BAR_HEIGHT);
        assert_eq!(config.default_float_size, DEFAULT_FLOAT_SIZE);
    }

    #[test]
    fn test_builder_chain() {
        let config = DockConfig::default()
            .drag_threshold(3.0)
            .default_float_size(320.0, 240.0);
        assert_eq!(config.drag_threshold, 3.0);
        assert_eq!(config.default_float_size, Size::new(320.0, 240.0));
    }
}
