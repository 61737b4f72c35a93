//! Layout fixtures.

use dockyard::model::{Direction, Edge, FloatingWindow, Panel, PanelGroup, Tab};
use dockyard::{FloatId, Layout};
use dockyard_core::math::Vec2;

/// A panel with a single tab named `{id}-tab`.
pub fn panel(id: &str) -> Panel {
    let tab = format!("{id}-tab");
    tabbed_panel(id, &[tab.as_str()])
}

/// A panel holding `tabs`, the first of them active.
pub fn tabbed_panel(id: &str, tabs: &[&str]) -> Panel {
    tabs.iter()
        .fold(Panel::new(id, id), |panel, tab| panel.tab(Tab::new(*tab, *tab)))
}

pub fn group(id: &str, direction: Direction, panels: Vec<Panel>) -> PanelGroup {
    panels
        .into_iter()
        .fold(PanelGroup::new(id, direction), |group, panel| group.panel(panel))
}

/// Builds layouts in a few readable lines.
///
/// # Example
///
/// ```rust
/// use dockyard::model::{Direction, Edge};
/// use dockyard_core::math::Vec2;
/// use dockyard_test_utils::fixtures::{self, LayoutBuilder};
///
/// let layout = LayoutBuilder::new()
///     .dock(Edge::Left, fixtures::group("left", Direction::Row, vec![fixtures::panel("files")]))
///     .float("float-a", Vec2::new(100.0, 100.0), fixtures::group("g", Direction::Column, vec![fixtures::panel("a")]))
///     .build();
///
/// assert_eq!(layout.panel_count(), 2);
/// assert_eq!(layout.floating[0].z_index, 1001);
/// ```
#[derive(Debug)]
pub struct LayoutBuilder {
    layout: Layout,
    next_z: u64,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            layout: Layout::new(),
            next_z: dockyard::config::DEFAULT_BASE_Z_INDEX,
        }
    }

    /// Append `group` to the container on `edge`.
    pub fn dock(mut self, edge: Edge, group: PanelGroup) -> Self {
        self.layout.container_mut(edge).groups.push(group);
        self
    }

    /// Add a floating window above every window added before it.
    pub fn float(mut self, id: &str, origin: Vec2, group: PanelGroup) -> Self {
        self.next_z += 1;
        self.layout.floating.push(FloatingWindow {
            id: FloatId::new(id),
            x: origin.x,
            y: origin.y,
            z_index: self.next_z,
            groups: vec![group],
        });
        self
    }

    pub fn build(self) -> Layout {
        self.layout
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An editor-style layout inside a 1200 x 800 root:
///
/// - left: `explorer` (row) with `files` [`files-tab`, `git-tab`] over `outline`
/// - bottom: `bottom` (column) with `terminal` beside `problems`
/// - floating: `float-console` at (500, 200) holding `console`
pub fn ide_layout() -> Layout {
    LayoutBuilder::new()
        .dock(
            Edge::Left,
            group(
                "explorer",
                Direction::Row,
                vec![
                    tabbed_panel("files", &["files-tab", "git-tab"]).size(250.0, 300.0),
                    panel("outline").size(250.0, 300.0),
                ],
            )
            .size(250.0, 600.0),
        )
        .dock(
            Edge::Bottom,
            group(
                "bottom",
                Direction::Column,
                vec![
                    panel("terminal").size(600.0, 200.0),
                    panel("problems").size(600.0, 200.0),
                ],
            )
            .size(1200.0, 200.0),
        )
        .float(
            "float-console",
            Vec2::new(500.0, 200.0),
            group("console-group", Direction::Column, vec![panel("console").size(300.0, 200.0)])
                .size(300.0, 200.0),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ide_layout_is_valid() {
        let layout = ide_layout();
        assert!(layout.validate().is_empty());
        assert_eq!(layout.panel_count(), 5);
    }
}
