//! The layout tree: containers, groups, panels, tabs and floating windows.
//!
//! Ownership is a strict tree. Each [`Tab`] belongs to one [`Panel`], each
//! panel to one [`PanelGroup`], and each group to either one of the four
//! edge [`Container`]s or one [`FloatingWindow`].

use std::fmt;

use dockyard_core::alloc::HashSet;
use dockyard_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::error::{DockError, DockResult};
use crate::id::{FloatId, GroupId, PanelId, TabId};

/// Default panel width when plain data omits it.
pub const DEFAULT_PANEL_WIDTH: f32 = 200.0;
/// Default panel height when plain data omits it.
pub const DEFAULT_PANEL_HEIGHT: f32 = 150.0;
/// Default minimum panel extent on either axis.
pub const DEFAULT_MIN_PANEL_SIZE: f32 = 50.0;

/// One of the four fixed docking edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Edges in hit-test order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Right => 1,
            Edge::Top => 2,
            Edge::Bottom => 3,
        }
    }

    /// The axis along which groups docked on this edge are stacked.
    pub fn stacking_axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Vertical,
            Edge::Top | Edge::Bottom => Axis::Horizontal,
        }
    }

    /// Direction given to groups created on this edge.
    pub fn default_direction(self) -> Direction {
        match self.stacking_axis() {
            Axis::Vertical => Direction::Row,
            Axis::Horizontal => Direction::Column,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Widths and x coordinates.
    Horizontal,
    /// Heights and y coordinates.
    Vertical,
}

/// Arrangement of panels inside a group.
///
/// The direction selects which panel extent takes part in neighbor resize
/// propagation: heights for `Row`, widths for `Column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    #[default]
    Column,
}

impl Direction {
    pub fn resize_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::Vertical,
            Direction::Column => Axis::Horizontal,
        }
    }
}

/// Size constraints for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConstraints {
    pub min_width: f32,
    pub min_height: f32,
    /// Maximum width in pixels (None = unlimited).
    pub max_width: Option<f32>,
    /// Maximum height in pixels (None = unlimited).
    pub max_height: Option<f32>,
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_PANEL_SIZE,
            min_height: DEFAULT_MIN_PANEL_SIZE,
            max_width: None,
            max_height: None,
        }
    }
}

impl PanelConstraints {
    /// Create constraints with a minimum size on both axes.
    pub fn min(min_size: f32) -> Self {
        Self {
            min_width: min_size,
            min_height: min_size,
            max_width: None,
            max_height: None,
        }
    }

    /// Set the maximum extent on one axis.
    pub fn with_max(mut self, axis: Axis, max: f32) -> Self {
        match axis {
            Axis::Horizontal => self.max_width = Some(max),
            Axis::Vertical => self.max_height = Some(max),
        }
        self
    }

    pub fn min_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    pub fn max_on(&self, axis: Axis) -> f32 {
        let max = match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        };
        max.unwrap_or(f32::INFINITY)
    }

    /// Clamp an extent on `axis` to the constraints.
    pub fn clamp(&self, axis: Axis, size: f32) -> f32 {
        size.max(self.min_on(axis)).min(self.max_on(axis))
    }
}

/// Single content unit within a panel; the finest draggable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_closable")]
    pub closable: bool,
    /// Opaque reference the host uses to find the tab's content.
    #[serde(default)]
    pub content: String,
}

fn default_closable() -> bool {
    true
}

impl Tab {
    pub fn new(id: impl Into<TabId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            closable: true,
            content: String::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Resizable unit holding one or more tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    #[serde(default)]
    pub name: String,
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub active_tab: Option<TabId>,
    #[serde(default = "default_panel_width")]
    pub width: f32,
    #[serde(default = "default_panel_height")]
    pub height: f32,
    /// Size the panel was created or loaded with.
    #[serde(default)]
    pub original_size: Option<Size>,
    #[serde(default)]
    pub constraints: PanelConstraints,
}

fn default_panel_width() -> f32 {
    DEFAULT_PANEL_WIDTH
}

fn default_panel_height() -> f32 {
    DEFAULT_PANEL_HEIGHT
}

impl Panel {
    pub fn new(id: impl Into<PanelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tabs: Vec::new(),
            active_tab: None,
            width: DEFAULT_PANEL_WIDTH,
            height: DEFAULT_PANEL_HEIGHT,
            original_size: None,
            constraints: PanelConstraints::default(),
        }
    }

    /// Append a tab. The first tab added becomes active.
    pub fn tab(mut self, tab: Tab) -> Self {
        if self.active_tab.is_none() {
            self.active_tab = Some(tab.id.clone());
        }
        self.tabs.push(tab);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn constraints(mut self, constraints: PanelConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// The size recorded at creation, falling back to the current size.
    pub fn original(&self) -> Size {
        self.original_size.unwrap_or(Size::new(self.width, self.height))
    }

    pub fn tab_index(&self, tab: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == tab)
    }

    /// Re-point `active_tab` at a live tab after `removed_index` was taken out.
    pub(crate) fn repair_active_tab(&mut self, removed: &TabId, removed_index: usize) {
        let still_valid = self
            .active_tab
            .as_ref()
            .is_some_and(|active| active != removed && self.tab_index(active).is_some());
        if still_valid {
            return;
        }
        self.active_tab = if self.tabs.is_empty() {
            None
        } else {
            let next = removed_index.min(self.tabs.len() - 1);
            Some(self.tabs[next].id.clone())
        };
    }
}

/// Ordered row or column of panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGroup {
    pub id: GroupId,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_panel_width")]
    pub width: f32,
    #[serde(default = "default_panel_height")]
    pub height: f32,
    pub panels: Vec<Panel>,
}

impl PanelGroup {
    pub fn new(id: impl Into<GroupId>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            direction,
            width: DEFAULT_PANEL_WIDTH,
            height: DEFAULT_PANEL_HEIGHT,
            panels: Vec::new(),
        }
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    pub fn panel_index(&self, panel: &PanelId) -> Option<usize> {
        self.panels.iter().position(|p| &p.id == panel)
    }
}

/// Fixed edge-anchored region holding docked groups. Never destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    pub edge: Edge,
    pub groups: Vec<PanelGroup>,
}

impl Container {
    pub fn new(edge: Edge) -> Self {
        Self {
            id: format!("container-{edge}"),
            edge,
            groups: Vec::new(),
        }
    }
}

/// The four edge containers, indexable by [`Edge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContainersData", into = "ContainersData")]
pub struct Containers([Container; 4]);

impl Default for Containers {
    fn default() -> Self {
        Self(Edge::ALL.map(Container::new))
    }
}

impl Containers {
    pub fn get(&self, edge: Edge) -> &Container {
        &self.0[edge.index()]
    }

    pub fn get_mut(&mut self, edge: Edge) -> &mut Container {
        &mut self.0[edge.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.0.iter_mut()
    }
}

/// Plain-data shape of the containers: one group list per edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ContainersData {
    left: Vec<PanelGroup>,
    right: Vec<PanelGroup>,
    top: Vec<PanelGroup>,
    bottom: Vec<PanelGroup>,
}

impl From<ContainersData> for Containers {
    fn from(data: ContainersData) -> Self {
        let mut containers = Containers::default();
        containers.get_mut(Edge::Left).groups = data.left;
        containers.get_mut(Edge::Right).groups = data.right;
        containers.get_mut(Edge::Top).groups = data.top;
        containers.get_mut(Edge::Bottom).groups = data.bottom;
        containers
    }
}

impl From<Containers> for ContainersData {
    fn from(containers: Containers) -> Self {
        let [left, right, top, bottom] = containers.0;
        Self {
            left: left.groups,
            right: right.groups,
            top: top.groups,
            bottom: bottom.groups,
        }
    }
}

/// Independent, freely positioned, z-ordered top-level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingWindow {
    pub id: FloatId,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z_index: u64,
    pub groups: Vec<PanelGroup>,
}

impl FloatingWindow {
    /// Size of the window, taken from its primary group.
    pub fn size(&self) -> Size {
        self.groups
            .first()
            .map(|g| Size::new(g.width, g.height))
            .unwrap_or_default()
    }
}

/// Where a group lives: one of the edge containers or a floating window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RootRef {
    Container(Edge),
    Float(FloatId),
}

/// A whole docking layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub containers: Containers,
    #[serde(default)]
    pub floating: Vec<FloatingWindow>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a layout from JSON and validate it.
    pub fn from_json(json: &str) -> DockResult<Self> {
        let layout: Layout = serde_json::from_str(json)?;
        let issues = layout.validate();
        if !issues.is_empty() {
            return Err(DockError::InvalidLayout(issues));
        }
        Ok(layout)
    }

    pub fn to_json(&self) -> DockResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn container(&self, edge: Edge) -> &Container {
        self.containers.get(edge)
    }

    pub fn container_mut(&mut self, edge: Edge) -> &mut Container {
        self.containers.get_mut(edge)
    }

    pub fn floating_window(&self, id: &FloatId) -> Option<&FloatingWindow> {
        self.floating.iter().find(|f| &f.id == id)
    }

    pub fn floating_window_mut(&mut self, id: &FloatId) -> Option<&mut FloatingWindow> {
        self.floating.iter_mut().find(|f| &f.id == id)
    }

    /// Floating windows from frontmost to backmost.
    pub fn floating_by_z(&self) -> Vec<&FloatingWindow> {
        let mut windows: Vec<_> = self.floating.iter().collect();
        windows.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        windows
    }

    pub fn max_z_index(&self) -> u64 {
        self.floating.iter().map(|f| f.z_index).max().unwrap_or(0)
    }

    pub fn root_groups(&self, root: &RootRef) -> Option<&Vec<PanelGroup>> {
        match root {
            RootRef::Container(edge) => Some(&self.container(*edge).groups),
            RootRef::Float(id) => self.floating_window(id).map(|f| &f.groups),
        }
    }

    pub fn root_groups_mut(&mut self, root: &RootRef) -> Option<&mut Vec<PanelGroup>> {
        match root {
            RootRef::Container(edge) => Some(&mut self.container_mut(*edge).groups),
            RootRef::Float(id) => self.floating_window_mut(id).map(|f| &mut f.groups),
        }
    }

    /// Every group with its root, containers first then floating windows.
    pub fn groups(&self) -> impl Iterator<Item = (RootRef, &PanelGroup)> {
        let docked = self
            .containers
            .iter()
            .flat_map(|c| c.groups.iter().map(move |g| (RootRef::Container(c.edge), g)));
        let floating = self
            .floating
            .iter()
            .flat_map(|f| f.groups.iter().map(move |g| (RootRef::Float(f.id.clone()), g)));
        docked.chain(floating)
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.groups().flat_map(|(_, g)| g.panels.iter())
    }

    pub fn group(&self, id: &GroupId) -> Option<&PanelGroup> {
        self.groups().map(|(_, g)| g).find(|g| &g.id == id)
    }

    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.panels().find(|p| &p.id == id)
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.panels().flat_map(|p| p.tabs.iter()).find(|t| &t.id == id)
    }

    pub fn groups_mut(&mut self) -> impl Iterator<Item = &mut PanelGroup> {
        let docked = self.containers.iter_mut().flat_map(|c| c.groups.iter_mut());
        let floating = self.floating.iter_mut().flat_map(|f| f.groups.iter_mut());
        docked.chain(floating)
    }

    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut PanelGroup> {
        self.groups_mut().find(|g| &g.id == id)
    }

    pub fn panel_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.groups_mut()
            .flat_map(|g| g.panels.iter_mut())
            .find(|p| &p.id == id)
    }

    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }

    /// Whether any node in the tree already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.containers.iter().any(|c| c.id == id)
            || self.floating.iter().any(|f| f.id.as_str() == id)
            || self.groups().any(|(_, g)| {
                g.id.as_str() == id
                    || g.panels.iter().any(|p| {
                        p.id.as_str() == id || p.tabs.iter().any(|t| t.id.as_str() == id)
                    })
            })
    }

    /// Structural problems in the tree; empty when the layout is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen: HashSet<String> = self.containers.iter().map(|c| c.id.clone()).collect();
        let mut check_unique = |id: &str, issues: &mut Vec<String>| {
            if !seen.insert(id.to_owned()) {
                issues.push(format!("duplicate id `{id}`"));
            }
        };

        for window in &self.floating {
            check_unique(window.id.as_str(), &mut issues);
            if window.groups.is_empty() {
                issues.push(format!("floating window `{}` has no groups", window.id));
            }
        }
        for (_, group) in self.groups() {
            check_unique(group.id.as_str(), &mut issues);
            if group.panels.is_empty() {
                issues.push(format!("group `{}` has no panels", group.id));
            }
            for panel in &group.panels {
                check_unique(panel.id.as_str(), &mut issues);
                if panel.tabs.is_empty() {
                    issues.push(format!("panel `{}` has no tabs", panel.id));
                }
                for tab in &panel.tabs {
                    check_unique(tab.id.as_str(), &mut issues);
                }
                if let Some(active) = &panel.active_tab
                    && panel.tab_index(active).is_none()
                {
                    issues.push(format!(
                        "panel `{}` marks missing tab `{active}` active",
                        panel.id
                    ));
                }
            }
        }
        issues
    }
}

static_assertions::assert_impl_all!(Layout: Send, Sync, Clone);
