//! Id-based lookup of nodes in the layout tree.
//!
//! Every lookup is a full scan: containers in edge order first, then
//! floating windows. Locations are only valid until the next mutation.

use crate::id::{GroupId, PanelId, TabId};
use crate::model::{Layout, RootRef};

/// Position of a group within its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLocation {
    pub root: RootRef,
    pub group_id: GroupId,
    pub group_index: usize,
}

/// Position of a panel within the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLocation {
    pub root: RootRef,
    pub group_id: GroupId,
    pub group_index: usize,
    pub panel_index: usize,
}

/// Position of a tab within the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLocation {
    pub panel: PanelLocation,
    pub panel_id: PanelId,
    pub tab_index: usize,
}

impl Layout {
    pub fn locate_group(&self, group: &GroupId) -> Option<GroupLocation> {
        self.roots().find_map(|root| {
            let groups = self.root_groups(&root)?;
            let group_index = groups.iter().position(|g| &g.id == group)?;
            Some(GroupLocation {
                root,
                group_id: group.clone(),
                group_index,
            })
        })
    }

    pub fn locate(&self, panel: &PanelId) -> Option<PanelLocation> {
        self.roots().find_map(|root| {
            let groups = self.root_groups(&root)?;
            groups.iter().enumerate().find_map(|(group_index, g)| {
                let panel_index = g.panel_index(panel)?;
                Some(PanelLocation {
                    root: root.clone(),
                    group_id: g.id.clone(),
                    group_index,
                    panel_index,
                })
            })
        })
    }

    pub fn locate_tab(&self, tab: &TabId) -> Option<TabLocation> {
        self.roots().find_map(|root| {
            let groups = self.root_groups(&root)?;
            groups.iter().enumerate().find_map(|(group_index, g)| {
                g.panels.iter().enumerate().find_map(|(panel_index, p)| {
                    let tab_index = p.tab_index(tab)?;
                    Some(TabLocation {
                        panel: PanelLocation {
                            root: root.clone(),
                            group_id: g.id.clone(),
                            group_index,
                            panel_index,
                        },
                        panel_id: p.id.clone(),
                        tab_index,
                    })
                })
            })
        })
    }

    /// All roots in scan order.
    pub fn roots(&self) -> impl Iterator<Item = RootRef> + '_ {
        self.containers
            .iter()
            .map(|c| RootRef::Container(c.edge))
            .chain(self.floating.iter().map(|f| RootRef::Float(f.id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::FloatId;
    use crate::model::{Direction, Edge, FloatingWindow, Panel, PanelGroup, Tab};

    fn layout() -> Layout {
        let mut layout = Layout::new();
        layout.container_mut(Edge::Right).groups.push(
            PanelGroup::new("outline-group", Direction::Row)
                .panel(Panel::new("outline", "Outline").tab(Tab::new("outline-tab", "Outline")))
                .panel(
                    Panel::new("search", "Search")
                        .tab(Tab::new("search-tab", "Search"))
                        .tab(Tab::new("replace-tab", "Replace")),
                ),
        );
        layout.floating.push(FloatingWindow {
            id: FloatId::new("float"),
            x: 10.0,
            y: 10.0,
            z_index: 1001,
            groups: vec![PanelGroup::new("float-group", Direction::Column)
                .panel(Panel::new("terminal", "Terminal").tab(Tab::new("term-tab", "Terminal")))],
        });
        layout
    }

    #[test]
    fn test_locate_docked_panel() {
        let loc = layout().locate(&PanelId::new("search")).unwrap();
        assert_eq!(loc.root, RootRef::Container(Edge::Right));
        assert_eq!(loc.group_id, GroupId::new("outline-group"));
        assert_eq!(loc.panel_index, 1);
    }

    #[test]
    fn test_locate_floating_panel() {
        let loc = layout().locate(&PanelId::new("terminal")).unwrap();
        assert_eq!(loc.root, RootRef::Float(FloatId::new("float")));
        assert_eq!(loc.group_index, 0);
    }

    #[test]
    fn test_locate_tab_reports_owner() {
        let loc = layout().locate_tab(&TabId::new("replace-tab")).unwrap();
        assert_eq!(loc.panel_id, PanelId::new("search"));
        assert_eq!(loc.tab_index, 1);
    }

    #[test]
    fn test_missing_ids_are_none() {
        let layout = layout();
        assert!(layout.locate(&PanelId::new("nope")).is_none());
        assert!(layout.locate_tab(&TabId::new("nope")).is_none());
        assert!(layout.locate_group(&GroupId::new("nope")).is_none());
    }
}
