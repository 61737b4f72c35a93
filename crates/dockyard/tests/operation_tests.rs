//! Structural properties of the mutation engine.

use dockyard::model::{Direction, Edge, PanelConstraints};
use dockyard::{DockingContext, GroupId, Layout, PanelId, TabId};
use dockyard_core::alloc::HashSet;
use dockyard_core::math::Vec2;
use dockyard_test_utils::{LayoutBuilder, fixtures};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn panel_ids(layout: &Layout, group: &str) -> Vec<String> {
    layout
        .group(&GroupId::new(group))
        .map(|g| g.panels.iter().map(|p| p.id.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_last_tab_moved_out_destroys_panel() {
    let mut layout = fixtures::ide_layout();
    layout
        .insert_tab_to_panel(&TabId::new("outline-tab"), &PanelId::new("files"), 0)
        .unwrap();

    assert!(layout.panel(&PanelId::new("outline")).is_none());
    assert_eq!(panel_ids(&layout, "explorer"), vec!["files"]);
    let files = layout.panel(&PanelId::new("files")).unwrap();
    assert_eq!(files.tabs[0].id, TabId::new("outline-tab"));
    assert_eq!(files.active_tab, Some(TabId::new("outline-tab")));
}

#[test]
fn test_cascade_reaches_floating_window() {
    let mut layout = fixtures::ide_layout();
    layout
        .insert_tab_to_panel(&TabId::new("console-tab"), &PanelId::new("terminal"), 1)
        .unwrap();
    assert!(layout.floating.is_empty());
    assert!(layout.validate().is_empty());
}

#[test]
fn test_forward_move_within_group() {
    let mut layout = LayoutBuilder::new()
        .dock(
            Edge::Left,
            fixtures::group(
                "g",
                Direction::Row,
                vec![fixtures::panel("a"), fixtures::panel("b"), fixtures::panel("c")],
            ),
        )
        .build();

    layout.move_to_group(&PanelId::new("a"), &GroupId::new("g"), 2).unwrap();
    assert_eq!(panel_ids(&layout, "g"), vec!["b", "a", "c"]);

    // Its own slot and the one after it leave the order alone.
    layout.move_to_group(&PanelId::new("a"), &GroupId::new("g"), 1).unwrap();
    layout.move_to_group(&PanelId::new("a"), &GroupId::new("g"), 2).unwrap();
    assert_eq!(panel_ids(&layout, "g"), vec!["b", "a", "c"]);
}

#[test]
fn test_missing_ids_leave_layout_untouched() {
    let mut layout = fixtures::ide_layout();
    let before = layout.clone();

    assert!(layout
        .move_to_group(&PanelId::new("ghost"), &GroupId::new("explorer"), 0)
        .unwrap_err()
        .is_not_found());
    assert!(layout
        .move_to_group(&PanelId::new("files"), &GroupId::new("ghost"), 0)
        .unwrap_err()
        .is_not_found());
    assert!(layout
        .insert_tab_to_panel(&TabId::new("files-tab"), &PanelId::new("ghost"), 0)
        .is_err());
    assert_eq!(layout, before);
}

fn resizable_group() -> Layout {
    let constraints = PanelConstraints::min(50.0);
    LayoutBuilder::new()
        .dock(
            Edge::Left,
            fixtures::group(
                "g",
                Direction::Row,
                vec![
                    fixtures::panel("a").size(200.0, 200.0).constraints(constraints),
                    fixtures::panel("b").size(200.0, 200.0).constraints(constraints),
                    fixtures::panel("c").size(200.0, 200.0).constraints(constraints),
                ],
            ),
        )
        .build()
}

#[test]
fn test_resize_conserves_pair_extent() {
    let mut layout = resizable_group();
    let result = layout
        .resize_panel_with_adjacent(&PanelId::new("a"), 200.0, 260.0, Direction::Row)
        .unwrap();
    assert_eq!(result.panel + result.neighbor.unwrap(), 400.0);
    assert_eq!(layout.panel(&PanelId::new("b")).unwrap().height, 140.0);
}

#[test]
fn test_resize_pins_neighbor_at_minimum() {
    let mut layout = resizable_group();
    let result = layout
        .resize_panel_with_adjacent(&PanelId::new("a"), 200.0, 500.0, Direction::Row)
        .unwrap();
    assert_eq!(result.neighbor, Some(50.0));
    assert_eq!(result.panel, 350.0);
}

#[test]
fn test_layout_json_round_trip_is_validated() {
    let layout = fixtures::ide_layout();
    let json = layout.to_json().unwrap();
    assert_eq!(Layout::from_json(&json).unwrap(), layout);

    let broken = json.replace("\"outline\"", "\"files\"");
    assert!(Layout::from_json(&broken).is_err());
}

#[derive(Debug, Clone)]
enum Op {
    MoveToGroup(usize, usize, usize),
    DockPanel(usize, usize, usize),
    FloatPanel(usize),
    PanelFromTab(usize, usize, usize),
    GroupFromTab(usize, usize, usize),
    FloatTab(usize),
    InsertTab(usize, usize, usize),
    MergePanels(usize, usize, usize),
    DockGroup(usize, usize, usize),
    FloatGroup(usize),
    MergeGroupIntoPanel(usize, usize, usize),
    MergeGroups(usize, usize, usize),
    CloseTab(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let n = 0usize..16;
    prop_oneof![
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::MoveToGroup(a, b, i)),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::DockPanel(a, b, i)),
        n.clone().prop_map(Op::FloatPanel),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::PanelFromTab(a, b, i)),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::GroupFromTab(a, b, i)),
        n.clone().prop_map(Op::FloatTab),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::InsertTab(a, b, i)),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::MergePanels(a, b, i)),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::DockGroup(a, b, i)),
        n.clone().prop_map(Op::FloatGroup),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::MergeGroupIntoPanel(a, b, i)),
        (n.clone(), n.clone(), n.clone()).prop_map(|(a, b, i)| Op::MergeGroups(a, b, i)),
        n.prop_map(Op::CloseTab),
    ]
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    (!items.is_empty()).then(|| items[index % items.len()].clone())
}

/// Apply `op` against whatever ids currently exist. Errors are expected for
/// nonsensical combinations and are ignored.
fn apply(layout: &mut Layout, ctx: &mut DockingContext, op: &Op) {
    let panels: Vec<PanelId> = layout.panels().map(|p| p.id.clone()).collect();
    let tabs: Vec<TabId> = layout.panels().flat_map(|p| p.tabs.iter().map(|t| t.id.clone())).collect();
    let groups: Vec<GroupId> = layout.groups().map(|(_, g)| g.id.clone()).collect();
    let edge = |i: usize| Edge::ALL[i % 4];
    let origin = Vec2::new(100.0, 100.0);

    let _ = match *op {
        Op::MoveToGroup(a, b, i) => match (pick(&panels, a), pick(&groups, b)) {
            (Some(p), Some(g)) => layout.move_to_group(&p, &g, i),
            _ => Ok(()),
        },
        Op::DockPanel(a, e, i) => match pick(&panels, a) {
            Some(p) => layout
                .create_group_in_container(ctx, &p, edge(e), i, edge(e).default_direction())
                .map(drop),
            None => Ok(()),
        },
        Op::FloatPanel(a) => match pick(&panels, a) {
            Some(p) => layout.create_float_window(ctx, &p, origin, None).map(drop),
            None => Ok(()),
        },
        Op::PanelFromTab(a, b, i) => match (pick(&tabs, a), pick(&groups, b)) {
            (Some(t), Some(g)) => layout.create_panel_from_tab(ctx, &t, &g, i).map(drop),
            _ => Ok(()),
        },
        Op::GroupFromTab(a, e, i) => match pick(&tabs, a) {
            Some(t) => layout
                .create_group_from_tab(ctx, &t, edge(e), i, Direction::Row)
                .map(drop),
            None => Ok(()),
        },
        Op::FloatTab(a) => match pick(&tabs, a) {
            Some(t) => layout.create_float_window_from_tab(ctx, &t, origin, None).map(drop),
            None => Ok(()),
        },
        Op::InsertTab(a, b, i) => match (pick(&tabs, a), pick(&panels, b)) {
            (Some(t), Some(p)) => layout.insert_tab_to_panel(&t, &p, i),
            _ => Ok(()),
        },
        Op::MergePanels(a, b, i) => match (pick(&panels, a), pick(&panels, b)) {
            (Some(s), Some(t)) => layout.merge_panel_tabs_to_panel(&s, &t, i),
            _ => Ok(()),
        },
        Op::DockGroup(a, e, i) => match pick(&groups, a) {
            Some(g) => layout.move_group_to_container(&g, edge(e), i),
            None => Ok(()),
        },
        Op::FloatGroup(a) => match pick(&groups, a) {
            Some(g) => layout.create_float_window_from_group(ctx, &g, origin, None).map(drop),
            None => Ok(()),
        },
        Op::MergeGroupIntoPanel(a, b, i) => match (pick(&groups, a), pick(&panels, b)) {
            (Some(g), Some(p)) => layout.merge_group_into_panel(&g, &p, i),
            _ => Ok(()),
        },
        Op::MergeGroups(a, b, i) => match (pick(&groups, a), pick(&groups, b)) {
            (Some(g), Some(t)) => layout.merge_group_into_group(&g, &t, i),
            _ => Ok(()),
        },
        Op::CloseTab(a) => match pick(&tabs, a) {
            Some(t) => layout.close_tab(&t).map(drop),
            None => Ok(()),
        },
    };
}

fn tab_ids(layout: &Layout) -> HashSet<TabId> {
    layout
        .panels()
        .flat_map(|p| p.tabs.iter().map(|t| t.id.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_every_node_has_one_parent(ops in proptest::collection::vec(op(), 1..40)) {
        let mut layout = fixtures::ide_layout();
        let mut ctx = DockingContext::default();
        ctx.sync_z_order(&layout);
        let mut alive = tab_ids(&layout);

        for op in &ops {
            let closing = matches!(op, Op::CloseTab(_));
            apply(&mut layout, &mut ctx, op);

            // No duplicate ids, no empty panels, groups or windows.
            let problems = layout.validate();
            prop_assert!(problems.is_empty(), "{:?} after {:?}", problems, op);

            let now = tab_ids(&layout);
            if closing {
                prop_assert!(now.is_subset(&alive));
            } else {
                prop_assert_eq!(&now, &alive);
            }
            alive = now;
        }

        let z: Vec<u64> = layout.floating.iter().map(|f| f.z_index).collect();
        let distinct: HashSet<u64> = z.iter().copied().collect();
        prop_assert_eq!(z.len(), distinct.len());
    }
}
