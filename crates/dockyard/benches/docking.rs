//! Benchmarks for hot-zone resolution and layout mutation.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dockyard::hot_zone::{DragExclusion, HotZoneResolver};
use dockyard::model::Edge;
use dockyard::{DockingContext, DragPayload, GroupId, Layout, PanelId};
use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;
use dockyard_test_utils::{LayoutBuilder, fixtures, layout_bounds};

const ROOT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// A layout with `groups` groups of four panels on the left and bottom edges.
fn wide_layout(groups: usize) -> Layout {
    let mut builder = LayoutBuilder::new();
    for g in 0..groups {
        let edge = if g % 2 == 0 { Edge::Left } else { Edge::Bottom };
        let panels = (0..4)
            .map(|p| fixtures::panel(&format!("p{g}-{p}")).size(240.0, 120.0))
            .collect();
        builder = builder.dock(
            edge,
            fixtures::group(&format!("g{g}"), edge.default_direction(), panels).size(240.0, 480.0),
        );
    }
    builder.build()
}

fn bench_hot_zone_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_zone_resolve");
    let resolver = HotZoneResolver::default();
    let payload = DragPayload::Panel(PanelId::new("dragged"));

    for size in [4, 16, 64] {
        let layout = wide_layout(size);
        let bounds = layout_bounds(&layout, ROOT);
        group.throughput(Throughput::Elements(layout.panel_count() as u64));

        group.bench_with_input(BenchmarkId::new("empty_space", size), &size, |b, _| {
            b.iter(|| {
                resolver.resolve(
                    &layout,
                    &bounds,
                    black_box(Vec2::new(1500.0, 300.0)),
                    DragExclusion {
                        payload: &payload,
                        lifted: None,
                    },
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("container_edge", size), &size, |b, _| {
            b.iter(|| {
                resolver.resolve(
                    &layout,
                    &bounds,
                    black_box(Vec2::new(1900.0, 500.0)),
                    DragExclusion {
                        payload: &payload,
                        lifted: None,
                    },
                )
            });
        });
    }

    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");

    for size in [4, 16, 64] {
        let layout = wide_layout(size);
        group.bench_with_input(BenchmarkId::new("float_and_redock", size), &size, |b, _| {
            b.iter_batched(
                || (layout.clone(), DockingContext::default()),
                |(mut layout, mut ctx)| {
                    let panel = PanelId::new("p0-0");
                    let float = layout
                        .create_float_window(&mut ctx, &panel, Vec2::new(100.0, 100.0), None)
                        .ok();
                    let _ = layout.move_to_group(&panel, &GroupId::new("g1"), 2);
                    black_box((float, layout))
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("locate_last_panel", size), &size, |b, &size| {
            let last = PanelId::new(format!("p{}-3", size - 1));
            b.iter(|| layout.locate(black_box(&last)));
        });
    }

    group.bench_function("distribute_container", |b| {
        let mut layout = wide_layout(16);
        b.iter(|| layout.distribute_container(Edge::Left, black_box(1080.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_hot_zone_resolve, bench_mutations);
criterion_main!(benches);
