use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mindgraph::graph::{Color, GraphStore, NodeId, Rect};
use mindgraph::hint::SelectionAddressor;
use mindgraph::persistence;

/// Root with `size` nodes below it, `fanout` children per node
fn build_tree(size: usize, fanout: usize) -> GraphStore {
    let mut store = GraphStore::with_layout(Rect::new(-10_000.0, -10_000.0, 20_000.0, 20_000.0), 100.0);
    let root = store.create_root();
    let mut parents: Vec<NodeId> = vec![root];
    let mut next_parent = 0;

    while store.node_count() <= size {
        let parent = parents[next_parent];
        for _ in 0..fanout {
            if let Ok(child) = store.insert_child(parent, "node", Color::WHITE, Color::BLACK) {
                parents.push(child);
            }
        }
        next_parent += 1;
        if next_parent >= parents.len() {
            break;
        }
    }
    store
}

/// Benchmark child insertion, placement included
fn bench_insert_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_child");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| criterion::black_box(build_tree(size, 4)));
        });
    }
    group.finish();
}

/// Benchmark subtree collection from the root
fn bench_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtree");

    for size in [100, 1000].iter() {
        let store = build_tree(*size, 4);
        let root = store.root().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| criterion::black_box(store.subtree(root).len()));
        });
    }
    group.finish();
}

/// Benchmark XML save and load
fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");
    let store = build_tree(1000, 4);
    let text = persistence::to_xml(&persistence::save(&store)).unwrap();

    group.bench_function("to_xml", |b| {
        b.iter(|| criterion::black_box(persistence::to_xml(&persistence::save(&store)).unwrap()));
    });
    group.bench_function("from_xml", |b| {
        b.iter(|| {
            let doc = persistence::from_xml(&text).unwrap();
            criterion::black_box(persistence::load(&doc).unwrap())
        });
    });
    group.finish();
}

/// Benchmark hint narrowing over a large node list
fn bench_hint(c: &mut Criterion) {
    c.bench_function("hint_narrowing_10k", |b| {
        b.iter(|| {
            let mut hint = SelectionAddressor::new();
            hint.toggle(10_000);
            hint.type_digit(4, 10_000);
            criterion::black_box(hint.type_digit(2, 10_000))
        });
    });
}

criterion_group!(benches, bench_insert_child, bench_subtree, bench_persistence, bench_hint);
criterion_main!(benches);
