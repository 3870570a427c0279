use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use route_finder::data_structures::IndexedMinPriorityQueue;
use route_finder::graph::generators::{generate_grid, generate_random_connected, grid_label, vertex_label};
use route_finder::{Dijkstra, ShortestPathAlgorithm};

fn bench_point_to_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_to_point");
    for &size in &[1_000usize, 10_000] {
        let graph = generate_random_connected(size, size * 2, 100, 7);
        let destination = vertex_label(size - 1);
        group.bench_with_input(BenchmarkId::new("random", size), &graph, |b, graph| {
            b.iter(|| Dijkstra::new().shortest_path(black_box(graph), "v0", &destination))
        });
    }

    let grid = generate_grid(100, 100, 1);
    let corner = grid_label(99, 99);
    group.bench_function("grid_100x100", |b| {
        b.iter(|| Dijkstra::new().shortest_path(black_box(&grid), "r0c0", &corner))
    });
    group.finish();
}

fn bench_full_tree(c: &mut Criterion) {
    let graph = generate_random_connected(10_000, 20_000, 100, 11);
    c.bench_function("full_tree_random_10k", |b| {
        b.iter(|| Dijkstra::new().compute_shortest_paths(black_box(&graph), 0))
    });
}

fn bench_queue(c: &mut Criterion) {
    c.bench_function("queue_push_update_pop_10k", |b| {
        b.iter(|| {
            let mut queue = IndexedMinPriorityQueue::with_capacity(10_000);
            for item in 0..10_000usize {
                let _ = queue.push(item, (item * 7919 % 10_007) as u64 + 10_000);
            }
            for item in (0..10_000usize).step_by(3) {
                let _ = queue.update(item, item as u64);
            }
            while let Ok(entry) = queue.pop() {
                black_box(entry);
            }
        })
    });
}

criterion_group!(benches, bench_point_to_point, bench_full_tree, bench_queue);
criterion_main!(benches);
